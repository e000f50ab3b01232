//! YAML parser for catalog definitions
//!
//! Parses and validates catalog YAML files. Supports both built-in
//! catalogs (by name) and custom YAML files (by path).

use crate::catalog::builtin;
use crate::catalog::types::{CatalogDefinition, EndpointDefinition, ParamLocation};
use crate::error::{Error, Result};
use crate::template;
use std::fs;
use std::path::Path;

/// Load a catalog definition from a name or file path.
///
/// The input is first checked against the built-in catalog names (e.g.,
/// "directory"), then treated as a file path.
///
/// # Examples
///
/// ```ignore
/// // Load a built-in catalog by name
/// let catalog = load_catalog("directory")?;
///
/// // Load a custom catalog from a file
/// let catalog = load_catalog("./my-catalog.yaml")?;
/// ```
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogDefinition> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = builtin::get_builtin(&path_str) {
            return load_catalog_from_str(yaml);
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            let builtin_list = builtin::list_builtin().join(", ");
            Error::config(format!(
                "Catalog '{}' not found. Built-in catalogs: {}. Or provide a path to a YAML file.",
                path.display(),
                builtin_list
            ))
        } else {
            Error::config(format!(
                "Failed to read catalog file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_catalog_from_str(&content)
}

/// Load a catalog definition from a YAML string
pub fn load_catalog_from_str(yaml: &str) -> Result<CatalogDefinition> {
    let def: CatalogDefinition = serde_yaml::from_str(yaml)?;

    validate_catalog(&def)?;
    Ok(def)
}

/// Validate a catalog definition
fn validate_catalog(def: &CatalogDefinition) -> Result<()> {
    if def.name.is_empty() {
        return Err(Error::config("Catalog name cannot be empty"));
    }

    if def.base_url.is_empty() {
        return Err(Error::config("Catalog base_url cannot be empty"));
    }
    url::Url::parse(&def.base_url)?;

    if def.endpoints.is_empty() {
        return Err(Error::config("Catalog must have at least one endpoint"));
    }

    let endpoint_names: std::collections::HashSet<_> =
        def.endpoints.iter().map(|e| &e.name).collect();

    if endpoint_names.len() != def.endpoints.len() {
        return Err(Error::config("Duplicate endpoint names found"));
    }

    for endpoint in &def.endpoints {
        validate_endpoint(endpoint)?;
    }

    Ok(())
}

/// Validate an endpoint definition
fn validate_endpoint(endpoint: &EndpointDefinition) -> Result<()> {
    if endpoint.name.is_empty() {
        return Err(Error::config("Endpoint name cannot be empty"));
    }

    if endpoint.path.is_empty() {
        return Err(Error::config(format!(
            "Endpoint '{}' path cannot be empty",
            endpoint.name
        )));
    }

    // Path params must appear in the path template
    for param in &endpoint.params {
        if param.location == ParamLocation::Path {
            let placeholder = format!("params.{}", param.name);
            if !template::has_templates(&endpoint.path)
                || !endpoint.path.contains(&placeholder)
            {
                return Err(Error::config(format!(
                    "Endpoint '{}' declares path param '{}' but the path template does not reference it",
                    endpoint.name, param.name
                )));
            }
        }
    }

    // The cursor is owned by the iterator; endpoints must not declare it
    if let Some(pagination) = &endpoint.pagination {
        if endpoint.param(&pagination.cursor_param).is_some() {
            return Err(Error::config(format!(
                "Endpoint '{}' declares the cursor parameter '{}' explicitly; it is supplied by the pagination loop",
                endpoint.name, pagination.cursor_param
            )));
        }
    }

    Ok(())
}
