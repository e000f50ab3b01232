//! CLI runner
//!
//! Executes parsed commands: loads the catalog and config, builds the
//! API client, and prints results in the selected format.

use crate::catalog::{self, load_catalog, CatalogDefinition};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::dispatch::{ApiClient, CallParams};
use crate::error::{Error, Result};
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::warn;

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List => self.run_list(),
            Commands::Endpoints => self.run_endpoints(),
            Commands::Validate => self.run_validate(),
            Commands::Call {
                endpoint,
                param,
                params_json,
                config_json,
            } => {
                self.run_call(endpoint, param, params_json.as_deref(), config_json.as_deref())
                    .await
            }
            Commands::Pages {
                endpoint,
                param,
                params_json,
                config_json,
                max_pages,
            } => {
                self.run_pages(
                    endpoint,
                    param,
                    params_json.as_deref(),
                    config_json.as_deref(),
                    *max_pages,
                )
                .await
            }
        }
    }

    fn run_list(&self) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", json!(catalog::list_builtin()));
            }
            OutputFormat::Pretty => {
                println!("Built-in catalogs:");
                for name in catalog::list_builtin() {
                    println!("  {name}");
                }
            }
        }
        Ok(())
    }

    fn run_endpoints(&self) -> Result<()> {
        let catalog = self.load_selected_catalog()?;
        match self.cli.format {
            OutputFormat::Json => {
                let endpoints: Vec<_> = catalog
                    .endpoints
                    .iter()
                    .map(|e| {
                        json!({
                            "name": e.name,
                            "title": e.title,
                            "method": e.method.to_string(),
                            "path": e.path,
                            "paginated": e.is_paginated(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&endpoints)?);
            }
            OutputFormat::Pretty => {
                println!("Endpoints in '{}':", catalog.name);
                for e in &catalog.endpoints {
                    let marker = if e.is_paginated() { " [paginated]" } else { "" };
                    println!("  {:6} {}  ({}){marker}", e.method.to_string(), e.path, e.name);
                }
            }
        }
        Ok(())
    }

    fn run_validate(&self) -> Result<()> {
        let catalog = self.load_selected_catalog()?;
        match self.cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    json!({
                        "valid": true,
                        "catalog": catalog.name,
                        "endpoints": catalog.endpoints.len(),
                    })
                );
            }
            OutputFormat::Pretty => {
                println!(
                    "Catalog '{}' is valid ({} endpoints)",
                    catalog.name,
                    catalog.endpoints.len()
                );
            }
        }
        Ok(())
    }

    async fn run_call(
        &self,
        endpoint: &str,
        params: &[String],
        params_json: Option<&str>,
        config_json: Option<&str>,
    ) -> Result<()> {
        let client = self.build_client(config_json)?;
        let params = parse_params(params, params_json)?;

        let data = client.call(endpoint, &params).await?;
        match self.cli.format {
            OutputFormat::Json => println!("{data}"),
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&data)?),
        }
        Ok(())
    }

    async fn run_pages(
        &self,
        endpoint: &str,
        params: &[String],
        params_json: Option<&str>,
        config_json: Option<&str>,
        max_pages: Option<usize>,
    ) -> Result<()> {
        let client = self.build_client(config_json)?;
        let params = parse_params(params, params_json)?;

        let mut stream = client.list(endpoint, &params)?;
        let mut page_number = 0usize;

        while let Some(element) = stream.next().await {
            page_number += 1;
            match element {
                Some(page) => match self.cli.format {
                    OutputFormat::Json => {
                        let mut value = page.extra.clone();
                        value.insert("items".to_string(), Value::Array(page.items));
                        println!("{}", Value::Object(value));
                    }
                    OutputFormat::Pretty => {
                        println!("page {page_number}: {} items", page.items.len());
                    }
                },
                None => {
                    // The terminal sentinel: the listing failed partway.
                    warn!("listing '{endpoint}' failed after {} pages", page_number - 1);
                    match self.cli.format {
                        OutputFormat::Json => println!("null"),
                        OutputFormat::Pretty => println!("listing failed partway; see logs"),
                    }
                }
            }

            if max_pages.is_some_and(|max| page_number >= max) {
                break;
            }
        }

        Ok(())
    }

    fn load_selected_catalog(&self) -> Result<CatalogDefinition> {
        let name = self
            .cli
            .catalog
            .as_deref()
            .ok_or_else(|| Error::config("No catalog selected; pass --catalog"))?;
        load_catalog(name)
    }

    fn build_client(&self, config_json: Option<&str>) -> Result<ApiClient> {
        let catalog = self.load_selected_catalog()?;
        let config = self.load_config(config_json)?;
        ApiClient::new(catalog, config)
    }

    fn load_config(&self, config_json: Option<&str>) -> Result<Value> {
        if let Some(inline) = config_json {
            return Ok(serde_json::from_str(inline)?);
        }
        match &self.cli.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&content)?)
            }
            None => Ok(json!({})),
        }
    }
}

/// Parse `key=value` pairs and an optional inline JSON object into call
/// parameters. Values are parsed as JSON when possible, falling back to
/// plain strings (`page_size=50` is a number, `name=Alice` a string).
fn parse_params(pairs: &[String], params_json: Option<&str>) -> Result<CallParams> {
    let mut params = CallParams::new();

    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::config(format!("Invalid parameter '{pair}'; expected key=value")))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        params = params.param(key, value);
    }

    if let Some(inline) = params_json {
        let extra: Value = serde_json::from_str(inline)?;
        let Value::Object(map) = extra else {
            return Err(Error::config("--params-json must be a JSON object"));
        };
        for (key, value) in map {
            params = params.param(key, value);
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_pairs() {
        let params = parse_params(
            &["department_id=d1".to_string(), "page_size=50".to_string()],
            None,
        )
        .unwrap();
        assert_eq!(params.get("department_id"), Some(&json!("d1")));
        assert_eq!(params.get("page_size"), Some(&json!(50)));
    }

    #[test]
    fn test_parse_params_json_wins() {
        let params = parse_params(
            &["query=draft".to_string()],
            Some(r#"{"query": "final", "limit": 5}"#),
        )
        .unwrap();
        assert_eq!(params.get("query"), Some(&json!("final")));
        assert_eq!(params.get("limit"), Some(&json!(5)));
    }

    #[test]
    fn test_parse_params_rejects_bare_key() {
        assert!(parse_params(&["oops".to_string()], None).is_err());
    }

    #[test]
    fn test_parse_params_rejects_non_object_json() {
        assert!(parse_params(&[], Some("[1,2]")).is_err());
    }
}
