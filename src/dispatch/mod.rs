//! The generic dispatcher
//!
//! One `ApiClient` replaces the per-endpoint wrapper functions a
//! generated SDK would carry: it resolves an endpoint descriptor from the
//! catalog, validates and routes the caller's parameters, issues exactly
//! one HTTP call, and normalizes the provider envelope. List endpoints
//! are wrapped in the cursor page stream instead.

mod types;

pub use types::CallParams;

use crate::auth::AuthConfig;
use crate::catalog::{CatalogDefinition, EndpointDefinition, ParamLocation};
use crate::decode::check_shape;
use crate::envelope::ApiResponse;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{page_stream, PageFetcher, PageStream};
use crate::template::{self, TemplateContext};
use crate::types::{JsonObject, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Client for one catalog of described endpoints
pub struct ApiClient {
    http: Arc<HttpClient>,
    catalog: CatalogDefinition,
    config: Value,
}

impl ApiClient {
    /// Create a client for a catalog.
    ///
    /// `config` supplies credential values referenced by the catalog's
    /// auth templates. A `base_url` string in the config overrides the
    /// catalog's base URL (custom domains, test servers).
    pub fn new(catalog: CatalogDefinition, config: Value) -> Result<Self> {
        let base_url = config
            .get("base_url")
            .and_then(Value::as_str)
            .unwrap_or(&catalog.base_url)
            .to_string();

        let mut builder = HttpClientConfig::builder().base_url(base_url);
        for (key, value) in &catalog.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        let http_config = builder.build();

        let http = match &catalog.auth {
            Some(def) => {
                let ctx = TemplateContext::with_config(config.clone());
                let mut auth = AuthConfig::resolve(def, &ctx)?;
                // Catalogs may declare the token endpoint relative to the
                // base URL so that custom domains carry it along.
                if let AuthConfig::AppToken { token_url, .. } = &mut auth {
                    if token_url.starts_with('/') {
                        let base = http_config.base_url.as_deref().unwrap_or_default();
                        *token_url = format!("{}{token_url}", base.trim_end_matches('/'));
                    }
                }
                HttpClient::with_auth(http_config, auth)
            }
            None => HttpClient::with_config(http_config),
        };

        Ok(Self {
            http: Arc::new(http),
            catalog,
            config,
        })
    }

    /// The catalog this client serves
    pub fn catalog(&self) -> &CatalogDefinition {
        &self.catalog
    }

    /// Invoke a single-call endpoint and return its normalized payload.
    ///
    /// Returns `Value::Null` when the provider sent no `data`.
    pub async fn call(&self, endpoint: &str, params: &CallParams) -> Result<Value> {
        let endpoint = self.resolve_endpoint(endpoint)?;
        let prepared = self.prepare(endpoint, params)?;
        let data = execute(&self.http, &self.catalog.name, endpoint, &prepared, None).await?;
        Ok(data.unwrap_or(Value::Null))
    }

    /// Invoke a list endpoint and return the lazy page stream.
    ///
    /// Each element is `Some(page)` until the provider reports no more
    /// data; a failed fetch yields one terminal `None` sentinel instead
    /// (the error has already been logged at the fetch boundary).
    pub fn list(&self, endpoint: &str, params: &CallParams) -> Result<PageStream> {
        let endpoint = self.resolve_endpoint(endpoint)?;
        let Some(pagination) = endpoint.pagination.clone() else {
            return Err(Error::config(format!(
                "Endpoint '{}' is not paginated; use call()",
                endpoint.name
            )));
        };

        let prepared = self.prepare(endpoint, params)?;
        let fetcher = EndpointFetcher {
            http: Arc::clone(&self.http),
            catalog_name: self.catalog.name.clone(),
            endpoint: endpoint.clone(),
            prepared,
            cursor_param: pagination.cursor_param,
        };

        Ok(Box::pin(page_stream(fetcher)))
    }

    /// Convenience: run a listing to completion, concatenating the items
    /// of every page. Returns the items and whether the listing ended
    /// cleanly (`false` means a fetch failed partway).
    pub async fn list_all(&self, endpoint: &str, params: &CallParams) -> Result<(Vec<Value>, bool)> {
        use futures::StreamExt;

        let mut stream = self.list(endpoint, params)?;
        let mut items = Vec::new();
        let mut clean = true;

        while let Some(element) = stream.next().await {
            match element {
                Some(page) => items.extend(page.items),
                None => clean = false,
            }
        }

        Ok((items, clean))
    }

    fn resolve_endpoint(&self, name: &str) -> Result<&EndpointDefinition> {
        self.catalog
            .endpoint(name)
            .ok_or_else(|| Error::endpoint_not_found(self.catalog.name.as_str(), name))
    }

    /// Validate the caller's parameters against the descriptor and route
    /// them into a concrete request.
    fn prepare(&self, endpoint: &EndpointDefinition, params: &CallParams) -> Result<Prepared> {
        // Reject parameters the descriptor does not know; silent typos
        // would otherwise vanish into ignored query strings.
        for name in params.names() {
            if endpoint.param(name).is_none() {
                return Err(Error::config(format!(
                    "Unknown parameter '{}' for endpoint '{}'",
                    name, endpoint.name
                )));
            }
        }

        let mut resolved = JsonObject::new();
        for def in &endpoint.params {
            let value = params.get(&def.name).cloned().or_else(|| def.default.clone());
            match value {
                Some(value) => {
                    check_shape(&def.shape, &value).map_err(|e| {
                        Error::config(format!(
                            "Parameter '{}' for endpoint '{}' has the wrong shape: {e}",
                            def.name, endpoint.name
                        ))
                    })?;
                    resolved.insert(def.name.clone(), value);
                }
                None if def.required => {
                    return Err(Error::missing_param(endpoint.name.as_str(), def.name.as_str()));
                }
                None => {}
            }
        }

        let mut ctx = TemplateContext::with_config(self.config.clone());
        ctx.set_params(Value::Object(resolved.clone()));
        let path = template::render(&endpoint.path, &ctx)?;

        let mut query = Vec::new();
        let mut body = JsonObject::new();
        for def in &endpoint.params {
            let Some(value) = resolved.get(&def.name) else {
                continue;
            };
            match def.location {
                ParamLocation::Path => {} // already interpolated
                ParamLocation::Query => {
                    query.push((def.name.clone(), query_value(value)));
                }
                ParamLocation::Body => {
                    body.insert(def.name.clone(), value.clone());
                }
            }
        }

        let body = if body.is_empty() && !endpoint.method.has_body() {
            None
        } else if body.is_empty() && endpoint.method.has_body() {
            // The provider expects a JSON body on write methods even when
            // every field is optional and omitted.
            Some(Value::Object(JsonObject::new()))
        } else {
            Some(Value::Object(body))
        };

        Ok(Prepared {
            method: endpoint.method,
            path,
            query,
            body,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("catalog", &self.catalog.name)
            .field("endpoints", &self.catalog.endpoints.len())
            .finish_non_exhaustive()
    }
}

/// A fully routed request, ready for the transport
#[derive(Debug, Clone)]
struct Prepared {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl Prepared {
    fn request_config(&self, cursor: Option<(&str, &str)>) -> RequestConfig {
        let mut config = RequestConfig::new();
        for (key, value) in &self.query {
            config = config.query(key.as_str(), value.as_str());
        }
        if let Some((param, token)) = cursor {
            config = config.query(param, token);
        }
        if let Some(body) = &self.body {
            config = config.json(body.clone());
        }
        config
    }
}

/// Serialize a parameter value for the query string
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Issue one HTTP call for a described endpoint and normalize the
/// response envelope. This is the fetch boundary: failures are logged
/// here and then returned to the caller.
async fn execute(
    http: &HttpClient,
    catalog_name: &str,
    endpoint: &EndpointDefinition,
    prepared: &Prepared,
    cursor: Option<(&str, &str)>,
) -> Result<Option<Value>> {
    let result = async {
        let raw: Value = http
            .request_json(
                prepared.method.into(),
                &prepared.path,
                prepared.request_config(cursor),
            )
            .await?;

        let data = ApiResponse::from_value(raw).into_data()?;

        if let (Some(shape), Some(data)) = (&endpoint.response.shape, &data) {
            check_shape(shape, data)?;
        }

        Ok(data)
    }
    .await;

    match &result {
        Ok(_) => debug!("{}.{} succeeded", catalog_name, endpoint.name),
        Err(e) => error!("{}.{} failed: {}", catalog_name, endpoint.name, e),
    }

    result
}

/// Page-fetch capability for one prepared list request. Captures the
/// base parameters; only the cursor varies between calls.
struct EndpointFetcher {
    http: Arc<HttpClient>,
    catalog_name: String,
    endpoint: EndpointDefinition,
    prepared: Prepared,
    cursor_param: String,
}

#[async_trait]
impl PageFetcher for EndpointFetcher {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<crate::envelope::PageEnvelope> {
        let cursor = cursor.map(|token| (self.cursor_param.as_str(), token));
        let data = execute(
            &self.http,
            &self.catalog_name,
            &self.endpoint,
            &self.prepared,
            cursor,
        )
        .await?;
        Ok(crate::envelope::PageEnvelope::from_data(
            data,
            &self.endpoint.response.items_field,
        ))
    }
}
