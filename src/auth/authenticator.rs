//! Authenticator implementation
//!
//! Applies credentials to outgoing requests and manages the tenant
//! access token exchange for app-credential auth.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached tenant token for app-credential auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::ApiKey {
                header_name,
                prefix,
                value,
            } => {
                let val = format!("{}{}", prefix.as_deref().unwrap_or(""), value);
                Ok(req.header(header_name.as_str(), val))
            }

            AuthConfig::AppToken { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid tenant token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_tenant_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange the app credentials for a tenant access token
    async fn fetch_tenant_token(&self) -> Result<CachedToken> {
        let AuthConfig::AppToken {
            token_url,
            app_id,
            app_secret,
        } = &self.config
        else {
            return Err(Error::auth("Token exchange requires app_token auth"));
        };

        let body = serde_json::json!({
            "app_id": app_id,
            "app_secret": app_secret,
        });

        let response = self
            .http_client
            .post(token_url.as_str())
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        if token_response.code != 0 {
            return Err(Error::TokenRefresh {
                message: format!(
                    "Token endpoint returned code {}: {}",
                    token_response.code, token_response.msg
                ),
            });
        }

        let Some(token) = token_response.tenant_access_token else {
            return Err(Error::TokenRefresh {
                message: "Token endpoint response carried no tenant_access_token".to_string(),
            });
        };

        Ok(match token_response.expire {
            Some(seconds) => CachedToken::expires_in(token, seconds),
            None => CachedToken::new(token, None),
        })
    }

    /// Clear the cached token (forces a refresh on the next request)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }
}

/// Tenant token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    tenant_access_token: Option<String>,
    #[serde(default)]
    expire: Option<i64>,
}
