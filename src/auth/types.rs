//! Auth types
//!
//! Resolved credential configuration and the cached-token container.

use crate::catalog::AuthDefinition;
use crate::error::Result;
use crate::template::{self, TemplateContext};
use chrono::{DateTime, Duration, Utc};

/// Tokens are refreshed this many seconds before their stated expiry
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Resolved authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Static bearer token
    Bearer {
        /// The token value
        token: String,
    },

    /// API key in a header
    ApiKey {
        /// Header name
        header_name: String,
        /// Prefix prepended to the value
        prefix: Option<String>,
        /// The key value
        value: String,
    },

    /// App credential exchange for a tenant access token
    AppToken {
        /// Token endpoint URL
        token_url: String,
        /// Application ID
        app_id: String,
        /// Application secret
        app_secret: String,
    },
}

impl AuthConfig {
    /// Resolve a catalog auth definition against a template context,
    /// interpolating `{{ config.* }}` credential references.
    pub fn resolve(def: &AuthDefinition, ctx: &TemplateContext) -> Result<Self> {
        match def {
            AuthDefinition::None => Ok(Self::None),
            AuthDefinition::Bearer { token } => Ok(Self::Bearer {
                token: template::render(token, ctx)?,
            }),
            AuthDefinition::ApiKey {
                header_name,
                prefix,
                value,
            } => Ok(Self::ApiKey {
                header_name: header_name.clone(),
                prefix: prefix.clone(),
                value: template::render(value, ctx)?,
            }),
            AuthDefinition::AppToken {
                token_url,
                app_id,
                app_secret,
            } => Ok(Self::AppToken {
                token_url: template::render(token_url, ctx)?,
                app_id: template::render(app_id, ctx)?,
                app_secret: template::render(app_secret, ctx)?,
            }),
        }
    }
}

/// A cached access token with optional expiry
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The token value
    pub token: String,
    /// When the token expires, if known
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a token with an explicit expiry
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token expiring after the given number of seconds
    pub fn expires_in(token: String, seconds: i64) -> Self {
        Self {
            token,
            expires_at: Some(Utc::now() + Duration::seconds(seconds)),
        }
    }

    /// Whether the token is expired (or close enough to expiry that it
    /// should be refreshed). Tokens without expiry never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS) >= expires_at
            }
            None => false,
        }
    }
}
