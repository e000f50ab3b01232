//! Catalog types
//!
//! Declarative endpoint definition types for YAML parsing.

use crate::decode::FieldShape;
use crate::types::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Catalog Definition
// ============================================================================

/// Top-level catalog definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CatalogDefinition {
    /// Catalog name (e.g., "directory")
    pub name: String,
    /// Catalog version
    #[serde(default = "default_version")]
    pub version: String,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Base URL for all requests
    pub base_url: String,
    /// Credential scheme (values are usually templates)
    #[serde(default)]
    pub auth: Option<AuthDefinition>,
    /// Headers applied to every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Described endpoints
    pub endpoints: Vec<EndpointDefinition>,
}

impl CatalogDefinition {
    /// Look up an endpoint by name
    pub fn endpoint(&self, name: &str) -> Option<&EndpointDefinition> {
        self.endpoints.iter().find(|e| e.name == name)
    }
}

fn default_version() -> String {
    "0.1.0".to_string()
}

// ============================================================================
// Auth Definition
// ============================================================================

/// Credential scheme declared by a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDefinition {
    /// No authentication
    None,
    /// Static bearer token
    Bearer {
        /// Token value (usually a template like `{{ config.token }}`)
        token: String,
    },
    /// API key in a header
    ApiKey {
        /// Header name
        header_name: String,
        /// Prefix prepended to the value (e.g., "Bearer ")
        #[serde(default)]
        prefix: Option<String>,
        /// Key value (usually a template)
        value: String,
    },
    /// App credential exchange for a tenant access token
    AppToken {
        /// Token endpoint URL
        token_url: String,
        /// Application ID (usually a template)
        app_id: String,
        /// Application secret (usually a template)
        app_secret: String,
    },
}

// ============================================================================
// Endpoint Definition
// ============================================================================

/// One described endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointDefinition {
    /// Unique operation name within the catalog
    pub name: String,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// URL path template (e.g., `/directory/v1/users/{{ params.user_id }}`)
    pub path: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Parameter descriptors
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
    /// Response description
    #[serde(default)]
    pub response: ResponseDefinition,
    /// Pagination description; present marks this a list endpoint
    #[serde(default)]
    pub pagination: Option<PaginationDefinition>,
}

impl EndpointDefinition {
    /// Whether this endpoint produces cursor-paginated listings
    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    /// Look up a parameter descriptor by name
    pub fn param(&self, name: &str) -> Option<&ParamDefinition> {
        self.params.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// Param Definition
// ============================================================================

/// Where a parameter is placed in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Interpolated into the path template
    Path,
    /// Serialized as a query parameter
    #[default]
    Query,
    /// Placed into the JSON request body
    Body,
}

/// One parameter descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ParamDefinition {
    /// Parameter name
    pub name: String,
    /// Request location
    #[serde(default)]
    pub location: ParamLocation,
    /// Whether the dispatcher rejects calls that omit this parameter
    #[serde(default)]
    pub required: bool,
    /// Value shape
    #[serde(default)]
    pub shape: FieldShape,
    /// Default value applied when the caller omits the parameter
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

// ============================================================================
// Response Definition
// ============================================================================

/// Response description for an endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResponseDefinition {
    /// Field holding the list items (varies by endpoint; the pagination
    /// metadata fields do not)
    #[serde(default = "default_items_field")]
    pub items_field: String,
    /// Payload shape checked by the generic decode step
    #[serde(default)]
    pub shape: Option<FieldShape>,
}

impl Default for ResponseDefinition {
    fn default() -> Self {
        Self {
            items_field: default_items_field(),
            shape: None,
        }
    }
}

fn default_items_field() -> String {
    "items".to_string()
}

// ============================================================================
// Pagination Definition
// ============================================================================

/// Cursor pagination description for a list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginationDefinition {
    /// Query parameter carrying the cursor on follow-up requests
    #[serde(default = "default_cursor_param")]
    pub cursor_param: String,
    /// Optional query parameter for the page size
    #[serde(default)]
    pub page_size_param: Option<String>,
}

impl Default for PaginationDefinition {
    fn default() -> Self {
        Self {
            cursor_param: default_cursor_param(),
            page_size_param: None,
        }
    }
}

fn default_cursor_param() -> String {
    "page_token".to_string()
}
