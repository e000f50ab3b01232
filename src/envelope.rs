//! Provider response envelopes
//!
//! Every Worklane endpoint wraps its payload in a uniform envelope
//! (`code`/`msg`/`data`); list endpoints additionally carry pagination
//! metadata inside `data` (`has_more` plus `page_token` or
//! `next_page_token`). This module normalizes both layers.

use crate::error::{Error, Result};
use crate::types::{JsonObject, OptionStringExt};
use serde_json::Value;

/// Field carrying the continuation flag in a list response
pub const HAS_MORE_FIELD: &str = "has_more";

/// Cursor fields in precedence order: `page_token` wins over
/// `next_page_token` when both are present and non-empty.
pub const CURSOR_FIELDS: [&str; 2] = ["page_token", "next_page_token"];

// ============================================================================
// API Response Envelope
// ============================================================================

/// The provider's uniform wire envelope: `{ code, msg, data }`
///
/// `code == 0` means success. Any other code is a provider-reported
/// error with a human-readable `msg`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Provider status code (0 = success)
    pub code: i64,
    /// Provider status message
    pub msg: String,
    /// Payload, absent for some write operations
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Normalize a raw response body into an envelope.
    ///
    /// Missing `code` is treated as success and missing `msg` as empty,
    /// matching how the provider omits them on some endpoints.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let code = map.get("code").and_then(Value::as_i64).unwrap_or(0);
                let msg = map
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let data = match map.remove("data") {
                    Some(Value::Null) | None => None,
                    Some(d) => Some(d),
                };
                Self { code, msg, data }
            }
            // Not an object at all: pass the body through as the payload
            other => Self {
                code: 0,
                msg: String::new(),
                data: Some(other),
            },
        }
    }

    /// Extract the payload, converting a non-zero code into `Error::Api`
    pub fn into_data(self) -> Result<Option<Value>> {
        if self.code == 0 {
            Ok(self.data)
        } else {
            Err(Error::api(self.code, self.msg))
        }
    }
}

// ============================================================================
// Page Envelope
// ============================================================================

/// One element of a paginated listing: the payload fields of a page
/// with the pagination metadata stripped out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Ordered items of this page (absent in the response = empty)
    pub items: Vec<Value>,
    /// Remaining payload fields (everything except the items field and
    /// the pagination metadata)
    pub extra: JsonObject,
}

impl Page {
    /// Whether this page carries no items and no extra payload
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.extra.is_empty()
    }
}

/// The result of one list fetch: the page payload plus the pagination
/// metadata that drives the iterator.
#[derive(Debug, Clone)]
pub struct PageEnvelope {
    /// The payload handed to the consumer
    pub page: Page,
    /// Continuation flag, coerced to a strict boolean
    pub has_more: bool,
    /// Cursor for the next fetch, if the provider returned one
    pub next_cursor: Option<String>,
}

impl PageEnvelope {
    /// Extract a page envelope from a normalized `data` payload.
    ///
    /// A missing or non-object payload is treated as an empty envelope
    /// rather than an error: the fetch succeeded, there is just nothing
    /// in it.
    pub fn from_data(data: Option<Value>, items_field: &str) -> Self {
        let mut map = match data {
            Some(Value::Object(map)) => map,
            _ => JsonObject::new(),
        };

        let has_more = truthy(map.get(HAS_MORE_FIELD));
        let next_cursor = extract_cursor(&map);

        let items = match map.remove(items_field) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        for field in CURSOR_FIELDS {
            map.remove(field);
        }
        map.remove(HAS_MORE_FIELD);

        Self {
            page: Page { items, extra: map },
            has_more,
            next_cursor,
        }
    }
}

/// Pick the next cursor from a page payload.
///
/// `page_token` takes precedence over `next_page_token`, except that an
/// empty string does not count as present (the source treats empty
/// tokens as falsy and falls through).
fn extract_cursor(map: &JsonObject) -> Option<String> {
    CURSOR_FIELDS.iter().find_map(|field| {
        map.get(*field)
            .and_then(Value::as_str)
            .map(String::from)
            .none_if_empty()
    })
}

/// Coerce a JSON value to a boolean with JavaScript truthiness.
///
/// Absent, `null`, `false`, `0`, and `""` are false; everything else,
/// including non-empty strings like `"false"`, is true.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
