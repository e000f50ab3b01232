//! Field shape descriptors
//!
//! A `FieldShape` is the schema-per-endpoint declaration consumed by the
//! generic decode step.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Shape of a payload field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldShape {
    /// Any JSON value
    Any,
    /// JSON string
    String,
    /// JSON integer
    Integer,
    /// JSON number (integer or float)
    Number,
    /// JSON boolean
    Boolean,
    /// JSON object with optionally described fields
    Object {
        /// Declared fields; undeclared fields pass through unchecked
        #[serde(default)]
        fields: HashMap<String, FieldShape>,
    },
    /// JSON array with an optional element shape
    Array {
        /// Shape of each element, when declared
        #[serde(default)]
        items: Option<Box<FieldShape>>,
    },
}

impl Default for FieldShape {
    fn default() -> Self {
        Self::Any
    }
}

impl FieldShape {
    /// Create an object shape from (name, shape) pairs
    pub fn object(fields: impl IntoIterator<Item = (String, FieldShape)>) -> Self {
        Self::Object {
            fields: fields.into_iter().collect(),
        }
    }

    /// Create an array shape with an element shape
    pub fn array(items: FieldShape) -> Self {
        Self::Array {
            items: Some(Box::new(items)),
        }
    }
}

/// Check a payload against a shape descriptor.
///
/// Declared fields are type-checked when present and non-null; absent
/// or null fields are accepted (provider fields are mostly optional).
pub fn check_shape(shape: &FieldShape, value: &Value) -> Result<()> {
    check_at(shape, value, "$")
}

fn check_at(shape: &FieldShape, value: &Value, path: &str) -> Result<()> {
    match shape {
        FieldShape::Any => Ok(()),
        FieldShape::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err(mismatch(path, "string", value))
            }
        }
        FieldShape::Integer => {
            if value.is_i64() || value.is_u64() {
                Ok(())
            } else {
                Err(mismatch(path, "integer", value))
            }
        }
        FieldShape::Number => {
            if value.is_number() {
                Ok(())
            } else {
                Err(mismatch(path, "number", value))
            }
        }
        FieldShape::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(mismatch(path, "boolean", value))
            }
        }
        FieldShape::Object { fields } => {
            let Some(map) = value.as_object() else {
                return Err(mismatch(path, "object", value));
            };
            for (name, field_shape) in fields {
                if let Some(field_value) = map.get(name) {
                    if field_value.is_null() {
                        continue;
                    }
                    check_at(field_shape, field_value, &format!("{path}.{name}"))?;
                }
            }
            Ok(())
        }
        FieldShape::Array { items } => {
            let Some(values) = value.as_array() else {
                return Err(mismatch(path, "array", value));
            };
            if let Some(item_shape) = items {
                for (index, item) in values.iter().enumerate() {
                    if item.is_null() {
                        continue;
                    }
                    check_at(item_shape, item, &format!("{path}[{index}]"))?;
                }
            }
            Ok(())
        }
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> Error {
    Error::decode(format!(
        "expected {expected} at {path}, got {}",
        type_name(value)
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
