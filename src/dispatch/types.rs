//! Dispatcher types

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde_json::Value;

/// Arguments for one endpoint invocation.
///
/// Parameter routing (path, query, or body) is decided by the endpoint
/// descriptor, not by the caller; this is just a named bag of values.
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    values: JsonObject,
}

impl CallParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Build from a JSON value; must be an object or null
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::config(format!(
                "Call parameters must be a JSON object, got {other}"
            ))),
        }
    }

    /// Get a parameter value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterate over parameter names
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert into a JSON value for template contexts
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl FromIterator<(String, Value)> for CallParams {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
