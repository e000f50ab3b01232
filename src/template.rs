//! Template interpolation for catalog definitions
//!
//! Handles `{{ variable }}` interpolation in endpoint paths and parameter
//! values. Supports nested access like `{{ config.app_id }}` and
//! `{{ params.spreadsheet_token }}`.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Context for template interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Application configuration values
    pub config: Value,
    /// Call parameters for the current request
    pub params: Value,
    /// Additional context variables
    pub vars: Value,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create context with config values
    pub fn with_config(config: Value) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Set config values
    pub fn set_config(&mut self, config: Value) -> &mut Self {
        self.config = config;
        self
    }

    /// Set call parameters
    pub fn set_params(&mut self, params: Value) -> &mut Self {
        self.params = params;
        self
    }

    /// Set additional variables
    pub fn set_vars(&mut self, vars: Value) -> &mut Self {
        self.vars = vars;
        self
    }

    /// Get a value by path (e.g., "config.app_id")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.is_empty() {
            return None;
        }

        // First part determines the root object
        let root = match parts[0] {
            "config" => &self.config,
            "params" => &self.params,
            "vars" => &self.vars,
            // Also support top-level access to params fields directly
            _ => {
                if let Some(val) = get_nested_value(&self.params, &parts) {
                    return Some(val);
                }
                return get_nested_value(&self.vars, &parts);
            }
        };

        // Navigate the remaining path
        if parts.len() == 1 {
            Some(root)
        } else {
            get_nested_value(root, &parts[1..])
        }
    }
}

/// Get a nested value from a JSON value by path
fn get_nested_value<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Render a template string with the given context
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut result = template.to_string();
    let mut errors = Vec::new();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let var_path = cap.get(1).unwrap().as_str();

        match ctx.get(var_path) {
            Some(value) => {
                let replacement = value_to_string(value);
                result = result.replace(full_match, &replacement);
            }
            None => {
                errors.push(var_path.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(result)
    } else {
        Err(Error::undefined_var(errors.join(", ")))
    }
}

/// Render a template, leaving undefined variables in place instead of erroring
pub fn render_optional(template: &str, ctx: &TemplateContext) -> String {
    let mut result = template.to_string();

    for cap in TEMPLATE_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let var_path = cap.get(1).unwrap().as_str();

        if let Some(value) = ctx.get(var_path) {
            let replacement = value_to_string(value);
            result = result.replace(full_match, &replacement);
        }
    }

    result
}

/// Check if a string contains template variables
pub fn has_templates(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Convert a JSON value to its string form for interpolation
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> TemplateContext {
        let mut ctx = TemplateContext::new();
        ctx.set_config(json!({ "app_id": "cli_a1b2", "region": "eu" }));
        ctx.set_params(json!({ "spreadsheet_token": "shtcn123", "page_size": 50 }));
        ctx
    }

    #[test]
    fn test_render_config_variable() {
        let result = render("/auth/{{ config.app_id }}/token", &ctx()).unwrap();
        assert_eq!(result, "/auth/cli_a1b2/token");
    }

    #[test]
    fn test_render_params_variable() {
        let result = render(
            "/sheets/v3/spreadsheets/{{ params.spreadsheet_token }}",
            &ctx(),
        )
        .unwrap();
        assert_eq!(result, "/sheets/v3/spreadsheets/shtcn123");
    }

    #[test]
    fn test_render_bare_param_name() {
        // Top-level names fall back to params, then vars
        let result = render("/sheets/{{ spreadsheet_token }}", &ctx()).unwrap();
        assert_eq!(result, "/sheets/shtcn123");
    }

    #[test]
    fn test_render_number_value() {
        let result = render("{{ params.page_size }}", &ctx()).unwrap();
        assert_eq!(result, "50");
    }

    #[test]
    fn test_render_multiple_variables() {
        let result = render("{{ config.region }}/{{ spreadsheet_token }}", &ctx()).unwrap();
        assert_eq!(result, "eu/shtcn123");
    }

    #[test]
    fn test_render_undefined_variable_errors() {
        let err = render("/users/{{ params.user_id }}", &ctx()).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable { .. }));
    }

    #[test]
    fn test_render_optional_leaves_undefined() {
        let result = render_optional("/users/{{ params.user_id }}", &ctx());
        assert_eq!(result, "/users/{{ params.user_id }}");
    }

    #[test]
    fn test_render_no_templates() {
        let result = render("/directory/v1/users", &ctx()).unwrap();
        assert_eq!(result, "/directory/v1/users");
    }

    #[test]
    fn test_has_templates() {
        assert!(has_templates("/users/{{ id }}"));
        assert!(!has_templates("/users/42"));
    }

    #[test]
    fn test_render_whitespace_tolerant() {
        let result = render("{{config.region}} and {{  config.region  }}", &ctx()).unwrap();
        assert_eq!(result, "eu and eu");
    }
}
