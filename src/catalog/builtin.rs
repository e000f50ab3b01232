//! Built-in catalog definitions embedded in the binary
//!
//! This module embeds the catalog YAML files for the provider's API
//! areas directly into the binary, allowing users to write
//! `--catalog directory` instead of specifying a file path.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in catalog YAML definitions
pub static BUILTIN_CATALOGS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Organization directory
    m.insert("directory", include_str!("../../catalogs/directory.yaml"));

    // Workspace search
    m.insert("search", include_str!("../../catalogs/search.yaml"));

    // Spreadsheets
    m.insert("sheets", include_str!("../../catalogs/sheets.yaml"));

    // Speech-to-text
    m.insert("speech", include_str!("../../catalogs/speech.yaml"));

    // Security & compliance audit logs
    m.insert("audit", include_str!("../../catalogs/audit.yaml"));

    m
});

/// Get a built-in catalog by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_CATALOGS.get(name).copied()
}

/// Check if a catalog name is built in
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_CATALOGS.contains_key(name)
}

/// List all built-in catalog names
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_CATALOGS.keys().copied().collect();
    names.sort_unstable();
    names
}
