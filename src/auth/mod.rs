//! Authentication
//!
//! Credential seam for the provider API: static bearer tokens, API key
//! headers, and the app-credential exchange that trades an app ID and
//! secret for a tenant access token. The `Authenticator` applies the
//! configured scheme to outgoing requests and caches exchanged tokens
//! until they expire.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken};

#[cfg(test)]
mod tests;
