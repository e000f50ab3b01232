//! HTTP transport
//!
//! A thin client over reqwest: one request is one network round trip.
//! There is no retry, backoff, or caching at this layer; the provider
//! contract is a plain request/response exchange.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
