//! Cursor pagination
//!
//! Wraps a single-page fetch capability into a lazy, forward-only
//! sequence of pages, following the server-provided cursor until the
//! provider reports no more data or a fetch fails.

mod iterator;

pub use iterator::{page_stream, FetchFn, PageFetcher, PageStream};
