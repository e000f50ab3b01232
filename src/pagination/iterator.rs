//! The paginated list iterator
//!
//! A page stream is single-use and strictly sequential: the fetch for
//! page N+1 is never issued before page N's response has been observed,
//! and the stream cannot be restarted after exhaustion or failure.
//!
//! Error contract: a failed fetch yields exactly one `None` sentinel and
//! ends the stream. The error itself is not surfaced here; the fetch
//! boundary has already logged it. A consumer that needs to distinguish
//! a clean end from a partial failure checks the final element.

use crate::envelope::{Page, PageEnvelope};
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::future::Future;
use std::pin::Pin;

/// Boxed page stream, the form handed out by the dispatcher
pub type PageStream = Pin<Box<dyn Stream<Item = Option<Page>> + Send>>;

/// A single-page fetch capability.
///
/// Implementations capture the base request parameters (everything
/// except the cursor) and perform one network round trip per call.
/// Fetch failures must be logged by the implementation before they are
/// returned; the iterator will not log them.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page. `cursor` is `None` for the first request and the
    /// previous page's `next_cursor` afterwards.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<PageEnvelope>;
}

/// Adapter turning an async closure into a [`PageFetcher`]
pub struct FetchFn<F>(pub F);

#[async_trait]
impl<F, Fut> PageFetcher for FetchFn<F>
where
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PageEnvelope>> + Send,
{
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<PageEnvelope> {
        (self.0)(cursor.map(String::from)).await
    }
}

/// Iterator state between steps: either the cursor for the next fetch
/// or terminal.
enum Step {
    Fetch(Option<String>),
    Done,
}

/// Build the lazy page sequence over a fetch capability.
///
/// Each element is the page payload with the pagination metadata
/// stripped (`Some(page)`), except for the terminal `None` sentinel
/// emitted when a fetch step fails. The stream owns its cursor and
/// continuation state exclusively; dropping it cancels the listing
/// (there is no background work between steps).
pub fn page_stream<F>(fetcher: F) -> impl Stream<Item = Option<Page>> + Send
where
    F: PageFetcher,
{
    stream::unfold((fetcher, Step::Fetch(None)), |(fetcher, step)| async move {
        match step {
            Step::Done => None,
            Step::Fetch(cursor) => match fetcher.fetch_page(cursor.as_deref()).await {
                Ok(envelope) => {
                    let next = if envelope.has_more {
                        Step::Fetch(envelope.next_cursor)
                    } else {
                        Step::Done
                    };
                    Some((Some(envelope.page), (fetcher, next)))
                }
                // Already logged at the fetch boundary; one sentinel, then stop.
                Err(_) => Some((None, (fetcher, Step::Done))),
            },
        }
    })
}
