//! Cursor pagination
//!
//! List endpoints return a `links.next` reference while more pages remain.
//! [`PaginationWalker::fetch_all`] follows those references one page at a
//! time and concatenates the items.

use tracing::{debug, instrument};
use yametrika_core::Transport;
use yametrika_domain::{Result, ResultPage};

use super::pipeline::{RequestPipeline, RequestSpec};

/// Follows `links.next` until the service stops sending one
pub struct PaginationWalker<'a, T> {
    pipeline: &'a mut RequestPipeline<T>,
}

impl<'a, T: Transport> PaginationWalker<'a, T> {
    pub fn new(pipeline: &'a mut RequestPipeline<T>) -> Self {
        Self { pipeline }
    }

    /// Fetch every page starting from `spec`
    ///
    /// Follow-up requests are plain GETs against the cursor with no extra
    /// parameters. Pages are fetched strictly in sequence; overlapping or
    /// repeating cursors are not detected. The returned page has no cursor
    /// and its count is the number of collected items.
    ///
    /// # Errors
    /// The first failing page aborts the walk and its error is returned.
    #[instrument(skip(self, spec), fields(url = %spec.url))]
    pub async fn fetch_all(&mut self, spec: RequestSpec, items_key: &str) -> Result<ResultPage> {
        let requires_auth = spec.requires_auth;
        let first = self.pipeline.execute(spec).await?;
        let mut aggregate = ResultPage::from_object(&first, items_key);
        let mut pages = 1usize;
        // Trailing slash keeps any path prefix of the host when joining
        let base = format!("{}/", self.pipeline.host());

        while let Some(cursor) = aggregate.next.take() {
            let url = cursor.resolve(&base)?;
            debug!(page = pages + 1, %url, "following next link");

            let mut next = RequestSpec::get(url);
            next.requires_auth = requires_auth;
            let obj = self.pipeline.execute(next).await?;
            aggregate.extend(ResultPage::from_object(&obj, items_key));
            pages += 1;
        }

        aggregate.count = aggregate.items.len() as u64;
        debug!(pages, items = aggregate.items.len(), "pagination complete");
        Ok(aggregate)
    }
}
