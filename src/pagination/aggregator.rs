//! Page-number aggregation
//!
//! Walks every page of a list endpoint and merges them into one envelope.

use super::types::{PageEnvelope, PaginationState, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::options::{RequestOptions, PAGE_KEY};
use std::future::Future;
use tracing::debug;

/// Collects all pages of a list endpoint into a single envelope
///
/// Pages are fetched strictly in order, one request at a time. The page
/// count is taken from the first page only; if the data changes while the
/// walk is running the result may miss or repeat items, nothing checks
/// for that.
#[derive(Debug, Clone, Copy)]
pub struct PageAggregator {
    /// Page size used when the caller did not set one
    pub page_size: u32,
}

impl Default for PageAggregator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageAggregator {
    /// Create an aggregator with the default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with a custom default page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self { page_size }
    }

    /// Options for the first request
    ///
    /// The caller's `page` is dropped so the walk always starts at page 1.
    pub fn first_options(&self, base: &RequestOptions) -> RequestOptions {
        let mut options = base.with_default_page_size(self.page_size);
        options.page = None;
        options.params.remove(PAGE_KEY);
        options
    }

    /// Options for page `page` (2 and up)
    pub fn page_options(&self, base: &RequestOptions, page: u32) -> RequestOptions {
        let mut options = base.with_default_page_size(self.page_size);
        options.page = Some(page);
        options
    }

    /// Fetch every page with `fetch` and return the synthesized envelope
    ///
    /// Any failing page fails the whole call.
    pub async fn collect<F, Fut>(&self, mut fetch: F, base: &RequestOptions) -> Result<PageEnvelope>
    where
        F: FnMut(RequestOptions) -> Fut,
        Fut: Future<Output = Result<PageEnvelope>>,
    {
        let mut state = PaginationState::new();

        let first = fetch(self.first_options(base)).await?;
        state.total_pages = first.total_pages;
        let expected_items = first.total_items;
        let mut items = first.items;
        state.record_page(1, items.len());

        debug!(
            "Fetched page 1/{} ({} items)",
            state.total_pages.max(1),
            items.len()
        );

        while let Some(page) = state.next_page() {
            let envelope = fetch(self.page_options(base, page)).await?;
            debug!(
                "Fetched page {}/{} ({} items)",
                page,
                state.total_pages,
                envelope.items.len()
            );
            state.record_page(page, envelope.items.len());
            items.extend(envelope.items);
        }

        if state.total_fetched != expected_items {
            debug!(
                "Collected {} items but first page reported {}",
                state.total_fetched, expected_items
            );
        }

        Ok(PageEnvelope::synthesized(items))
    }
}
