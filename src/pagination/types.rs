//! Pagination types
//!
//! Defines the page envelope returned by list endpoints and the state
//! tracked while walking pages.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Page size requested when aggregating all pages
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// One page of a list response
///
/// Metadata fields default to 0 when a page omits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    /// 1-based page number
    #[serde(default)]
    pub page_number: u32,
    /// Page size
    #[serde(default)]
    pub page_size: u32,
    /// Total items across all pages
    #[serde(default)]
    pub total_items: u64,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: u32,
    /// Items on this page, schema opaque to the client
    #[serde(default)]
    pub items: Vec<JsonValue>,
}

impl PageEnvelope {
    /// Build the single-page envelope representing a full result set
    pub fn synthesized(items: Vec<JsonValue>) -> Self {
        let len = items.len();
        Self {
            page_number: 1,
            page_size: len as u32,
            total_items: len as u64,
            total_pages: 1,
            items,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Tracks pagination state during aggregation
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Last page fetched (0 before the first fetch)
    pub page: u32,
    /// Page count reported by the first page
    pub total_pages: u32,
    /// Items collected so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn record_page(&mut self, page: u32, items: usize) {
        self.page = page;
        self.total_fetched += items as u64;
        if self.page >= self.total_pages {
            self.mark_done();
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Next page to request, if any
    pub fn next_page(&self) -> Option<u32> {
        if self.done || self.page >= self.total_pages {
            None
        } else {
            Some(self.page + 1)
        }
    }
}
