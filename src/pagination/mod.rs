//! Pagination module
//!
//! # Overview
//!
//! List endpoints return one page at a time inside a [`PageEnvelope`].
//! [`PageAggregator`] walks every page reported by the first response and
//! collapses them into one envelope holding the full result set.

mod aggregator;
mod types;

pub use aggregator::PageAggregator;
pub use types::{PageEnvelope, PaginationState, DEFAULT_PAGE_SIZE};
