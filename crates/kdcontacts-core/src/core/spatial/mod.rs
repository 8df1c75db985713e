//! # Spatial Partition Module
//!
//! A build-once, query-many k-d tree over a [`PointSet`](crate::core::models::point_set::PointSet).
//!
//! - [`median`] - In-place quickselect used to pick splitting values
//! - [`kdtree`] - Recursive median-split construction with ancestor bounding boxes
//! - [`query`] - Box range queries with three-way overlap pruning
//!
//! The tree stores point indices only. Range queries may return points outside the
//! query box (leaves are reported verbatim), so callers re-check candidates with
//! the exact metric they care about.

pub mod kdtree;
pub mod median;
pub mod query;

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("Out of memory while allocating {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}
