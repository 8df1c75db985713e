//! # Core Module
//!
//! Building blocks for the contact search: the molecular point model, the boundary
//! reader and writer, and the k-d tree.
//!
//! - **Point Model** ([`models`]) - Atom records, the insertion-ordered point set and
//!   axis-aligned bounding boxes
//! - **File I/O** ([`io`]) - Fixed-column `ATOM` record reading, flag scanning and the
//!   tab-separated contact table
//! - **Spatial Partition** ([`spatial`]) - Median selection, tree construction and
//!   box range queries

pub mod io;
pub mod models;
pub mod spatial;
