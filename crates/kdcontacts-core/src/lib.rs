//! # kdcontacts Core Library
//!
//! Fixed-radius contact search over atomic coordinates. Every `ATOM` record of a
//! structure is indexed in a three-dimensional k-d tree, and for each atom all other
//! atoms within a given Euclidean radius are reported.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `PointSet`,
//!   `BoundingBox`), the fixed-column record reader, and the spatial partition itself
//!   (median selection, tree construction, range queries).
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting and
//!   the contact-reporting task that drives one range query per atom.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a single
//!   call that turns a point set into a complete contact list.

pub mod core;
pub mod engine;
pub mod workflows;
