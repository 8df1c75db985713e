//! # Core Models Module
//!
//! Data structures describing the points handed to the spatial partition.
//!
//! - [`atom`] - A single `ATOM` record: serial number, labels and coordinates
//! - [`bounds`] - Axis-aligned bounding boxes and interval overlap classification
//! - [`contact`] - A directed pair of atoms within the search radius
//! - [`point_set`] - The flat, insertion-ordered atom sequence with its overall extent
//!
//! Points are created once by a reader and never mutated afterwards; everything
//! downstream refers to them by their index in the [`point_set::PointSet`].

pub mod atom;
pub mod bounds;
pub mod contact;
pub mod point_set;
