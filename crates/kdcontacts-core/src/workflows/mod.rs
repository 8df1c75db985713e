//! # Workflows Module
//!
//! End-to-end entry points of the library.
//!
//! - **Contact Workflow** ([`contacts`]) - Builds the k-d tree over a point set and
//!   reports every atom pair within the configured radius.

pub mod contacts;
