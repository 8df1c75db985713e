//! # Engine Module
//!
//! Drives the contact search over a built tree.
//!
//! - **Configuration** ([`config`]) - Search radius and malformed-record policy
//! - **Contact Reporting** ([`contacts`]) - One range query per atom, refined by true distance
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the lower layers
//!
//! With the `parallel` feature the per-atom queries run on the rayon thread pool. The
//! tree and the point set are only read during the search, so no synchronisation is
//! needed beyond collecting each atom's contacts into its own slot.

pub mod config;
pub mod contacts;
pub mod error;
pub mod progress;
