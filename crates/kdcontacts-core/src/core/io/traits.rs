use crate::core::models::point_set::PointSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// What a reader does when it meets a record it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MalformedPolicy {
    /// Stop at the first malformed record and return its error.
    #[default]
    Abort,
    /// Log a warning for the record, leave it out of the point set and continue.
    Skip,
}

/// Defines the interface for turning a structure file into a [`PointSet`].
///
/// Implementors handle format-specific parsing. The point set preserves record order,
/// which is also the order in which contacts are reported.
pub trait StructureFile {
    /// Summary of the read (counts, early termination, ...).
    type Report;

    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads every qualifying record from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `policy` - How malformed records are handled.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, or on the first malformed record when `policy`
    /// is [`MalformedPolicy::Abort`].
    fn read_from(
        reader: &mut impl BufRead,
        policy: MalformedPolicy,
    ) -> Result<(PointSet, Self::Report), Self::Error>;

    /// Reads a structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or reading fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        policy: MalformedPolicy,
    ) -> Result<(PointSet, Self::Report), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, policy)
    }
}
