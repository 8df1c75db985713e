use super::pdb::{ATOM_RECORD_TAG, END_OF_MODEL_TAG};
use super::read_record;
use std::io::{self, BufRead};
use tracing::debug;

const ALT_LOC_OFFSET: usize = 16;
const INSERTION_CODE_OFFSET: usize = 26;

/// Which optional label columns the `ATOM` records of a structure use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagScan {
    /// Some record has a non-blank alternate location indicator.
    pub uses_alt_loc: bool,
    /// Some record has a non-blank insertion code.
    pub uses_insertion_codes: bool,
}

impl FlagScan {
    fn is_complete(&self) -> bool {
        self.uses_alt_loc && self.uses_insertion_codes
    }
}

/// A flag column is set when it exists and holds something other than a space.
fn column_is_set(line: &[u8], offset: usize) -> bool {
    line.get(offset).is_some_and(|&b| b != b' ')
}

/// Scans the first model for alternate location and insertion code markers.
///
/// Only `ATOM` records are inspected, and scanning ends at `ENDMDL` or as soon as
/// both markers have been seen. Records too short to reach a column count as blank
/// there. Unlike the point reader, no other column is validated, and records need
/// not be valid UTF-8.
pub fn scan_flags(reader: &mut impl BufRead) -> io::Result<FlagScan> {
    let mut scan = FlagScan::default();
    let mut buf = Vec::new();

    while let Some(line) = read_record(reader, &mut buf)? {
        if line.starts_with(END_OF_MODEL_TAG.as_bytes()) {
            break;
        }
        if !line.starts_with(ATOM_RECORD_TAG.as_bytes()) {
            continue;
        }

        scan.uses_alt_loc |= column_is_set(line, ALT_LOC_OFFSET);
        scan.uses_insertion_codes |= column_is_set(line, INSERTION_CODE_OFFSET);
        if scan.is_complete() {
            break;
        }
    }

    debug!(
        alt_loc = scan.uses_alt_loc,
        insertion_codes = scan.uses_insertion_codes,
        "Flag scan finished."
    );
    Ok(scan)
}
