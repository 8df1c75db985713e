//! Reading `ATOM` records and writing contact tables.
//!
//! The reader is deliberately narrow: it extracts the fixed columns the contact search
//! needs and rejects records it cannot parse instead of guessing. The writer emits the
//! tab-separated contact table.

pub mod contacts;
pub mod pdb;
pub mod scan;
pub mod traits;

use std::io::{self, BufRead};

/// Reads the next line into `buf` as raw bytes, without its `\n` or `\r\n` terminator.
///
/// Returns `None` at end of input. Lines are not decoded, so bytes that are not valid
/// UTF-8 only matter to callers that look at them.
pub(crate) fn read_record<'b>(
    reader: &mut impl BufRead,
    buf: &'b mut Vec<u8>,
) -> io::Result<Option<&'b [u8]>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let mut line = buf.as_slice();
    if let Some(rest) = line.strip_suffix(b"\n") {
        line = rest;
    }
    if let Some(rest) = line.strip_suffix(b"\r") {
        line = rest;
    }
    Ok(Some(line))
}
