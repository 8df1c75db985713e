use super::read_record;
use crate::core::io::traits::{MalformedPolicy, StructureFile};
use crate::core::models::atom::AtomRecord;
use crate::core::models::point_set::PointSet;
use nalgebra::Point3;
use std::collections::TryReserveError;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Record tag of the lines that contribute points.
pub const ATOM_RECORD_TAG: &str = "ATOM";
/// Record tag that ends the first model; nothing after it is read.
pub const END_OF_MODEL_TAG: &str = "ENDMDL";

/// Shortest accepted `ATOM` line: everything up to and including the z coordinate.
const MIN_ATOM_LINE_LEN: usize = 54;

const SERIAL: Column = Column::new(6, 5);
const ATOM_NAME: Column = Column::new(12, 4);
const ALT_LOC: Column = Column::new(16, 1);
const RESIDUE_NAME: Column = Column::new(17, 3);
const CHAIN_ID: Column = Column::new(21, 1);
const RESIDUE_NUMBER: Column = Column::new(22, 4);
const INSERTION_CODE: Column = Column::new(26, 1);
const COORDS: [Column; 3] = [Column::new(30, 8), Column::new(38, 8), Column::new(46, 8)];
const OCCUPANCY: Column = Column::new(54, 6);

/// A fixed-width field, addressed by 0-based offset and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    start: usize,
    width: usize,
}

impl Column {
    const fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    fn end(&self) -> usize {
        self.start + self.width
    }

    /// 1-based inclusive column range, as written in format documentation.
    fn label(&self) -> String {
        format!("{}-{}", self.start + 1, self.end())
    }

    fn slice<'a>(&self, line: &'a str) -> Result<&'a str, PdbParseErrorKind> {
        line.get(self.start..self.end())
            .ok_or_else(|| PdbParseErrorKind::InvalidText {
                columns: self.label(),
            })
    }

    fn char(&self, line: &str) -> Result<char, PdbParseErrorKind> {
        Ok(self.slice(line)?.chars().next().unwrap_or(' '))
    }

    fn int(&self, line: &str) -> Result<i64, PdbParseErrorKind> {
        let raw = self.slice(line)?.trim();
        raw.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
            columns: self.label(),
            value: raw.into(),
        })
    }

    fn float(&self, line: &str) -> Result<f64, PdbParseErrorKind> {
        let raw = self.slice(line)?.trim();
        let value: f64 = raw.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
            columns: self.label(),
            value: raw.into(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PdbParseErrorKind::NonFiniteValue {
                columns: self.label(),
                value: raw.into(),
            })
        }
    }
}

/// Counts gathered while reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbReport {
    /// Lines consumed, including the terminating `ENDMDL` if any.
    pub lines_read: usize,
    /// `ATOM` records turned into points.
    pub atoms: usize,
    /// Malformed `ATOM` records left out under [`MalformedPolicy::Skip`].
    pub skipped: usize,
    /// Whether reading stopped at an `ENDMDL` record.
    pub stopped_at_end_of_model: bool,
    /// Points carrying an alternate location indicator. Every conformer is kept.
    pub alt_loc_atoms: usize,
    /// Points carrying a residue insertion code.
    pub insertion_code_atoms: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed ATOM record on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Out of memory while storing atoms: {0}")]
    Allocation(#[from] TryReserveError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Line is too short for an ATOM record ({length} chars, need at least 54)")]
    LineTooShort { length: usize },
    #[error("Columns {columns} do not hold plain ASCII text")]
    InvalidText { columns: String },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Non-finite number in columns {columns} (value: '{value}')")]
    NonFiniteValue { columns: String, value: String },
}

/// Decodes a raw `ATOM` record, pointing at the first byte that is not valid UTF-8.
fn decode_record(record: &[u8]) -> Result<&str, PdbParseErrorKind> {
    std::str::from_utf8(record).map_err(|e| PdbParseErrorKind::InvalidText {
        columns: Column::new(e.valid_up_to(), 1).label(),
    })
}

/// Parses the contact-relevant columns of a single `ATOM` line.
pub fn parse_atom_line(line: &str) -> Result<AtomRecord, PdbParseErrorKind> {
    if line.len() < MIN_ATOM_LINE_LEN {
        return Err(PdbParseErrorKind::LineTooShort { length: line.len() });
    }

    let serial = SERIAL.int(line)?;
    let name = ATOM_NAME.slice(line)?.to_string();
    let alt_loc = ALT_LOC.char(line)?;
    let residue_name = RESIDUE_NAME.slice(line)?.to_string();
    let chain_id = CHAIN_ID.char(line)?;
    let residue_number = RESIDUE_NUMBER.int(line)?;
    let insertion_code = INSERTION_CODE.char(line)?;
    let [x, y, z] = [
        COORDS[0].float(line)?,
        COORDS[1].float(line)?,
        COORDS[2].float(line)?,
    ];

    // Occupancy is optional and may be cut short by a truncated line.
    let occupancy_end = line.len().min(OCCUPANCY.end());
    let occupancy = match line.get(OCCUPANCY.start..occupancy_end).map(str::trim) {
        Some("") | None => None,
        Some(_) => {
            let present = Column::new(OCCUPANCY.start, occupancy_end - OCCUPANCY.start);
            Some(present.float(line)?)
        }
    };

    Ok(AtomRecord {
        serial,
        name,
        alt_loc,
        residue_name,
        chain_id,
        residue_number,
        insertion_code,
        position: Point3::new(x, y, z),
        occupancy,
    })
}

/// Reader for the `ATOM` records of the first model of a PDB file.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Report = PdbReport;
    type Error = PdbError;

    #[instrument(skip_all, name = "pdb_read")]
    fn read_from(
        reader: &mut impl BufRead,
        policy: MalformedPolicy,
    ) -> Result<(PointSet, Self::Report), Self::Error> {
        let mut points = PointSet::new();
        let mut report = PdbReport::default();
        let mut buf = Vec::new();

        while let Some(record) = read_record(reader, &mut buf)? {
            report.lines_read += 1;
            let line_num = report.lines_read;

            if record.starts_with(END_OF_MODEL_TAG.as_bytes()) {
                debug!(line = line_num, "Reached end of first model.");
                report.stopped_at_end_of_model = true;
                break;
            }
            if !record.starts_with(ATOM_RECORD_TAG.as_bytes()) {
                continue;
            }

            match decode_record(record).and_then(parse_atom_line) {
                Ok(atom) => {
                    report.alt_loc_atoms += usize::from(atom.uses_alt_loc());
                    report.insertion_code_atoms += usize::from(atom.has_insertion_code());
                    points.try_push(atom)?;
                    report.atoms += 1;
                }
                Err(kind) => match policy {
                    MalformedPolicy::Abort => {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind,
                        });
                    }
                    MalformedPolicy::Skip => {
                        warn!(line = line_num, "Skipping malformed ATOM record: {}", kind);
                        report.skipped += 1;
                    }
                },
            }
        }

        debug!(
            atoms = report.atoms,
            skipped = report.skipped,
            lines = report.lines_read,
            "Finished reading ATOM records."
        );
        Ok((points, report))
    }
}
