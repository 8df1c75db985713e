use crate::core::models::atom::AtomRecord;
use crate::core::models::contact::Contact;
use crate::core::models::point_set::PointSet;
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::io::Write;

/// Column names of the contact table, first atom then second atom then distance.
pub const CONTACT_TABLE_HEADER: [&str; 13] = [
    "#resna1",
    "resno1",
    "inscode1",
    "chain_id1",
    "atomno1",
    "atomna1",
    "resna2",
    "resno2",
    "inscode2",
    "chain_id2",
    "atomno2",
    "atomna2",
    "distance",
];

/// Writes contacts as a tab-separated table.
///
/// Label fields are written exactly as they were read, padding included, and are
/// never quoted. Distances carry six fractional digits.
pub struct ContactTableWriter<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl<W: Write> ContactTableWriter<W> {
    /// Wraps `inner` and writes the header row.
    pub fn new(inner: W) -> Result<Self, csv::Error> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(CONTACT_TABLE_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_contact(&mut self, points: &PointSet, contact: &Contact) -> Result<(), csv::Error> {
        let mut record = Vec::with_capacity(CONTACT_TABLE_HEADER.len());
        push_atom_fields(&mut record, &points[contact.query]);
        push_atom_fields(&mut record, &points[contact.target]);
        record.push(format!("{:.6}", contact.distance));
        self.writer.write_record(&record)?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_all<'a, I>(&mut self, points: &PointSet, contacts: I) -> Result<(), csv::Error>
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        for contact in contacts {
            self.write_contact(points, contact)?;
        }
        Ok(())
    }

    /// Data rows written so far (the header is not counted).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

fn push_atom_fields(record: &mut Vec<String>, atom: &AtomRecord) {
    record.push(atom.residue_name.clone());
    record.push(atom.residue_number.to_string());
    record.push(atom.insertion_code.to_string());
    record.push(atom.chain_id.to_string());
    record.push(atom.serial.to_string());
    record.push(atom.name.clone());
}
