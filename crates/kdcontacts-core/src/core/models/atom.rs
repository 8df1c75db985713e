use nalgebra::Point3;

/// A single `ATOM` record taken from a fixed-column structure file.
///
/// Only [`position`](AtomRecord::position) takes part in the geometry. Every other
/// field is carried through verbatim so the contact table can echo the input
/// columns, including their padding.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The atom serial number (columns 7-11).
    pub serial: i64,
    /// The atom name exactly as written in columns 13-16 (e.g. `" CA "`).
    pub name: String,
    /// The alternate location indicator (column 17), `' '` when unused.
    pub alt_loc: char,
    /// The residue name (columns 18-20).
    pub residue_name: String,
    /// The chain identifier (column 22).
    pub chain_id: char,
    /// The residue sequence number (columns 23-26).
    pub residue_number: i64,
    /// The residue insertion code (column 27), `' '` when unused.
    pub insertion_code: char,
    /// The Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// The occupancy (columns 55-60), if the record carries one.
    pub occupancy: Option<f64>,
}

impl AtomRecord {
    /// Creates a record with blank labels at the given position.
    ///
    /// Mostly useful for building point sets by hand; readers fill in every field.
    pub fn new(serial: i64, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: String::from("    "),
            alt_loc: ' ',
            residue_name: String::from("   "),
            chain_id: ' ',
            residue_number: 0,
            insertion_code: ' ',
            position,
            occupancy: None,
        }
    }

    /// Returns the coordinate along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn coord(&self, axis: usize) -> f64 {
        self.position[axis]
    }

    /// Euclidean distance between two atoms.
    #[inline]
    pub fn distance_to(&self, other: &AtomRecord) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn uses_alt_loc(&self) -> bool {
        self.alt_loc != ' '
    }

    pub fn has_insertion_code(&self) -> bool {
        self.insertion_code != ' '
    }
}
