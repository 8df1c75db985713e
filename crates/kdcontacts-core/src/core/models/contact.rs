/// An ordered pair of atoms closer than the search radius.
///
/// Both indices refer to the [`PointSet`](super::point_set::PointSet) the search ran
/// over. Contacts are directed: the pair is reported once from each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the atom whose neighbourhood was searched.
    pub query: usize,
    /// Index of the neighbour found.
    pub target: usize,
    /// Euclidean distance between the two atoms in Angstroms.
    pub distance: f64,
}
