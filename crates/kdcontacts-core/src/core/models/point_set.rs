use super::atom::AtomRecord;
use super::bounds::BoundingBox;
use std::collections::TryReserveError;
use std::ops::Index;

/// The flat, insertion-ordered sequence of atoms that a tree is built over.
///
/// Atoms are appended once and never modified. The set keeps the bounding box of
/// all coordinates up to date as atoms arrive, so the root extent of a tree is
/// available without a second pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    atoms: Vec<AtomRecord>,
    bounds: Option<BoundingBox>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom and returns its index.
    pub fn push(&mut self, atom: AtomRecord) -> usize {
        self.extend_bounds(&atom);
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Appends an atom, reporting allocation failure instead of aborting.
    pub fn try_push(&mut self, atom: AtomRecord) -> Result<usize, TryReserveError> {
        self.atoms.try_reserve(1)?;
        Ok(self.push(atom))
    }

    fn extend_bounds(&mut self, atom: &AtomRecord) {
        match &mut self.bounds {
            Some(bounds) => bounds.expand_to(&atom.position),
            None => self.bounds = Some(BoundingBox::from_point(&atom.position)),
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The bounding box of every coordinate, or `None` while the set is empty.
    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.bounds.as_ref()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtomRecord> {
        self.atoms.iter()
    }
}

impl Index<usize> for PointSet {
    type Output = AtomRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

impl FromIterator<AtomRecord> for PointSet {
    fn from_iter<T: IntoIterator<Item = AtomRecord>>(iter: T) -> Self {
        let mut set = PointSet::new();
        for atom in iter {
            set.push(atom);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a AtomRecord;
    type IntoIter = std::slice::Iter<'a, AtomRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
