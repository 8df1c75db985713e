use super::SpatialError;
use super::median::median_quick_select;
use crate::core::models::bounds::BoundingBox;
use crate::core::models::point_set::PointSet;
use tracing::{debug, instrument};

/// Number of coordinate axes; the splitting axis cycles through them with depth.
pub const DIMENSIONS: usize = 3;

/// A node of the k-d tree.
///
/// Every point index of the source set lives in exactly one leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum KdNode {
    /// One or more points. A leaf holds several points only when their coordinates
    /// tied on the splitting axis at the depth where the leaf was created.
    Leaf { points: Vec<usize> },
    /// An internal node. `left` holds the points whose `axis` coordinate is `<= value`,
    /// `right` those strictly greater.
    Split {
        axis: usize,
        value: f64,
        /// The root extent clipped by every ancestor's split.
        bounds: BoundingBox,
        left: Box<KdNode>,
        right: Box<KdNode>,
    },
}

impl KdNode {
    /// Calls `visit` for every point stored in this subtree, left before right.
    pub fn for_each_point<F: FnMut(usize)>(&self, mut visit: F) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                KdNode::Leaf { points } => points.iter().copied().for_each(&mut visit),
                KdNode::Split { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
            }
        }
    }

    fn height(&self) -> usize {
        match self {
            KdNode::Leaf { .. } => 1,
            KdNode::Split { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a [usize]>) {
        match self {
            KdNode::Leaf { points } => out.push(points),
            KdNode::Split { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

/// A static three-dimensional k-d tree over the indices of a [`PointSet`].
///
/// The tree is immutable once built. It borrows nothing from the point set, but its
/// indices are only meaningful for the set it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct KdTree {
    root: Option<KdNode>,
    len: usize,
}

impl KdTree {
    /// Builds a tree over every point of `points`.
    ///
    /// The root extent is the bounding box of the whole set. An empty set yields an
    /// empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::Allocation`] if index buffers cannot be allocated.
    #[instrument(skip_all, name = "kdtree_build", fields(points = points.len()))]
    pub fn build(points: &PointSet) -> Result<Self, SpatialError> {
        let Some(bounds) = points.bounds().copied() else {
            debug!("Point set is empty; built an empty tree.");
            return Ok(Self { root: None, len: 0 });
        };

        let mut indices = Vec::new();
        indices
            .try_reserve_exact(points.len())
            .map_err(|source| SpatialError::Allocation {
                what: "point indices",
                source,
            })?;
        indices.extend(0..points.len());

        let builder = TreeBuilder { points };
        let root = builder.build_node(indices, 0, bounds)?;
        let tree = Self {
            root: Some(root),
            len: points.len(),
        };
        debug!(height = tree.height(), "k-d tree built.");
        Ok(tree)
    }

    pub fn root(&self) -> Option<&KdNode> {
        self.root.as_ref()
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty tree).
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, KdNode::height)
    }

    /// The point sets of all leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&[usize]> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_leaves(&mut out);
        }
        out
    }
}

struct Partition {
    value: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

struct TreeBuilder<'a> {
    points: &'a PointSet,
}

impl TreeBuilder<'_> {
    fn build_node(
        &self,
        indices: Vec<usize>,
        depth: usize,
        bounds: BoundingBox,
    ) -> Result<KdNode, SpatialError> {
        if indices.len() <= 1 {
            return Ok(KdNode::Leaf { points: indices });
        }

        let axis = depth % DIMENSIONS;
        let Some(Partition { value, left, right }) = self.partition(&indices, axis)? else {
            return Ok(KdNode::Leaf { points: indices });
        };
        drop(indices);

        // Every coordinate tied at or below the median: no split can separate them.
        if right.is_empty() {
            return Ok(KdNode::Leaf { points: left });
        }

        let left_bounds = bounds.with_max(axis, value);
        let right_bounds = bounds.with_min(axis, value);
        let left = self.build_node(left, depth + 1, left_bounds)?;
        let right = self.build_node(right, depth + 1, right_bounds)?;

        Ok(KdNode::Split {
            axis,
            value,
            bounds,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn partition(&self, indices: &[usize], axis: usize) -> Result<Option<Partition>, SpatialError> {
        let mut coords = Vec::new();
        coords
            .try_reserve_exact(indices.len())
            .map_err(|source| SpatialError::Allocation {
                what: "split coordinates",
                source,
            })?;
        coords.extend(indices.iter().map(|&i| self.points[i].coord(axis)));

        let Some(value) = median_quick_select(&mut coords) else {
            return Ok(None);
        };

        let mut left = Vec::new();
        let mut right = Vec::new();
        let half = indices.len() / 2 + 1;
        left.try_reserve(half)
            .and_then(|_| right.try_reserve(half))
            .map_err(|source| SpatialError::Allocation {
                what: "partition sets",
                source,
            })?;

        for &index in indices {
            if self.points[index].coord(axis) <= value {
                left.push(index);
            } else {
                right.push(index);
            }
        }

        Ok(Some(Partition { value, left, right }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use nalgebra::Point3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn point_set(coords: &[[f64; 3]]) -> PointSet {
        coords
            .iter()
            .enumerate()
            .map(|(i, c)| AtomRecord::new(i as i64 + 1, Point3::new(c[0], c[1], c[2])))
            .collect()
    }

    fn random_point_set(rng: &mut StdRng, len: usize) -> PointSet {
        (0..len)
            .map(|i| {
                let p = Point3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                AtomRecord::new(i as i64, p)
            })
            .collect()
    }

    fn sorted_leaf_indices(tree: &KdTree) -> Vec<usize> {
        let mut all: Vec<usize> = tree.leaves().into_iter().flatten().copied().collect();
        all.sort_unstable();
        all
    }

    fn assert_bounds_hold_points(node: &KdNode, points: &PointSet) {
        if let KdNode::Split {
            axis,
            value,
            bounds,
            left,
            right,
        } = node
        {
            node.for_each_point(|i| assert!(bounds.contains(&points[i].position)));
            left.for_each_point(|i| assert!(points[i].coord(*axis) <= *value));
            right.for_each_point(|i| assert!(points[i].coord(*axis) > *value));
            assert_bounds_hold_points(left, points);
            assert_bounds_hold_points(right, points);
        }
    }

    #[test]
    fn empty_set_builds_empty_tree() {
        let tree = KdTree::build(&PointSet::new()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.height(), 0);
        assert!(tree.leaves().is_empty());
    }

    #[test]
    fn single_point_builds_single_leaf() {
        let tree = KdTree::build(&point_set(&[[1.0, 2.0, 3.0]])).unwrap();
        assert_eq!(tree.root(), Some(&KdNode::Leaf { points: vec![0] }));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn root_splits_on_x_median_with_full_extent() {
        let points = point_set(&[[0.0, 0.0, 0.0], [3.0, 1.0, 0.0], [10.0, -1.0, 2.0]]);
        let tree = KdTree::build(&points).unwrap();
        match tree.root().unwrap() {
            KdNode::Split {
                axis, value, bounds, ..
            } => {
                assert_eq!(*axis, 0);
                assert_eq!(*value, 3.0);
                assert_eq!(bounds, points.bounds().unwrap());
            }
            leaf => panic!("expected a split at the root, got {:?}", leaf),
        }
    }

    #[test]
    fn axis_cycles_with_depth_and_children_clip_the_box() {
        let points = point_set(&[
            [0.0, 0.0, 0.0],
            [1.0, 5.0, 0.0],
            [2.0, 1.0, 0.0],
            [3.0, 6.0, 0.0],
        ]);
        let tree = KdTree::build(&points).unwrap();
        let KdNode::Split { left, value, .. } = tree.root().unwrap() else {
            panic!("root should split");
        };
        assert_eq!(*value, 1.0);
        let KdNode::Split {
            axis: child_axis,
            bounds: child_bounds,
            ..
        } = left.as_ref()
        else {
            panic!("left child should split");
        };
        assert_eq!(*child_axis, 1);
        assert_eq!(child_bounds.max.x, 1.0);
        assert_eq!(child_bounds.min.x, 0.0);
    }

    #[test]
    fn coincident_points_collapse_into_one_leaf() {
        let points = point_set(&[[1.0, 1.0, 1.0]; 6]);
        let tree = KdTree::build(&points).unwrap();
        let KdNode::Leaf { points: leaf } = tree.root().unwrap() else {
            panic!("coincident points must not be split");
        };
        assert_eq!(leaf.len(), 6);
        assert_eq!(sorted_leaf_indices(&tree), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn ties_on_the_split_axis_stop_recursion() {
        let points = point_set(&[[0.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 9.0, 1.0]]);
        let tree = KdTree::build(&points).unwrap();
        assert!(matches!(tree.root(), Some(KdNode::Leaf { .. })));
        assert_eq!(tree.leaves()[0].len(), 3);
    }

    #[test]
    fn leaves_partition_every_index_exactly_once() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [2, 3, 7, 64, 200] {
            let points = random_point_set(&mut rng, len);
            let tree = KdTree::build(&points).unwrap();
            assert_eq!(sorted_leaf_indices(&tree), (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn leaves_partition_with_heavy_duplication() {
        let mut rng = StdRng::seed_from_u64(7);
        let coords: Vec<[f64; 3]> = (0..150)
            .map(|_| {
                [
                    rng.gen_range(0..3) as f64,
                    rng.gen_range(0..2) as f64,
                    rng.gen_range(0..3) as f64,
                ]
            })
            .collect();
        let points = point_set(&coords);
        let tree = KdTree::build(&points).unwrap();
        assert_eq!(sorted_leaf_indices(&tree), (0..150).collect::<Vec<_>>());
        assert_bounds_hold_points(tree.root().unwrap(), &points);
    }

    #[test]
    fn node_boxes_enclose_their_points() {
        let mut rng = StdRng::seed_from_u64(99);
        let points = random_point_set(&mut rng, 120);
        let tree = KdTree::build(&points).unwrap();
        assert_bounds_hold_points(tree.root().unwrap(), &points);
    }

    #[test]
    fn distinct_points_give_a_balanced_tree() {
        // Each axis holds a permutation of 0..1024, so every split halves its set.
        let points: PointSet = (0..1024_i64)
            .map(|i| {
                let y = (i * 7919) % 1024;
                let z = (i * 389) % 1024;
                AtomRecord::new(i, Point3::new(i as f64, y as f64, z as f64))
            })
            .collect();
        let tree = KdTree::build(&points).unwrap();
        assert_eq!(tree.leaves().len(), 1024);
        assert!(tree.height() <= 11, "height {} too large", tree.height());
    }
}
