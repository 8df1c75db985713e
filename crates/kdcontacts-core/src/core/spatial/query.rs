use super::kdtree::{KdNode, KdTree};
use crate::core::models::bounds::{BoundingBox, Overlap};

impl KdTree {
    /// Calls `visit` with the index of every point that may lie inside `range`.
    ///
    /// No point inside `range` is ever missed. Points outside it can be visited as
    /// well, because leaves are reported without a per-point box test; callers filter
    /// candidates with their own exact criterion.
    ///
    /// Subtrees whose box is disjoint from `range` are pruned, and subtrees whose box
    /// lies wholly inside `range` are reported without further tests.
    pub fn for_each_in_range<F: FnMut(usize)>(&self, range: &BoundingBox, mut visit: F) {
        let Some(root) = self.root() else {
            return;
        };

        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            match node {
                KdNode::Leaf { points } => points.iter().copied().for_each(&mut visit),
                KdNode::Split {
                    axis,
                    value,
                    bounds,
                    left,
                    right,
                } => match bounds.overlap(range) {
                    Overlap::Contained => node.for_each_point(&mut visit),
                    Overlap::Intersect => {
                        if *value < range.min[*axis] {
                            pending.push(right);
                        } else if *value > range.max[*axis] {
                            pending.push(left);
                        } else {
                            // Right subtree is visited first.
                            pending.push(left);
                            pending.push(right);
                        }
                    }
                    Overlap::Empty => {}
                },
            }
        }
    }

    /// Collects the candidates of [`for_each_in_range`](Self::for_each_in_range).
    pub fn query(&self, range: &BoundingBox) -> Vec<usize> {
        let mut found = Vec::new();
        self.for_each_in_range(range, |index| found.push(index));
        found
    }
}

#[cfg(test)]
mod tests {
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::bounds::BoundingBox;
    use crate::core::models::point_set::PointSet;
    use crate::core::spatial::kdtree::KdTree;
    use nalgebra::Point3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn point_set(coords: &[[f64; 3]]) -> PointSet {
        coords
            .iter()
            .enumerate()
            .map(|(i, c)| AtomRecord::new(i as i64, Point3::new(c[0], c[1], c[2])))
            .collect()
    }

    fn in_box(points: &PointSet, range: &BoundingBox) -> HashSet<usize> {
        (0..points.len())
            .filter(|&i| range.contains(&points[i].position))
            .collect()
    }

    fn candidates_in_box(tree: &KdTree, points: &PointSet, range: &BoundingBox) -> HashSet<usize> {
        tree.query(range)
            .into_iter()
            .filter(|&i| range.contains(&points[i].position))
            .collect()
    }

    #[test]
    fn empty_tree_returns_nothing() {
        let tree = KdTree::build(&PointSet::new()).unwrap();
        let range = BoundingBox::around(&Point3::origin(), 100.0);
        assert!(tree.query(&range).is_empty());
    }

    #[test]
    fn box_enclosing_everything_returns_every_point_once() {
        let points = point_set(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [10.0, 0.0, 0.0], [4.0, 4.0, 4.0]]);
        let tree = KdTree::build(&points).unwrap();
        let mut found = tree.query(&BoundingBox::around(&Point3::new(5.0, 2.0, 2.0), 50.0));
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2, 3]);
    }

    #[test]
    fn distant_subtrees_are_pruned() {
        let coords: Vec<[f64; 3]> = (0..64).map(|i| [i as f64; 3]).collect();
        let points = point_set(&coords);
        let tree = KdTree::build(&points).unwrap();
        let found = tree.query(&BoundingBox::around(&Point3::new(0.0, 0.0, 0.0), 1.0));
        assert!(found.contains(&0));
        assert!(found.contains(&1));
        assert!(found.len() < 8, "query visited {} points", found.len());
    }

    #[test]
    fn points_on_the_query_boundary_are_found() {
        let points = point_set(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 2.0], [-2.0, 0.0, 0.0]]);
        let tree = KdTree::build(&points).unwrap();
        let range = BoundingBox::around(&Point3::origin(), 2.0);
        assert_eq!(candidates_in_box(&tree, &points, &range), HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn leaf_candidates_may_fall_outside_the_box() {
        let points = point_set(&[[0.0, 0.0, 0.0], [0.0, 50.0, 0.0]]);
        let tree = KdTree::build(&points).unwrap();
        let found = tree.query(&BoundingBox::around(&Point3::origin(), 1.0));
        assert!(found.contains(&0));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn inverted_box_yields_no_point_inside_it() {
        let points = point_set(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 0.5, 0.0]]);
        let tree = KdTree::build(&points).unwrap();
        let range = BoundingBox::around(&Point3::new(1.0, 1.0, 1.0), -0.5);
        assert!(candidates_in_box(&tree, &points, &range).is_empty());
    }

    #[test]
    fn matches_brute_force_on_random_boxes() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..40 {
            let len = rng.gen_range(1..=200);
            let coords: Vec<[f64; 3]> = (0..len)
                .map(|_| {
                    [
                        (rng.gen_range(-20.0..20.0_f64) * 2.0).round() / 2.0,
                        (rng.gen_range(-20.0..20.0_f64) * 2.0).round() / 2.0,
                        (rng.gen_range(-20.0..20.0_f64) * 2.0).round() / 2.0,
                    ]
                })
                .collect();
            let points = point_set(&coords);
            let tree = KdTree::build(&points).unwrap();

            for _ in 0..20 {
                let center = Point3::new(
                    rng.gen_range(-25.0..25.0),
                    rng.gen_range(-25.0..25.0),
                    rng.gen_range(-25.0..25.0),
                );
                let range = BoundingBox::around(&center, rng.gen_range(0.0..12.0));
                assert_eq!(
                    candidates_in_box(&tree, &points, &range),
                    in_box(&points, &range)
                );
            }
        }
    }

    #[test]
    fn query_never_reports_an_index_twice() {
        let mut rng = StdRng::seed_from_u64(11);
        let coords: Vec<[f64; 3]> = (0..150)
            .map(|_| [rng.gen_range(0..4) as f64, rng.gen_range(0..4) as f64, 0.0])
            .collect();
        let points = point_set(&coords);
        let tree = KdTree::build(&points).unwrap();
        let found = tree.query(&BoundingBox::around(&Point3::new(1.5, 1.5, 0.0), 1.0));
        let unique: HashSet<_> = found.iter().copied().collect();
        assert_eq!(unique.len(), found.len());
    }
}
