use nalgebra::Point3;

/// How a node's extent relates to a query range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// The ranges are disjoint.
    Empty,
    /// The ranges overlap but the node is not wholly inside the query.
    Intersect,
    /// The node lies entirely inside the query.
    Contained,
}

impl Overlap {
    /// Classifies a node interval `[node_min, node_max]` against a query interval
    /// `[query_min, query_max]` on a single axis.
    ///
    /// Touching endpoints never count as disjoint, so a point lying exactly on a query
    /// boundary is always reachable.
    pub fn classify_interval(query_min: f64, query_max: f64, node_min: f64, node_max: f64) -> Self {
        if query_min <= node_min && query_max >= node_max {
            Overlap::Contained
        } else if query_max < node_min || query_min > node_max {
            Overlap::Empty
        } else {
            Overlap::Intersect
        }
    }

    /// Combines per-axis classifications: any `Empty` axis wins, and the result is
    /// `Contained` only when every axis is.
    pub fn combine(self, other: Overlap) -> Overlap {
        match (self, other) {
            (Overlap::Empty, _) | (_, Overlap::Empty) => Overlap::Empty,
            (Overlap::Contained, Overlap::Contained) => Overlap::Contained,
            _ => Overlap::Intersect,
        }
    }
}

/// An axis-aligned box described by its minimum and maximum corners.
///
/// Boxes built from points always satisfy `min[i] <= max[i]`. Query boxes built with
/// [`BoundingBox::around`] and a negative radius come out inverted; such a box
/// contains no point and never classifies a node as [`Overlap::Contained`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Creates a box from explicit corners, or `None` if `min` exceeds `max` on any axis.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Option<Self> {
        if (0..3).all(|axis| min[axis] <= max[axis]) {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// A degenerate box covering exactly one point.
    pub fn from_point(point: &Point3<f64>) -> Self {
        Self {
            min: *point,
            max: *point,
        }
    }

    /// The smallest box enclosing every point, or `None` for an empty iterator.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for point in iter {
            bounds.expand_to(point);
        }
        Some(bounds)
    }

    /// The cube `center ± radius` that inscribes a sphere of that radius.
    pub fn around(center: &Point3<f64>, radius: f64) -> Self {
        Self {
            min: center.map(|c| c - radius),
            max: center.map(|c| c + radius),
        }
    }

    /// Grows the box so that it also covers `point`.
    pub fn expand_to(&mut self, point: &Point3<f64>) {
        for axis in 0..3 {
            if point[axis] < self.min[axis] {
                self.min[axis] = point[axis];
            }
            if point[axis] > self.max[axis] {
                self.max[axis] = point[axis];
            }
        }
    }

    /// Copy of this box with the upper bound on `axis` replaced by `value`.
    pub fn with_max(&self, axis: usize, value: f64) -> Self {
        let mut clamped = *self;
        clamped.max[axis] = value;
        clamped
    }

    /// Copy of this box with the lower bound on `axis` replaced by `value`.
    pub fn with_min(&self, axis: usize, value: f64) -> Self {
        let mut clamped = *self;
        clamped.min[axis] = value;
        clamped
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Classifies this box (as a tree node's extent) against a query box.
    pub fn overlap(&self, query: &BoundingBox) -> Overlap {
        (0..3)
            .map(|axis| {
                Overlap::classify_interval(
                    query.min[axis],
                    query.max[axis],
                    self.min[axis],
                    self.max[axis],
                )
            })
            .fold(Overlap::Contained, Overlap::combine)
    }
}
