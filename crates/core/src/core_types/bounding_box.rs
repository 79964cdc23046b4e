//! Axis-aligned bounds in world space and in cell index space

use crate::core_types::{Ijk, Vec3d, UNDEFINED_INDEX};
use serde::{Deserialize, Serialize};

/// Axis-aligned world-space bounding box.
///
/// A freshly created box is empty (invalid) until a point is added. Callers
/// that hand geometry to a renderer should resolve an empty box with
/// [`BoundingBox::or_origin`] so an uninitialized box never leaks out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Vec3d,
    max: Vec3d,
}

impl BoundingBox {
    /// Empty box that any added point will replace
    pub fn empty() -> Self {
        BoundingBox {
            min: Vec3d::repeat(f64::INFINITY),
            max: Vec3d::repeat(f64::NEG_INFINITY),
        }
    }

    /// Degenerate box covering only the origin
    pub fn origin() -> Self {
        BoundingBox {
            min: Vec3d::zeros(),
            max: Vec3d::zeros(),
        }
    }

    /// Box spanning two corners (in any order)
    pub fn from_corners(a: &Vec3d, b: &Vec3d) -> Self {
        BoundingBox {
            min: a.inf(b),
            max: a.sup(b),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Grow the box to include `point`
    pub fn add(&mut self, point: &Vec3d) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow the box to include another box; empty boxes are ignored
    pub fn add_box(&mut self, other: &BoundingBox) {
        if other.is_valid() {
            self.add(&other.min);
            self.add(&other.max);
        }
    }

    /// Union of two boxes (used as a parallel reduction)
    #[must_use]
    pub fn merged(mut self, other: BoundingBox) -> Self {
        self.add_box(&other);
        self
    }

    /// Resolve an empty box to the origin sentinel
    #[must_use]
    pub fn or_origin(self) -> Self {
        if self.is_valid() {
            self
        } else {
            BoundingBox::origin()
        }
    }

    pub fn min(&self) -> Vec3d {
        self.min
    }

    pub fn max(&self) -> Vec3d {
        self.max
    }

    pub fn extent(&self) -> Vec3d {
        if self.is_valid() {
            self.max - self.min
        } else {
            Vec3d::zeros()
        }
    }

    pub fn center(&self) -> Vec3d {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: &Vec3d) -> bool {
        self.is_valid()
            && (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// True if `other` lies entirely inside this box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        !other.is_valid() || (self.contains(&other.min) && self.contains(&other.max))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::empty()
    }
}

/// Inclusive min/max range of cell coordinates in IJK space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    min: Ijk,
    max: Ijk,
}

impl CellRange {
    /// Empty range: min at the undefined sentinel, max at zero
    pub const fn empty() -> Self {
        CellRange {
            min: Ijk::new(UNDEFINED_INDEX, UNDEFINED_INDEX, UNDEFINED_INDEX),
            max: Ijk::new(0, 0, 0),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.i <= self.max.i && self.min.j <= self.max.j && self.min.k <= self.max.k
    }

    pub fn add(&mut self, ijk: Ijk) {
        self.min.i = self.min.i.min(ijk.i);
        self.min.j = self.min.j.min(ijk.j);
        self.min.k = self.min.k.min(ijk.k);
        self.max.i = self.max.i.max(ijk.i);
        self.max.j = self.max.j.max(ijk.j);
        self.max.k = self.max.k.max(ijk.k);
    }

    pub fn add_range(&mut self, other: &CellRange) {
        if other.is_valid() {
            self.add(other.min);
            self.add(other.max);
        }
    }

    pub fn min(&self) -> Ijk {
        self.min
    }

    pub fn max(&self) -> Ijk {
        self.max
    }

    pub fn contains(&self, ijk: Ijk) -> bool {
        self.is_valid()
            && (self.min.i..=self.max.i).contains(&ijk.i)
            && (self.min.j..=self.max.j).contains(&ijk.j)
            && (self.min.k..=self.max.k).contains(&ijk.k)
    }
}

impl Default for CellRange {
    fn default() -> Self {
        CellRange::empty()
    }
}
