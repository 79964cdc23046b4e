//! Structured-grid cell coordinates

use crate::core_types::UNDEFINED_INDEX;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate in a structured grid's index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ijk {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Ijk {
    /// Coordinate returned when a lookup walks off the grid.
    pub const UNDEFINED: Ijk = Ijk::new(UNDEFINED_INDEX, UNDEFINED_INDEX, UNDEFINED_INDEX);

    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Ijk { i, j, k }
    }

    /// True if any component is the undefined sentinel
    pub const fn is_undefined(&self) -> bool {
        self.i == UNDEFINED_INDEX || self.j == UNDEFINED_INDEX || self.k == UNDEFINED_INDEX
    }

    /// Component-wise strict upper bound check against grid dimensions.
    pub const fn is_within(&self, dimensions: Ijk) -> bool {
        self.i < dimensions.i && self.j < dimensions.j && self.k < dimensions.k
    }
}

impl From<(usize, usize, usize)> for Ijk {
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Ijk::new(i, j, k)
    }
}

impl fmt::Display for Ijk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "(undefined)")
        } else {
            write!(f, "({}, {}, {})", self.i, self.j, self.k)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_sentinel() {
        assert!(Ijk::UNDEFINED.is_undefined());
        assert!(!Ijk::new(0, 0, 0).is_undefined());
        assert!(Ijk::new(3, UNDEFINED_INDEX, 1).is_undefined());
    }

    #[test]
    fn test_is_within() {
        let dims = Ijk::new(2, 3, 4);
        assert!(Ijk::new(1, 2, 3).is_within(dims));
        assert!(!Ijk::new(2, 0, 0).is_within(dims));
        assert!(!Ijk::UNDEFINED.is_within(dims));
    }

    #[test]
    fn test_display() {
        assert_eq!(Ijk::new(1, 2, 3).to_string(), "(1, 2, 3)");
        assert_eq!(Ijk::UNDEFINED.to_string(), "(undefined)");
    }
}
