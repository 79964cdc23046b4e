//! Structured grids and the main-grid/LGR hierarchy

pub mod cell;
pub mod face;
pub mod hierarchy;
pub mod structured;

// Re-export main types
pub use cell::Cell;
pub use face::FaceType;
pub use hierarchy::GridHierarchy;
pub use structured::{Grid, GridKind, SubGridRange};
