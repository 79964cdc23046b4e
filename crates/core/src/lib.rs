//! Reservoir Grid Core Library
//!
//! In-memory derivation layer over reservoir simulation grids: a structured
//! main grid with nested local grid refinements (LGRs), the raw activity
//! flags, well trajectories and scalar results that a reader has produced.
//!
//! From that data it derives what rendering and query code needs:
//! - Per porosity model (matrix/fracture) active-cell compaction and the
//!   index-space and world-space bounding boxes of the active cells
//! - The display offset that keeps large UTM coordinates precise on the GPU
//! - Which cells each well passes through, per grid, and which face two
//!   consecutive well cells share
//! - Scalar accessors that hide whether a result is stored per cell or per
//!   active cell
//!
//! No file formats are parsed here.

// Core types and utilities
pub mod core_types;
pub mod config;
pub mod error;

// Grid model and derived indices
pub mod active_cells;
pub mod case;
pub mod grid;
pub mod results;
pub mod wells;

// Re-export core types
pub use core_types::{BoundingBox, CacheState, CellRange, Ijk, PorosityModel, Vec3d, UNDEFINED_INDEX};
pub use config::CaseConfig;
pub use error::GridError;

// Re-export grid, well and result types
pub use active_cells::{ActiveCellBounds, ActiveCellIndex, ActiveCellInfo};
pub use case::ReservoirCase;
pub use grid::{Cell, FaceType, Grid, GridHierarchy, GridKind, SubGridRange};
pub use results::{CellScalarAccess, ResultStore, ScalarResult, StorageLayout};
pub use wells::{
    WellCellTopology, WellProductionType, WellResultBranch, WellResultCell, WellResultFrame,
    WellResults,
};
