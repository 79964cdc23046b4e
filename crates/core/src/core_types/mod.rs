//! Core types and utilities

pub mod bounding_box;
pub mod cache;
pub mod ijk;
pub mod porosity;
pub mod vec3;

pub use bounding_box::{BoundingBox, CellRange};
pub use cache::CacheState;
pub use ijk::Ijk;
pub use porosity::PorosityModel;
pub use vec3::Vec3d;

/// Sentinel for an index that does not refer to any grid, cell, time step or result.
pub const UNDEFINED_INDEX: usize = usize::MAX;
