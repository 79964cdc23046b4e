//! Porosity models: the two parallel views of a dual-porosity grid

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two porosity views of the same grid.
///
/// Each model has its own active-cell set and its own scalar results;
/// the two are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PorosityModel {
    /// Primary rock porosity
    Matrix,
    /// Secondary fracture-network porosity
    Fracture,
}

impl PorosityModel {
    /// Both models, matrix first
    pub const ALL: [PorosityModel; 2] = [PorosityModel::Matrix, PorosityModel::Fracture];
}

impl fmt::Display for PorosityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PorosityModel::Matrix => write!(f, "matrix"),
            PorosityModel::Fracture => write!(f, "fracture"),
        }
    }
}
