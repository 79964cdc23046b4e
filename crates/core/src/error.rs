//! Error type for grid, cell and result lookups
//!
//! Every variant describes an index or shape that disagrees with the loaded
//! grid data. None of them are transient: a caller receiving one should stop
//! processing the case rather than retry. "No value here" is not an error and
//! is reported as `None` by the scalar accessors instead.

use crate::core_types::Ijk;
use std::fmt;

/// Lookup and data-installation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Grid index is not below the grid count
    GridIndexOutOfRange { index: usize, grid_count: usize },
    /// Local cell index is not below the grid's cell count
    CellIndexOutOfRange {
        grid: usize,
        index: usize,
        cell_count: usize,
    },
    /// Global cell index is not below the hierarchy's total cell count
    GlobalCellIndexOutOfRange { index: usize, cell_count: usize },
    /// IJK coordinate outside the grid's dimensions (or undefined)
    IjkOutOfRange {
        grid: usize,
        ijk: Ijk,
        dimensions: Ijk,
    },
    /// Grid data supplied by a reader is structurally inconsistent
    InvalidGrid { name: String, reason: String },
    /// Array length does not match the cell count it is meant to cover
    ValueCountMismatch { expected: usize, actual: usize },
    /// Scalar result index not registered in the result store
    ResultIndexOutOfRange { index: usize, result_count: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::GridIndexOutOfRange { index, grid_count } => {
                write!(f, "Grid index {index} out of range (grid count {grid_count})")
            }
            GridError::CellIndexOutOfRange {
                grid,
                index,
                cell_count,
            } => write!(
                f,
                "Cell index {index} out of range in grid {grid} (cell count {cell_count})"
            ),
            GridError::GlobalCellIndexOutOfRange { index, cell_count } => write!(
                f,
                "Global cell index {index} out of range (total cell count {cell_count})"
            ),
            GridError::IjkOutOfRange {
                grid,
                ijk,
                dimensions,
            } => write!(
                f,
                "IJK {ijk} out of range in grid {grid} (dimensions {dimensions})"
            ),
            GridError::InvalidGrid { name, reason } => {
                write!(f, "Invalid grid '{name}': {reason}")
            }
            GridError::ValueCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} values, got {actual}")
            }
            GridError::ResultIndexOutOfRange {
                index,
                result_count,
            } => write!(
                f,
                "Result index {index} out of range (result count {result_count})"
            ),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_index() {
        let err = GridError::CellIndexOutOfRange {
            grid: 1,
            index: 40,
            cell_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "Cell index 40 out of range in grid 1 (cell count 8)"
        );

        let err = GridError::IjkOutOfRange {
            grid: 0,
            ijk: Ijk::UNDEFINED,
            dimensions: Ijk::new(2, 2, 2),
        };
        assert!(err.to_string().contains("(undefined)"));
    }
}
