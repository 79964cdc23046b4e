//! Grid cell records

use serde::{Deserialize, Serialize};

/// One hexahedral cell of a structured grid.
///
/// Corners index into the owning grid's node pool in this order:
///
/// ```text
///     7---------6
///    /|        /|     |k
///   / |       / |     | /j
///  4---------5  |     |/
///  |  3------|--2     *---i
///  | /       | /
///  |/        |/
///  0---------1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    corner_indices: [usize; 8],
    /// Set when any well passes through this cell
    on_well_path: bool,
    /// Cell in the parent grid that this LGR cell refines
    host: Option<usize>,
    /// LGR that refines this cell, if any
    sub_grid: Option<usize>,
}

impl Cell {
    pub fn new(corner_indices: [usize; 8]) -> Self {
        Cell {
            corner_indices,
            on_well_path: false,
            host: None,
            sub_grid: None,
        }
    }

    pub fn corner_indices(&self) -> &[usize; 8] {
        &self.corner_indices
    }

    pub fn is_well_cell(&self) -> bool {
        self.on_well_path
    }

    pub fn set_well_cell(&mut self, is_well_cell: bool) {
        self.on_well_path = is_well_cell;
    }

    pub fn host_cell(&self) -> Option<usize> {
        self.host
    }

    pub fn set_host_cell(&mut self, host_cell: usize) {
        self.host = Some(host_cell);
    }

    pub fn sub_grid(&self) -> Option<usize> {
        self.sub_grid
    }

    pub fn set_sub_grid(&mut self, grid_index: usize) {
        self.sub_grid = Some(grid_index);
    }
}
