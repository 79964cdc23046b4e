//! A single structured grid: the main grid or one local grid refinement (LGR)
//!
//! Cells are stored in I-fastest order: `index = i + j * ni + k * ni * nj`.

use crate::core_types::{Ijk, Vec3d};
use crate::error::GridError;
use crate::grid::{Cell, FaceType};
use serde::{Deserialize, Serialize};

/// Inclusive cell range of the parent grid refined by an LGR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGridRange {
    /// Index of the refined grid (usually the main grid)
    pub parent_grid: usize,
    pub min: Ijk,
    pub max: Ijk,
}

impl SubGridRange {
    pub fn contains(&self, ijk: Ijk) -> bool {
        (self.min.i..=self.max.i).contains(&ijk.i)
            && (self.min.j..=self.max.j).contains(&ijk.j)
            && (self.min.k..=self.max.k).contains(&ijk.k)
    }
}

/// Main grid or LGR; both share the same cell/extent representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridKind {
    Main,
    Sub(SubGridRange),
}

/// Structured grid with its own cells and corner-node pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Position in the hierarchy (0 = main grid), assigned on registration
    index: usize,
    name: String,
    kind: GridKind,
    /// Cell counts along I, J and K
    dimensions: Ijk,
    cells: Vec<Cell>,
    /// Corner-node positions; empty when geometry has not been loaded
    nodes: Vec<Vec3d>,
    /// Global index of this grid's first cell
    global_cell_offset: usize,
}

impl Grid {
    /// Create a grid from reader-supplied cells and node positions.
    ///
    /// An empty node pool is accepted (geometry not loaded); otherwise every
    /// corner index must point into it.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidGrid` if any dimension is zero, the cell
    /// count does not match the dimensions, or a corner index is outside the
    /// node pool.
    pub fn new(
        name: impl Into<String>,
        kind: GridKind,
        dimensions: Ijk,
        cells: Vec<Cell>,
        nodes: Vec<Vec3d>,
    ) -> Result<Self, GridError> {
        let name = name.into();
        let invalid = |name: String, reason: String| Err(GridError::InvalidGrid { name, reason });

        let expected = checked_cell_count(&name, dimensions)?;
        if cells.len() != expected {
            return invalid(
                name,
                format!(
                    "expected {expected} cells for dimensions {dimensions}, got {}",
                    cells.len()
                ),
            );
        }

        if !nodes.is_empty() {
            let bad_corner = cells.iter().enumerate().find_map(|(cell_index, cell)| {
                cell.corner_indices()
                    .iter()
                    .find(|&&node| node >= nodes.len())
                    .map(|&node| (cell_index, node))
            });
            if let Some((cell_index, node)) = bad_corner {
                return invalid(
                    name,
                    format!(
                        "cell {cell_index} references node {node}, node pool holds {}",
                        nodes.len()
                    ),
                );
            }
        }

        Ok(Grid {
            index: 0,
            name,
            kind,
            dimensions,
            cells,
            nodes,
            global_cell_offset: 0,
        })
    }

    /// Create an axis-aligned box grid with uniform cell size.
    ///
    /// Neighbouring cells share corner nodes.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidGrid` if any dimension is zero or the cell
    /// or node count overflows.
    pub fn cartesian(
        name: impl Into<String>,
        kind: GridKind,
        dimensions: Ijk,
        origin: Vec3d,
        cell_size: Vec3d,
    ) -> Result<Self, GridError> {
        let name = name.into();
        let cell_count = checked_cell_count(&name, dimensions)?;
        let Ijk { i: ni, j: nj, k: nk } = dimensions;
        let node_dimensions = Ijk::new(ni.saturating_add(1), nj.saturating_add(1), nk.saturating_add(1));
        let node_count = checked_cell_count(&name, node_dimensions)?;
        let node_index = |i: usize, j: usize, k: usize| i + j * (ni + 1) + k * (ni + 1) * (nj + 1);

        let mut nodes = Vec::with_capacity(node_count);
        for k in 0..=nk {
            for j in 0..=nj {
                for i in 0..=ni {
                    nodes.push(
                        origin
                            + Vec3d::new(
                                i as f64 * cell_size.x,
                                j as f64 * cell_size.y,
                                k as f64 * cell_size.z,
                            ),
                    );
                }
            }
        }

        let mut cells = Vec::with_capacity(cell_count);
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    cells.push(Cell::new([
                        node_index(i, j, k),
                        node_index(i + 1, j, k),
                        node_index(i + 1, j + 1, k),
                        node_index(i, j + 1, k),
                        node_index(i, j, k + 1),
                        node_index(i + 1, j, k + 1),
                        node_index(i + 1, j + 1, k + 1),
                        node_index(i, j + 1, k + 1),
                    ]));
                }
            }
        }

        Grid::new(name, kind, dimensions, cells, nodes)
    }

    pub(crate) fn register(&mut self, index: usize, global_cell_offset: usize) {
        self.index = index;
        self.global_cell_offset = global_cell_offset;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &GridKind {
        &self.kind
    }

    pub fn is_main_grid(&self) -> bool {
        matches!(self.kind, GridKind::Main)
    }

    /// Parent cell range for an LGR, `None` for the main grid
    pub fn sub_grid_range(&self) -> Option<&SubGridRange> {
        match &self.kind {
            GridKind::Sub(range) => Some(range),
            GridKind::Main => None,
        }
    }

    pub fn dimensions(&self) -> Ijk {
        self.dimensions
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn nodes(&self) -> &[Vec3d] {
        &self.nodes
    }

    pub fn global_cell_offset(&self) -> usize {
        self.global_cell_offset
    }

    /// # Errors
    ///
    /// Returns `GridError::CellIndexOutOfRange` if `cell_index >= cell_count()`.
    pub fn cell(&self, cell_index: usize) -> Result<&Cell, GridError> {
        let cell_count = self.cells.len();
        self.cells
            .get(cell_index)
            .ok_or(GridError::CellIndexOutOfRange {
                grid: self.index,
                index: cell_index,
                cell_count,
            })
    }

    /// # Errors
    ///
    /// Returns `GridError::CellIndexOutOfRange` if `cell_index >= cell_count()`.
    pub fn cell_mut(&mut self, cell_index: usize) -> Result<&mut Cell, GridError> {
        let (grid, cell_count) = (self.index, self.cells.len());
        self.cells
            .get_mut(cell_index)
            .ok_or(GridError::CellIndexOutOfRange {
                grid,
                index: cell_index,
                cell_count,
            })
    }

    /// IJK of a linear cell index
    ///
    /// # Errors
    ///
    /// Returns `GridError::CellIndexOutOfRange` if `cell_index >= ni * nj * nk`.
    pub fn ijk_from_cell_index(&self, cell_index: usize) -> Result<Ijk, GridError> {
        if cell_index >= self.cells.len() {
            return Err(GridError::CellIndexOutOfRange {
                grid: self.index,
                index: cell_index,
                cell_count: self.cells.len(),
            });
        }
        Ok(self.ijk_unchecked(cell_index))
    }

    #[inline]
    pub(crate) fn ijk_unchecked(&self, cell_index: usize) -> Ijk {
        let Ijk { i: ni, j: nj, .. } = self.dimensions;
        Ijk::new(cell_index % ni, (cell_index / ni) % nj, cell_index / (ni * nj))
    }

    /// Linear cell index of an IJK coordinate
    ///
    /// # Errors
    ///
    /// Returns `GridError::IjkOutOfRange` if any component is outside
    /// `[0, extent)`, which includes the undefined sentinel.
    pub fn cell_index_from_ijk(&self, ijk: Ijk) -> Result<usize, GridError> {
        if !ijk.is_within(self.dimensions) {
            return Err(GridError::IjkOutOfRange {
                grid: self.index,
                ijk,
                dimensions: self.dimensions,
            });
        }
        let Ijk { i: ni, j: nj, .. } = self.dimensions;
        Ok(ijk.i + ijk.j * ni + ijk.k * ni * nj)
    }

    /// IJK of the cell across `face`, or `Ijk::UNDEFINED` at the grid boundary.
    ///
    /// Never crosses into another grid: LGR boundaries are not assumed to
    /// line up with single parent cells.
    pub fn neighbor_ijk_at_cell_face(&self, ijk: Ijk, face: FaceType) -> Ijk {
        if !ijk.is_within(self.dimensions) {
            return Ijk::UNDEFINED;
        }
        let Ijk { i, j, k } = ijk;
        let dims = self.dimensions;
        let neighbor = match face {
            FaceType::PosI => (i + 1 < dims.i).then_some(Ijk::new(i + 1, j, k)),
            FaceType::NegI => i.checked_sub(1).map(|i| Ijk::new(i, j, k)),
            FaceType::PosJ => (j + 1 < dims.j).then_some(Ijk::new(i, j + 1, k)),
            FaceType::NegJ => j.checked_sub(1).map(|j| Ijk::new(i, j, k)),
            FaceType::PosK => (k + 1 < dims.k).then_some(Ijk::new(i, j, k + 1)),
            FaceType::NegK => k.checked_sub(1).map(|k| Ijk::new(i, j, k)),
        };
        neighbor.unwrap_or(Ijk::UNDEFINED)
    }

    /// World positions of the 8 cell corners
    ///
    /// # Errors
    ///
    /// Returns `GridError::CellIndexOutOfRange` for a bad cell index, or
    /// `GridError::InvalidGrid` if no node positions are loaded.
    pub fn cell_corners(&self, cell_index: usize) -> Result<[Vec3d; 8], GridError> {
        let cell = self.cell(cell_index)?;
        if self.nodes.is_empty() {
            return Err(GridError::InvalidGrid {
                name: self.name.clone(),
                reason: "no node positions loaded".to_string(),
            });
        }
        Ok(cell.corner_indices().map(|node| self.nodes[node]))
    }

    /// Mean of the 8 cell corners
    ///
    /// # Errors
    ///
    /// Same as [`Grid::cell_corners`].
    pub fn cell_center(&self, cell_index: usize) -> Result<Vec3d, GridError> {
        let corners = self.cell_corners(cell_index)?;
        Ok(corners.iter().sum::<Vec3d>() / 8.0)
    }

    /// World positions of one face's 4 corners
    ///
    /// # Errors
    ///
    /// Same as [`Grid::cell_corners`].
    pub fn face_corners(&self, cell_index: usize, face: FaceType) -> Result<[Vec3d; 4], GridError> {
        let corners = self.cell_corners(cell_index)?;
        Ok(face.corner_indices().map(|corner| corners[corner]))
    }
}

/// `ni * nj * nk`, rejecting zero extents and products that overflow `usize`
fn checked_cell_count(name: &str, dimensions: Ijk) -> Result<usize, GridError> {
    let invalid = |reason: String| GridError::InvalidGrid {
        name: name.to_string(),
        reason,
    };

    if dimensions.i == 0 || dimensions.j == 0 || dimensions.k == 0 {
        return Err(invalid(format!("dimensions {dimensions} must all be positive")));
    }
    dimensions
        .i
        .checked_mul(dimensions.j)
        .and_then(|count| count.checked_mul(dimensions.k))
        .ok_or_else(|| invalid(format!("cell count overflows for dimensions {dimensions}")))
}
