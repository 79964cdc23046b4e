//! Active-cell index per porosity model
//!
//! A reader installs one raw activity flag per global cell. From those flags
//! each model derives a compacted result index (active cells only, assigned in
//! global traversal order) and, lazily, its index-space and world-space
//! bounding boxes.

use crate::config::CaseConfig;
use crate::core_types::{BoundingBox, CacheState, CellRange, PorosityModel, UNDEFINED_INDEX};
use crate::error::GridError;
use crate::grid::{Cell, Grid, GridHierarchy};
use rayon::prelude::*;
use tracing::debug;

/// Bounding boxes of the active cells of one porosity model
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCellBounds {
    grid_ranges: Vec<CellRange>,
    cell_range: CellRange,
    geometry: BoundingBox,
}

impl ActiveCellBounds {
    /// IJK range of active cells in one grid (empty range if none are active)
    pub fn grid_range(&self, grid_index: usize) -> Option<&CellRange> {
        self.grid_ranges.get(grid_index)
    }

    /// IJK range combined over all grids
    pub fn cell_range(&self) -> &CellRange {
        &self.cell_range
    }

    /// World-space box of all active cell corners; the origin point when
    /// there is no active geometry
    pub fn geometry_bounding_box(&self) -> &BoundingBox {
        &self.geometry
    }
}

/// Activity flags and compacted indices for one porosity model
#[derive(Debug, Clone)]
pub struct ActiveCellInfo {
    porosity_model: PorosityModel,
    /// Compacted result index per global cell, `UNDEFINED_INDEX` when inactive
    cell_result_index: Vec<usize>,
    active_cell_count: usize,
    grid_active_cell_counts: Vec<usize>,
    bounds: CacheState<ActiveCellBounds>,
}

impl ActiveCellInfo {
    pub fn new(porosity_model: PorosityModel) -> Self {
        ActiveCellInfo {
            porosity_model,
            cell_result_index: Vec::new(),
            active_cell_count: 0,
            grid_active_cell_counts: Vec::new(),
            bounds: CacheState::Empty,
        }
    }

    pub fn porosity_model(&self) -> PorosityModel {
        self.porosity_model
    }

    /// Install raw activity flags, one per global cell, and rebuild the
    /// compacted index. Cached bounds are invalidated.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ValueCountMismatch` if `flags` does not hold
    /// exactly one entry per cell in the hierarchy.
    pub fn set_active_flags(&mut self, hierarchy: &GridHierarchy, flags: &[bool]) -> Result<(), GridError> {
        let expected = hierarchy.total_cell_count();
        if flags.len() != expected {
            return Err(GridError::ValueCountMismatch {
                expected,
                actual: flags.len(),
            });
        }

        let mut next_result_index = 0;
        self.cell_result_index = flags
            .iter()
            .map(|&active| {
                if active {
                    next_result_index += 1;
                    next_result_index - 1
                } else {
                    UNDEFINED_INDEX
                }
            })
            .collect();
        self.active_cell_count = next_result_index;

        self.grid_active_cell_counts = hierarchy
            .all_grids()
            .iter()
            .map(|grid| {
                let start = grid.global_cell_offset();
                flags[start..start + grid.cell_count()]
                    .iter()
                    .filter(|&&active| active)
                    .count()
            })
            .collect();

        self.bounds.invalidate();

        debug!(
            model = %self.porosity_model,
            active = self.active_cell_count,
            total = expected,
            "Installed active cell flags"
        );
        Ok(())
    }

    /// Forget all flags (used on grid reload)
    pub fn clear(&mut self) {
        self.cell_result_index.clear();
        self.active_cell_count = 0;
        self.grid_active_cell_counts.clear();
        self.bounds.invalidate();
    }

    /// Number of global cells covered by the installed flags
    pub fn global_cell_count(&self) -> usize {
        self.cell_result_index.len()
    }

    pub fn is_active(&self, global_cell_index: usize) -> bool {
        self.cell_result_index(global_cell_index).is_some()
    }

    /// Compacted result slot of an active cell; `None` for inactive cells
    pub fn cell_result_index(&self, global_cell_index: usize) -> Option<usize> {
        self.cell_result_index
            .get(global_cell_index)
            .copied()
            .filter(|&index| index != UNDEFINED_INDEX)
    }

    pub fn active_cell_count(&self) -> usize {
        self.active_cell_count
    }

    pub fn grid_active_cell_count(&self, grid_index: usize) -> usize {
        self.grid_active_cell_counts
            .get(grid_index)
            .copied()
            .unwrap_or(0)
    }

    /// Cached bounds, if computed since the last flag or grid change
    pub fn bounds(&self) -> Option<&ActiveCellBounds> {
        self.bounds.get()
    }

    pub fn invalidate_bounds(&mut self) {
        self.bounds.invalidate();
    }

    /// Compute bounds if not cached and return them
    pub fn compute_bounds(&mut self, hierarchy: &GridHierarchy, parallel_cell_threshold: usize) -> &ActiveCellBounds {
        let model = self.porosity_model;
        let cell_result_index = &self.cell_result_index;
        self.bounds.get_or_insert_with(|| {
            compute_active_cell_bounds(model, cell_result_index, hierarchy, parallel_cell_threshold)
        })
    }
}

fn is_active_in(cell_result_index: &[usize], global_cell_index: usize) -> bool {
    cell_result_index
        .get(global_cell_index)
        .is_some_and(|&index| index != UNDEFINED_INDEX)
}

fn compute_active_cell_bounds(
    model: PorosityModel,
    cell_result_index: &[usize],
    hierarchy: &GridHierarchy,
    parallel_cell_threshold: usize,
) -> ActiveCellBounds {
    let mut cell_range = CellRange::empty();
    let mut geometry = BoundingBox::empty();

    let grid_ranges = hierarchy
        .all_grids()
        .iter()
        .map(|grid| {
            let (range, grid_geometry) = grid_active_bounds(grid, cell_result_index, parallel_cell_threshold);
            cell_range.add_range(&range);
            geometry.add_box(&grid_geometry);
            range
        })
        .collect();

    if !geometry.is_valid() {
        debug!(model = %model, "No active cell geometry, bounding box set to origin");
    }

    debug!(
        model = %model,
        min = ?geometry.min(),
        max = ?geometry.max(),
        "Computed active cell bounds"
    );

    ActiveCellBounds {
        grid_ranges,
        cell_range,
        geometry: geometry.or_origin(),
    }
}

/// IJK range and world-space box of one grid's active cells, in one pass
/// over its cells. The box stays empty when the grid has no node positions.
fn grid_active_bounds(
    grid: &Grid,
    cell_result_index: &[usize],
    parallel_cell_threshold: usize,
) -> (CellRange, BoundingBox) {
    let nodes = grid.nodes();
    if nodes.is_empty() {
        debug!(grid = grid.index(), "Grid has no node positions, skipping geometry");
    }

    let offset = grid.global_cell_offset();
    let empty = || (CellRange::empty(), BoundingBox::empty());
    let add_cell = |(mut range, mut bb): (CellRange, BoundingBox), (local, cell): (usize, &Cell)| {
        if is_active_in(cell_result_index, offset + local) {
            range.add(grid.ijk_unchecked(local));
            if !nodes.is_empty() {
                for &node in cell.corner_indices() {
                    bb.add(&nodes[node]);
                }
            }
        }
        (range, bb)
    };

    if grid.cell_count() >= parallel_cell_threshold {
        grid.cells()
            .par_iter()
            .enumerate()
            .fold(empty, add_cell)
            .reduce(empty, merge_bounds)
    } else {
        grid.cells()
            .iter()
            .enumerate()
            .fold(empty(), add_cell)
    }
}

fn merge_bounds(
    (mut range, bb): (CellRange, BoundingBox),
    (other_range, other_bb): (CellRange, BoundingBox),
) -> (CellRange, BoundingBox) {
    range.add_range(&other_range);
    (range, bb.merged(other_bb))
}

/// Active-cell information for both porosity models
#[derive(Debug, Clone)]
pub struct ActiveCellIndex {
    matrix: ActiveCellInfo,
    fracture: ActiveCellInfo,
}

impl ActiveCellIndex {
    pub fn new() -> Self {
        ActiveCellIndex {
            matrix: ActiveCellInfo::new(PorosityModel::Matrix),
            fracture: ActiveCellInfo::new(PorosityModel::Fracture),
        }
    }

    pub fn info(&self, model: PorosityModel) -> &ActiveCellInfo {
        match model {
            PorosityModel::Matrix => &self.matrix,
            PorosityModel::Fracture => &self.fracture,
        }
    }

    pub fn info_mut(&mut self, model: PorosityModel) -> &mut ActiveCellInfo {
        match model {
            PorosityModel::Matrix => &mut self.matrix,
            PorosityModel::Fracture => &mut self.fracture,
        }
    }

    pub fn is_active(&self, model: PorosityModel, global_cell_index: usize) -> bool {
        self.info(model).is_active(global_cell_index)
    }

    /// Compute (or reuse) the bounds of both models and record the matrix
    /// geometry minimum as the hierarchy display offset.
    pub fn compute_bounding_boxes(&mut self, hierarchy: &mut GridHierarchy, config: &CaseConfig) {
        self.fracture
            .compute_bounds(hierarchy, config.parallel_cell_threshold);
        let matrix_geometry = *self
            .matrix
            .compute_bounds(hierarchy, config.parallel_cell_threshold)
            .geometry_bounding_box();

        if config.apply_display_offset {
            hierarchy.set_display_offset(matrix_geometry.min());
        }
    }

    pub fn invalidate_bounding_boxes(&mut self) {
        self.matrix.invalidate_bounds();
        self.fracture.invalidate_bounds();
    }

    /// Forget flags of both models (used on grid reload)
    pub fn clear(&mut self) {
        self.matrix.clear();
        self.fracture.clear();
    }
}

impl Default for ActiveCellIndex {
    fn default() -> Self {
        ActiveCellIndex::new()
    }
}
