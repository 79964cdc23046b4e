//! Reservoir case: the aggregate root over grids, active cells, wells and results
//!
//! Readers install data through the `set_*` methods; each one invalidates
//! exactly the caches fed by that data. Derived artifacts (active-cell
//! bounds, well-cell membership, result ranges) are computed on first access
//! and reused until the next invalidation.

use crate::active_cells::{ActiveCellBounds, ActiveCellIndex, ActiveCellInfo};
use crate::config::CaseConfig;
use crate::core_types::{PorosityModel, Vec3d};
use crate::error::GridError;
use crate::grid::{Cell, FaceType, Grid, GridHierarchy};
use crate::results::{create_data_access, CellScalarAccess, ResultStore, StorageLayout};
use crate::wells::{self, WellCellTopology, WellResultCell, WellResults};
use tracing::info;

/// One loaded reservoir model
#[derive(Debug, Clone)]
pub struct ReservoirCase {
    config: CaseConfig,
    hierarchy: GridHierarchy,
    active_cells: ActiveCellIndex,
    wells: WellCellTopology,
    matrix_results: ResultStore,
    fracture_results: ResultStore,
}

impl ReservoirCase {
    pub fn new(config: CaseConfig, hierarchy: GridHierarchy) -> Self {
        info!(
            case = %config.name,
            grids = hierarchy.grid_count(),
            cells = hierarchy.total_cell_count(),
            "Created reservoir case"
        );
        ReservoirCase {
            config,
            hierarchy,
            active_cells: ActiveCellIndex::new(),
            wells: WellCellTopology::new(),
            matrix_results: ResultStore::new(PorosityModel::Matrix),
            fracture_results: ResultStore::new(PorosityModel::Fracture),
        }
    }

    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    /// Replace the grids (full reload).
    ///
    /// Active flags and scalar results are dropped since they are laid out
    /// against the old cells. Well results are kept but their membership is
    /// recomputed on next access.
    pub fn set_grid_hierarchy(&mut self, hierarchy: GridHierarchy) {
        info!(
            case = %self.config.name,
            grids = hierarchy.grid_count(),
            cells = hierarchy.total_cell_count(),
            "Reloading grids"
        );
        self.hierarchy = hierarchy;
        self.active_cells.clear();
        self.wells.invalidate();
        self.matrix_results.clear();
        self.fracture_results.clear();
    }

    pub fn grid_hierarchy(&self) -> &GridHierarchy {
        &self.hierarchy
    }

    pub fn grid_count(&self) -> usize {
        self.hierarchy.grid_count()
    }

    /// Grid by index; 0 is the main grid, LGRs follow
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if `index >= grid_count()`.
    pub fn grid(&self, index: usize) -> Result<&Grid, GridError> {
        self.hierarchy.grid_by_index(index)
    }

    pub fn all_grids(&self) -> &[Grid] {
        self.hierarchy.all_grids()
    }

    /// Install raw activity flags for one porosity model.
    ///
    /// Compacted results of that model are unloaded: their arrays follow the
    /// previous compaction and must be installed again. Dense results and
    /// the other model are untouched.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ValueCountMismatch` unless there is one flag per
    /// global cell. Nothing is changed in that case.
    pub fn set_active_flags(&mut self, model: PorosityModel, flags: &[bool]) -> Result<(), GridError> {
        self.active_cells
            .info_mut(model)
            .set_active_flags(&self.hierarchy, flags)?;
        self.results_mut(model).clear_compacted_values();
        Ok(())
    }

    pub fn active_cell_info(&self, model: PorosityModel) -> &ActiveCellInfo {
        self.active_cells.info(model)
    }

    pub fn is_active(&self, model: PorosityModel, global_cell_index: usize) -> bool {
        self.active_cells.is_active(model, global_cell_index)
    }

    /// Compute active-cell bounds for both models and the display offset
    pub fn compute_cached_data(&mut self) {
        self.active_cells
            .compute_bounding_boxes(&mut self.hierarchy, &self.config);
    }

    /// Bounds of one model's active cells, computing cached data if needed
    pub fn active_cell_bounds(&mut self, model: PorosityModel) -> &ActiveCellBounds {
        self.compute_cached_data();
        self.active_cells
            .info_mut(model)
            .compute_bounds(&self.hierarchy, self.config.parallel_cell_threshold)
    }

    /// Translation applied to world coordinates before rendering
    pub fn display_offset(&self) -> Vec3d {
        self.hierarchy.display_offset()
    }

    /// Replace the well-result set.
    ///
    /// Membership is rebuilt and the active-cell bounds recomputed once.
    ///
    /// # Panics
    ///
    /// Panics if a well references a cell outside the loaded grids.
    pub fn set_well_results(&mut self, wells: Vec<WellResults>) {
        self.wells.set_well_results(wells);
        self.wells.compute_well_cell_membership(&mut self.hierarchy);
        self.active_cells.invalidate_bounding_boxes();
        self.compute_cached_data();
    }

    pub fn well_results(&self) -> &[WellResults] {
        self.wells.well_results()
    }

    /// Well-cell membership flags of one grid
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if the grid does not exist.
    pub fn well_cells_in_grid(&mut self, grid_index: usize) -> Result<&[bool], GridError> {
        self.wells.membership(&mut self.hierarchy, grid_index)
    }

    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` or
    /// `GridError::CellIndexOutOfRange` if the record names no loaded cell.
    pub fn cell_for_well_result_cell(&self, well_cell: &WellResultCell) -> Result<&Cell, GridError> {
        wells::cell_for_well_result_cell(&self.hierarchy, well_cell)
    }

    /// Face of `source` shared with `other`, if they are same-grid neighbors
    ///
    /// # Errors
    ///
    /// Returns an index error if `source` names no loaded cell.
    pub fn find_shared_face(
        &self,
        source: &WellResultCell,
        other: &WellResultCell,
    ) -> Result<Option<FaceType>, GridError> {
        wells::find_shared_face(&self.hierarchy, source, other)
    }

    pub fn results(&self, model: PorosityModel) -> &ResultStore {
        match model {
            PorosityModel::Matrix => &self.matrix_results,
            PorosityModel::Fracture => &self.fracture_results,
        }
    }

    pub fn results_mut(&mut self, model: PorosityModel) -> &mut ResultStore {
        match model {
            PorosityModel::Matrix => &mut self.matrix_results,
            PorosityModel::Fracture => &mut self.fracture_results,
        }
    }

    /// Install one time step of a registered result, checking the array
    /// length against the result's storage layout.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered result
    /// and `GridError::ValueCountMismatch` if `values` has the wrong length
    /// (total cell count for dense storage, active cell count for compacted).
    pub fn set_scalar_values(
        &mut self,
        model: PorosityModel,
        result_index: usize,
        time_step: usize,
        values: Vec<f64>,
    ) -> Result<(), GridError> {
        let expected = match self.results(model).result(result_index)?.layout() {
            StorageLayout::Dense => self.hierarchy.total_cell_count(),
            StorageLayout::Compacted => self.active_cells.info(model).active_cell_count(),
        };
        if values.len() != expected {
            return Err(GridError::ValueCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        self.results_mut(model)
            .set_time_step_values(result_index, time_step, values)
    }

    /// Accessor for one (grid, model, time step, result); `Ok(None)` when
    /// there is no data to read.
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if the grid does not exist.
    pub fn data_accessor(
        &self,
        grid_index: usize,
        model: PorosityModel,
        time_step: usize,
        result_index: usize,
    ) -> Result<Option<Box<dyn CellScalarAccess + '_>>, GridError> {
        let grid = self.hierarchy.grid_by_index(grid_index)?;
        Ok(create_data_access(
            grid,
            self.active_cells.info(model),
            self.results(model),
            time_step,
            result_index,
        ))
    }
}
