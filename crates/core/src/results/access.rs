//! Per-grid scalar accessors
//!
//! An accessor is bound to one (grid, porosity model, time step, result) and
//! maps grid-local cell indices to value slots. It borrows the stored arrays;
//! nothing is copied.

use crate::active_cells::ActiveCellInfo;
use crate::core_types::UNDEFINED_INDEX;
use crate::grid::Grid;
use crate::results::{ResultStore, StorageLayout};
use tracing::trace;

/// Read access to one scalar field over the cells of one grid
pub trait CellScalarAccess {
    /// Value of a grid-local cell, or `None` if that cell has no value
    /// (an inactive cell under compacted storage).
    ///
    /// # Panics
    ///
    /// Panics if `cell_index` is not below [`CellScalarAccess::cell_count`].
    fn cell_scalar(&self, cell_index: usize) -> Option<f64>;

    /// Number of cells in the bound grid
    fn cell_count(&self) -> usize;
}

/// Accessor over dense storage: one slot per global cell
#[derive(Debug, Clone, Copy)]
pub struct DenseCellAccess<'a> {
    values: &'a [f64],
    global_cell_offset: usize,
    cell_count: usize,
}

impl<'a> DenseCellAccess<'a> {
    pub fn new(grid: &Grid, values: &'a [f64]) -> Self {
        DenseCellAccess {
            values,
            global_cell_offset: grid.global_cell_offset(),
            cell_count: grid.cell_count(),
        }
    }
}

impl CellScalarAccess for DenseCellAccess<'_> {
    fn cell_scalar(&self, cell_index: usize) -> Option<f64> {
        assert!(
            cell_index < self.cell_count,
            "cell index {cell_index} out of range (cell count {})",
            self.cell_count
        );
        self.values.get(self.global_cell_offset + cell_index).copied()
    }

    fn cell_count(&self) -> usize {
        self.cell_count
    }
}

/// Accessor over compacted storage: one slot per active cell
#[derive(Debug, Clone, Copy)]
pub struct CompactedCellAccess<'a> {
    values: &'a [f64],
    active_cells: &'a ActiveCellInfo,
    global_cell_offset: usize,
    cell_count: usize,
}

impl<'a> CompactedCellAccess<'a> {
    pub fn new(grid: &Grid, active_cells: &'a ActiveCellInfo, values: &'a [f64]) -> Self {
        CompactedCellAccess {
            values,
            active_cells,
            global_cell_offset: grid.global_cell_offset(),
            cell_count: grid.cell_count(),
        }
    }
}

impl CellScalarAccess for CompactedCellAccess<'_> {
    fn cell_scalar(&self, cell_index: usize) -> Option<f64> {
        assert!(
            cell_index < self.cell_count,
            "cell index {cell_index} out of range (cell count {})",
            self.cell_count
        );
        self.active_cells
            .cell_result_index(self.global_cell_offset + cell_index)
            .and_then(|slot| self.values.get(slot).copied())
    }

    fn cell_count(&self) -> usize {
        self.cell_count
    }
}

/// Create an accessor for one grid, choosing the strategy from the result's
/// storage layout.
///
/// Returns `None` when there is nothing to read: an undefined time step or
/// result index, an unregistered result, or a time step not yet loaded.
pub fn create_data_access<'a>(
    grid: &'a Grid,
    active_cells: &'a ActiveCellInfo,
    results: &'a ResultStore,
    time_step: usize,
    result_index: usize,
) -> Option<Box<dyn CellScalarAccess + 'a>> {
    if time_step == UNDEFINED_INDEX || result_index == UNDEFINED_INDEX {
        return None;
    }

    let Ok(result) = results.result(result_index) else {
        trace!(result_index, "No such result, no accessor");
        return None;
    };
    let Some(values) = result.values(time_step) else {
        trace!(result = result.name(), time_step, "Time step not loaded, no accessor");
        return None;
    };

    match result.layout() {
        StorageLayout::Dense => Some(Box::new(DenseCellAccess::new(grid, values))),
        StorageLayout::Compacted => Some(Box::new(CompactedCellAccess::new(
            grid,
            active_cells,
            values,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Ijk, PorosityModel, Vec3d};
    use crate::grid::{GridHierarchy, GridKind};

    struct Fixture {
        hierarchy: GridHierarchy,
        active: ActiveCellInfo,
        store: ResultStore,
    }

    fn fixture() -> Fixture {
        let grid = Grid::cartesian("main", GridKind::Main, Ijk::new(2, 2, 1), Vec3d::zeros(), Vec3d::new(1.0, 1.0, 1.0)).unwrap();
        let hierarchy = GridHierarchy::new(grid).unwrap();
        let mut active = ActiveCellInfo::new(PorosityModel::Matrix);
        active
            .set_active_flags(&hierarchy, &[true, false, true, true])
            .unwrap();

        let mut store = ResultStore::new(PorosityModel::Matrix);
        let poro = store.find_or_add_result("PORO", StorageLayout::Dense);
        store
            .set_time_step_values(poro, 0, vec![0.1, 0.2, 0.3, 0.4])
            .unwrap();
        let soil = store.find_or_add_result("SOIL", StorageLayout::Compacted);
        store
            .set_time_step_values(soil, 0, vec![0.5, 0.6, 0.7])
            .unwrap();

        Fixture {
            hierarchy,
            active,
            store,
        }
    }

    #[test]
    fn test_dense_access_reads_inactive_cells() {
        let f = fixture();
        let access = create_data_access(f.hierarchy.main_grid(), &f.active, &f.store, 0, 0).unwrap();
        assert_eq!(access.cell_count(), 4);
        assert_eq!(access.cell_scalar(1), Some(0.2));
        assert_eq!(access.cell_scalar(3), Some(0.4));
    }

    #[test]
    fn test_compacted_access_skips_inactive_cells() {
        let f = fixture();
        let access = create_data_access(f.hierarchy.main_grid(), &f.active, &f.store, 0, 1).unwrap();
        assert_eq!(access.cell_scalar(0), Some(0.5));
        assert_eq!(access.cell_scalar(1), None);
        assert_eq!(access.cell_scalar(2), Some(0.6));
        assert_eq!(access.cell_scalar(3), Some(0.7));
    }

    #[test]
    fn test_no_accessor_without_data() {
        let f = fixture();
        let grid = f.hierarchy.main_grid();
        assert!(create_data_access(grid, &f.active, &f.store, UNDEFINED_INDEX, 0).is_none());
        assert!(create_data_access(grid, &f.active, &f.store, 0, UNDEFINED_INDEX).is_none());
        assert!(create_data_access(grid, &f.active, &f.store, 4, 0).is_none());
        assert!(create_data_access(grid, &f.active, &f.store, 0, 9).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cell_outside_grid_is_fatal() {
        let f = fixture();
        let access = create_data_access(f.hierarchy.main_grid(), &f.active, &f.store, 0, 0).unwrap();
        let _ = access.cell_scalar(4);
    }
}
