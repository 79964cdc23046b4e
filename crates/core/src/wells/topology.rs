//! Which cells each well passes through, and how consecutive well cells connect
//!
//! Membership is derived once per installed well-result set: a boolean per
//! cell per grid, plus the `is_well_cell` flag on the cells themselves.
//! Installing a new set empties the cache; the next access rebuilds it from
//! scratch.

use crate::core_types::CacheState;
use crate::error::GridError;
use crate::grid::{Cell, FaceType, GridHierarchy};
use crate::wells::{WellResultCell, WellResults};
use tracing::{debug, info, trace};

/// Well results and the per-grid well-cell membership derived from them
#[derive(Debug, Clone, Default)]
pub struct WellCellTopology {
    wells: Vec<WellResults>,
    /// One flag per cell, per grid
    membership: CacheState<Vec<Vec<bool>>>,
}

impl WellCellTopology {
    pub fn new() -> Self {
        WellCellTopology::default()
    }

    /// Replace the well-result set; cached membership is discarded.
    pub fn set_well_results(&mut self, wells: Vec<WellResults>) {
        info!(wells = wells.len(), "Installing well results");
        self.wells = wells;
        self.membership.invalidate();
    }

    pub fn well_results(&self) -> &[WellResults] {
        &self.wells
    }

    pub fn is_computed(&self) -> bool {
        self.membership.is_valid()
    }

    /// Discard cached membership (grid reload)
    pub fn invalidate(&mut self) {
        self.membership.invalidate();
    }

    /// Build per-grid membership and mark well cells, once per well-result set.
    ///
    /// # Panics
    ///
    /// Panics if a well references a grid or cell that does not exist; that
    /// means the well and grid data were not loaded from the same case.
    pub fn compute_well_cell_membership(&mut self, hierarchy: &mut GridHierarchy) {
        if self.membership.is_valid() {
            trace!("Well cell membership already computed");
            return;
        }
        let wells = &self.wells;
        self.membership
            .get_or_insert_with(|| build_membership(wells, hierarchy));
    }

    /// Membership flags of one grid, computing them first if needed
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if the grid does not exist.
    pub fn membership(&mut self, hierarchy: &mut GridHierarchy, grid_index: usize) -> Result<&[bool], GridError> {
        let grid_count = hierarchy.grid_count();
        let wells = &self.wells;
        self.membership
            .get_or_insert_with(|| build_membership(wells, hierarchy))
            .get(grid_index)
            .map(Vec::as_slice)
            .ok_or(GridError::GridIndexOutOfRange {
                index: grid_index,
                grid_count,
            })
    }

    /// Membership flags of one grid without triggering computation
    pub fn computed_membership(&self, grid_index: usize) -> Option<&[bool]> {
        self.membership
            .get()
            .and_then(|grids| grids.get(grid_index))
            .map(Vec::as_slice)
    }
}

fn build_membership(wells: &[WellResults], hierarchy: &mut GridHierarchy) -> Vec<Vec<bool>> {
    for grid in hierarchy.all_grids_mut() {
        for cell in grid.cells_mut() {
            cell.set_well_cell(false);
        }
    }

    let mut membership: Vec<Vec<bool>> = hierarchy
        .all_grids()
        .iter()
        .map(|grid| vec![false; grid.cell_count()])
        .collect();

    let grids = hierarchy.all_grids_mut();
    for well in wells {
        for frame in well.frames() {
            for well_cell in frame.all_cells().filter(|cell| cell.is_valid()) {
                let WellResultCell {
                    grid_index,
                    grid_cell_index,
                } = *well_cell;
                let in_range = membership
                    .get(grid_index)
                    .is_some_and(|cells| grid_cell_index < cells.len());
                assert!(
                    in_range,
                    "well '{}' references cell {} of grid {}, which is not loaded",
                    well.name(),
                    grid_cell_index,
                    grid_index
                );

                membership[grid_index][grid_cell_index] = true;
                grids[grid_index].cells_mut()[grid_cell_index].set_well_cell(true);
            }
        }
    }

    let well_cell_count: usize = membership
        .iter()
        .map(|cells| cells.iter().filter(|&&is_well| is_well).count())
        .sum();
    debug!(
        wells = wells.len(),
        well_cells = well_cell_count,
        "Computed well cell membership"
    );
    membership
}

/// The cell a well-result record points at
///
/// # Errors
///
/// Returns `GridError::GridIndexOutOfRange` or
/// `GridError::CellIndexOutOfRange` if the record does not name a loaded cell
/// (undefined records included).
pub fn cell_for_well_result_cell<'a>(
    hierarchy: &'a GridHierarchy,
    well_cell: &WellResultCell,
) -> Result<&'a Cell, GridError> {
    hierarchy.cell(well_cell.grid_index, well_cell.grid_cell_index)
}

/// Face of `source` shared with `other`, if they are direct structured
/// neighbors in the same grid.
///
/// Cells in different grids never share a face here: an LGR boundary face is
/// not assumed to coincide with a single parent-grid face, so no cross-grid
/// connection is invented. Undefined records never share a face either.
///
/// # Errors
///
/// Returns `GridError::GridIndexOutOfRange` or
/// `GridError::CellIndexOutOfRange` if `source` is not a loaded cell.
pub fn find_shared_face(
    hierarchy: &GridHierarchy,
    source: &WellResultCell,
    other: &WellResultCell,
) -> Result<Option<FaceType>, GridError> {
    if !source.is_valid() || !other.is_valid() || source.grid_index != other.grid_index {
        return Ok(None);
    }

    let grid = hierarchy.grid_by_index(source.grid_index)?;
    let ijk = grid.ijk_from_cell_index(source.grid_cell_index)?;

    Ok(FaceType::ALL.into_iter().find(|&face| {
        grid.cell_index_from_ijk(grid.neighbor_ijk_at_cell_face(ijk, face))
            .is_ok_and(|neighbor| neighbor == other.grid_cell_index)
    }))
}
