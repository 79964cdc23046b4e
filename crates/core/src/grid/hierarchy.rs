//! Main grid plus its registered LGRs, addressed by stable grid index
//!
//! Grid 0 is always the main grid; sub-grids follow in registration order.
//! Every other component refers to grids by this index and to cells by
//! `(grid index, local cell index)` or by the hierarchy-wide global index.

use crate::core_types::{Ijk, Vec3d};
use crate::error::GridError;
use crate::grid::{Cell, FaceType, Grid, GridKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Arena of grids owned by one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridHierarchy {
    grids: Vec<Grid>,
    /// Translation subtracted from world coordinates before rendering
    display_offset: Vec3d,
}

impl GridHierarchy {
    /// Create a hierarchy holding only the main grid
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidGrid` if `main_grid` is a sub-grid.
    pub fn new(mut main_grid: Grid) -> Result<Self, GridError> {
        if !main_grid.is_main_grid() {
            return Err(GridError::InvalidGrid {
                name: main_grid.name().to_string(),
                reason: "grid 0 must be a main grid".to_string(),
            });
        }
        main_grid.register(0, 0);
        Ok(GridHierarchy {
            grids: vec![main_grid],
            display_offset: Vec3d::zeros(),
        })
    }

    /// Register an LGR and return its grid index.
    ///
    /// Parent cells inside the refined range are annotated with the new grid index.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidGrid` if the grid is not a sub-grid or its
    /// parent range lies outside the parent grid, and
    /// `GridError::GridIndexOutOfRange` if the parent grid does not exist.
    pub fn add_sub_grid(&mut self, mut grid: Grid) -> Result<usize, GridError> {
        let GridKind::Sub(range) = grid.kind().clone() else {
            return Err(GridError::InvalidGrid {
                name: grid.name().to_string(),
                reason: "sub-grid registered without a parent cell range".to_string(),
            });
        };

        let parent_dimensions = self.grid_by_index(range.parent_grid)?.dimensions();
        let ordered = range.min.i <= range.max.i && range.min.j <= range.max.j && range.min.k <= range.max.k;
        if !ordered || !range.max.is_within(parent_dimensions) {
            return Err(GridError::InvalidGrid {
                name: grid.name().to_string(),
                reason: format!(
                    "parent range {}..={} does not fit parent dimensions {}",
                    range.min, range.max, parent_dimensions
                ),
            });
        }

        let index = self.grids.len();
        let offset = self.total_cell_count();

        let parent = &mut self.grids[range.parent_grid];
        let mut refined = 0;
        for cell_index in 0..parent.cell_count() {
            let ijk = parent.ijk_unchecked(cell_index);
            if range.contains(ijk) {
                parent.cells_mut()[cell_index].set_sub_grid(index);
                refined += 1;
            }
        }

        grid.register(index, offset);
        debug!(
            grid = index,
            name = grid.name(),
            cells = grid.cell_count(),
            refined_parent_cells = refined,
            "Registered sub-grid"
        );
        self.grids.push(grid);
        Ok(index)
    }

    /// Number of grids, including the main grid
    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }

    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if `index >= grid_count()`.
    pub fn grid_by_index(&self, index: usize) -> Result<&Grid, GridError> {
        self.grids.get(index).ok_or(GridError::GridIndexOutOfRange {
            index,
            grid_count: self.grids.len(),
        })
    }

    pub fn main_grid(&self) -> &Grid {
        &self.grids[0]
    }

    /// Main grid followed by all sub-grids, in registration order
    pub fn all_grids(&self) -> &[Grid] {
        &self.grids
    }

    pub(crate) fn all_grids_mut(&mut self) -> &mut [Grid] {
        &mut self.grids
    }

    pub fn sub_grids(&self) -> impl Iterator<Item = &Grid> {
        self.grids.iter().skip(1)
    }

    /// Total number of cells over all grids
    pub fn total_cell_count(&self) -> usize {
        self.grids.iter().map(Grid::cell_count).sum()
    }

    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` or
    /// `GridError::CellIndexOutOfRange` for invalid indices.
    pub fn cell(&self, grid_index: usize, cell_index: usize) -> Result<&Cell, GridError> {
        self.grid_by_index(grid_index)?.cell(cell_index)
    }

    /// Hierarchy-wide index of a grid-local cell
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` or
    /// `GridError::CellIndexOutOfRange` for invalid indices.
    pub fn global_cell_index(&self, grid_index: usize, cell_index: usize) -> Result<usize, GridError> {
        let grid = self.grid_by_index(grid_index)?;
        grid.cell(cell_index)?;
        Ok(grid.global_cell_offset() + cell_index)
    }

    /// Inverse of [`GridHierarchy::global_cell_index`]
    ///
    /// # Errors
    ///
    /// Returns `GridError::GlobalCellIndexOutOfRange` if `global_index` is not
    /// below the total cell count.
    pub fn grid_and_local_from_global(&self, global_index: usize) -> Result<(usize, usize), GridError> {
        let cell_count = self.total_cell_count();
        if global_index >= cell_count {
            return Err(GridError::GlobalCellIndexOutOfRange {
                index: global_index,
                cell_count,
            });
        }
        let grid_index = self
            .grids
            .partition_point(|grid| grid.global_cell_offset() <= global_index)
            - 1;
        Ok((
            grid_index,
            global_index - self.grids[grid_index].global_cell_offset(),
        ))
    }

    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` or
    /// `GridError::CellIndexOutOfRange` for invalid indices.
    pub fn ijk_from_cell_index(&self, grid_index: usize, cell_index: usize) -> Result<Ijk, GridError> {
        self.grid_by_index(grid_index)?.ijk_from_cell_index(cell_index)
    }

    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` or `GridError::IjkOutOfRange`.
    pub fn cell_index_from_ijk(&self, grid_index: usize, ijk: Ijk) -> Result<usize, GridError> {
        self.grid_by_index(grid_index)?.cell_index_from_ijk(ijk)
    }

    /// Neighbor within the same grid; `Ijk::UNDEFINED` at the grid boundary
    ///
    /// # Errors
    ///
    /// Returns `GridError::GridIndexOutOfRange` if the grid does not exist.
    pub fn neighbor_ijk_at_cell_face(&self, grid_index: usize, ijk: Ijk, face: FaceType) -> Result<Ijk, GridError> {
        Ok(self.grid_by_index(grid_index)?.neighbor_ijk_at_cell_face(ijk, face))
    }

    pub fn display_offset(&self) -> Vec3d {
        self.display_offset
    }

    pub fn set_display_offset(&mut self, offset: Vec3d) {
        self.display_offset = offset;
    }

    /// World position translated into display coordinates
    pub fn display_coordinate(&self, position: &Vec3d) -> Vec3d {
        position - self.display_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SubGridRange;

    fn hierarchy_with_lgr() -> GridHierarchy {
        let main = Grid::cartesian(
            "main",
            GridKind::Main,
            Ijk::new(3, 3, 1),
            Vec3d::zeros(),
            Vec3d::new(10.0, 10.0, 10.0),
        )
        .unwrap();
        let mut hierarchy = GridHierarchy::new(main).unwrap();

        let lgr = Grid::cartesian(
            "LGR1",
            GridKind::Sub(SubGridRange {
                parent_grid: 0,
                min: Ijk::new(1, 1, 0),
                max: Ijk::new(1, 1, 0),
            }),
            Ijk::new(2, 2, 2),
            Vec3d::new(10.0, 10.0, 0.0),
            Vec3d::new(5.0, 5.0, 5.0),
        )
        .unwrap();
        assert_eq!(hierarchy.add_sub_grid(lgr).unwrap(), 1);
        hierarchy
    }

    #[test]
    fn test_grid_registration_order() {
        let hierarchy = hierarchy_with_lgr();
        assert_eq!(hierarchy.grid_count(), 2);
        assert!(hierarchy.main_grid().is_main_grid());
        assert_eq!(hierarchy.grid_by_index(1).unwrap().name(), "LGR1");
        assert_eq!(hierarchy.sub_grids().count(), 1);
        assert_eq!(
            hierarchy.grid_by_index(2).unwrap_err(),
            GridError::GridIndexOutOfRange {
                index: 2,
                grid_count: 2
            }
        );
        for (index, grid) in hierarchy.all_grids().iter().enumerate() {
            assert_eq!(grid.index(), index);
        }
    }

    #[test]
    fn test_parent_cells_annotated() {
        let hierarchy = hierarchy_with_lgr();
        let main = hierarchy.main_grid();
        let centre = main.cell_index_from_ijk(Ijk::new(1, 1, 0)).unwrap();
        for (index, cell) in main.cells().iter().enumerate() {
            let expected = (index == centre).then_some(1);
            assert_eq!(cell.sub_grid(), expected);
        }
    }

    #[test]
    fn test_global_cell_addressing() {
        let hierarchy = hierarchy_with_lgr();
        assert_eq!(hierarchy.total_cell_count(), 9 + 8);
        assert_eq!(hierarchy.global_cell_index(0, 4).unwrap(), 4);
        assert_eq!(hierarchy.global_cell_index(1, 0).unwrap(), 9);
        assert_eq!(hierarchy.grid_and_local_from_global(8).unwrap(), (0, 8));
        assert_eq!(hierarchy.grid_and_local_from_global(9).unwrap(), (1, 0));
        assert_eq!(hierarchy.grid_and_local_from_global(16).unwrap(), (1, 7));
        assert!(hierarchy.grid_and_local_from_global(17).is_err());
        assert!(hierarchy.global_cell_index(1, 8).is_err());
    }

    #[test]
    fn test_bad_sub_grids_rejected() {
        let mut hierarchy = hierarchy_with_lgr();

        let outside = Grid::cartesian(
            "outside",
            GridKind::Sub(SubGridRange {
                parent_grid: 0,
                min: Ijk::new(2, 2, 0),
                max: Ijk::new(3, 3, 0),
            }),
            Ijk::new(1, 1, 1),
            Vec3d::zeros(),
            Vec3d::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert!(matches!(
            hierarchy.add_sub_grid(outside),
            Err(GridError::InvalidGrid { .. })
        ));

        let orphan = Grid::cartesian(
            "orphan",
            GridKind::Sub(SubGridRange {
                parent_grid: 7,
                min: Ijk::new(0, 0, 0),
                max: Ijk::new(0, 0, 0),
            }),
            Ijk::new(1, 1, 1),
            Vec3d::zeros(),
            Vec3d::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert!(matches!(
            hierarchy.add_sub_grid(orphan),
            Err(GridError::GridIndexOutOfRange { index: 7, .. })
        ));

        let main_again = Grid::cartesian(
            "main2",
            GridKind::Main,
            Ijk::new(1, 1, 1),
            Vec3d::zeros(),
            Vec3d::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        assert!(hierarchy.add_sub_grid(main_again).is_err());
        assert_eq!(hierarchy.grid_count(), 2);
    }

    #[test]
    fn test_display_coordinate() {
        let mut hierarchy = hierarchy_with_lgr();
        let position = Vec3d::new(456_000.0, 6_780_000.0, 1500.0);
        assert_eq!(hierarchy.display_coordinate(&position), position);

        hierarchy.set_display_offset(Vec3d::new(455_000.0, 6_779_000.0, 1000.0));
        assert_eq!(
            hierarchy.display_coordinate(&position),
            Vec3d::new(1000.0, 1000.0, 500.0)
        );
    }
}
