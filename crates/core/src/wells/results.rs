//! Well result records supplied by a reader
//!
//! One `WellResults` per well, one `WellResultFrame` per reported time step.
//! A frame has a well head and a list of branches; each branch is the ordered
//! list of cells its completions pass through.

use crate::core_types::UNDEFINED_INDEX;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Reference to one cell touched by a well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WellResultCell {
    pub grid_index: usize,
    pub grid_cell_index: usize,
}

impl WellResultCell {
    pub const fn new(grid_index: usize, grid_cell_index: usize) -> Self {
        WellResultCell {
            grid_index,
            grid_cell_index,
        }
    }

    /// Placeholder for a gap in the completion path
    pub const fn undefined() -> Self {
        WellResultCell::new(UNDEFINED_INDEX, UNDEFINED_INDEX)
    }

    pub const fn is_valid(&self) -> bool {
        self.grid_index != UNDEFINED_INDEX && self.grid_cell_index != UNDEFINED_INDEX
    }
}

/// One continuous lateral of a well
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellResultBranch {
    pub branch_index: usize,
    pub cells: Vec<WellResultCell>,
}

/// What the well is doing at a time step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellProductionType {
    Producer,
    OilInjector,
    GasInjector,
    WaterInjector,
    #[default]
    Undefined,
}

/// Well state at one reported time step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellResultFrame {
    /// Result time step this frame belongs to
    pub result_time_step: usize,
    pub well_head: WellResultCell,
    pub branches: Vec<WellResultBranch>,
    pub is_open: bool,
    pub production_type: WellProductionType,
}

impl WellResultFrame {
    pub fn new(result_time_step: usize, well_head: WellResultCell) -> Self {
        WellResultFrame {
            result_time_step,
            well_head,
            branches: Vec::new(),
            is_open: true,
            production_type: WellProductionType::Undefined,
        }
    }

    /// Append a branch built from a cell path
    pub fn with_branch(mut self, cells: Vec<WellResultCell>) -> Self {
        let branch_index = self.branches.len();
        self.branches.push(WellResultBranch {
            branch_index,
            cells,
        });
        self
    }

    /// Well head followed by every branch cell, in order
    pub fn all_cells(&self) -> impl Iterator<Item = &WellResultCell> {
        std::iter::once(&self.well_head).chain(self.branches.iter().flat_map(|branch| branch.cells.iter()))
    }
}

/// All reported frames of one well
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellResults {
    name: String,
    frames: Vec<WellResultFrame>,
    /// Result time step -> frame index
    time_step_to_frame: FxHashMap<usize, usize>,
}

impl WellResults {
    pub fn new(name: impl Into<String>, frames: Vec<WellResultFrame>) -> Self {
        let time_step_to_frame = frames
            .iter()
            .enumerate()
            .map(|(frame_index, frame)| (frame.result_time_step, frame_index))
            .collect();
        WellResults {
            name: name.into(),
            frames,
            time_step_to_frame,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[WellResultFrame] {
        &self.frames
    }

    /// Frame reported at `result_time_step`, if the well was reported then
    pub fn frame_for_time_step(&self, result_time_step: usize) -> Option<&WellResultFrame> {
        self.time_step_to_frame
            .get(&result_time_step)
            .map(|&frame_index| &self.frames[frame_index])
    }

    /// True if any frame has more than one branch
    pub fn is_multi_segment(&self) -> bool {
        self.frames.iter().any(|frame| frame.branches.len() > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cells_visits_head_then_branches() {
        let frame = WellResultFrame::new(0, WellResultCell::new(0, 5))
            .with_branch(vec![WellResultCell::new(0, 5), WellResultCell::new(0, 6)])
            .with_branch(vec![WellResultCell::new(1, 2)]);

        let cells: Vec<WellResultCell> = frame.all_cells().copied().collect();
        assert_eq!(
            cells,
            vec![
                WellResultCell::new(0, 5),
                WellResultCell::new(0, 5),
                WellResultCell::new(0, 6),
                WellResultCell::new(1, 2),
            ]
        );
        assert_eq!(frame.branches[1].branch_index, 1);
    }

    #[test]
    fn test_frame_lookup_by_time_step() {
        let well = WellResults::new(
            "OP-1",
            vec![
                WellResultFrame::new(0, WellResultCell::new(0, 1)),
                WellResultFrame::new(3, WellResultCell::new(0, 2)),
            ],
        );

        assert_eq!(well.name(), "OP-1");
        assert_eq!(well.frame_for_time_step(3).unwrap().well_head, WellResultCell::new(0, 2));
        assert!(well.frame_for_time_step(1).is_none());
        assert!(!well.is_multi_segment());
    }

    #[test]
    fn test_multi_segment_detection() {
        let frame = WellResultFrame::new(0, WellResultCell::new(0, 0))
            .with_branch(vec![WellResultCell::new(0, 1)])
            .with_branch(vec![WellResultCell::new(0, 2)]);
        assert!(WellResults::new("ML-1", vec![frame]).is_multi_segment());
    }

    #[test]
    fn test_undefined_cell() {
        assert!(!WellResultCell::undefined().is_valid());
        assert!(WellResultCell::new(0, 0).is_valid());
    }
}
