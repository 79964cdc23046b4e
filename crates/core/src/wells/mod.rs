//! Well trajectories through the grid and the cells they touch

pub mod results;
pub mod topology;

pub use results::{
    WellProductionType, WellResultBranch, WellResultCell, WellResultFrame, WellResults,
};
pub use topology::{cell_for_well_result_cell, find_shared_face, WellCellTopology};
