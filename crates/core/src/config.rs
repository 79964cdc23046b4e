//! Case configuration

use serde::{Deserialize, Serialize};

/// Settings controlling how a case derives its cached data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// Case name, used in log output
    pub name: String,

    /// Record the matrix active-cell geometry minimum as the display offset
    /// whenever bounding boxes are computed. When disabled the offset stays
    /// at the origin.
    pub apply_display_offset: bool,

    /// Grids with at least this many cells reduce their geometry bounding
    /// boxes with rayon; smaller grids use a sequential fold.
    pub parallel_cell_threshold: usize,
}

impl CaseConfig {
    /// Default settings with a case name
    pub fn named(name: impl Into<String>) -> Self {
        CaseConfig {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for CaseConfig {
    fn default() -> Self {
        CaseConfig {
            name: "case".to_string(),
            apply_display_offset: true,
            parallel_cell_threshold: 65_536,
        }
    }
}
