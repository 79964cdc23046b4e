//! Scalar result storage for one porosity model
//!
//! Results are registered by property name and hold one value array per time
//! step. The producing reader decides whether a property is stored densely
//! (one slot per global cell) or compacted (one slot per active cell).

use crate::core_types::{CacheState, PorosityModel};
use crate::error::GridError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Physical layout of a result array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLayout {
    /// One value per global cell, active or not
    Dense,
    /// One value per active cell, addressed by the compacted result index
    Compacted,
}

/// One named property and its per-time-step values
#[derive(Debug, Clone)]
pub struct ScalarResult {
    name: String,
    layout: StorageLayout,
    /// `None` for a time step that has not been loaded
    time_steps: Vec<Option<Vec<f64>>>,
    /// Finite min/max over all time steps
    min_max: CacheState<Option<(f64, f64)>>,
}

impl ScalarResult {
    fn new(name: String, layout: StorageLayout) -> Self {
        ScalarResult {
            name,
            layout,
            time_steps: Vec::new(),
            min_max: CacheState::Empty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> StorageLayout {
        self.layout
    }

    /// Number of time step slots (some may be empty if not yet loaded)
    pub fn time_step_count(&self) -> usize {
        self.time_steps.len()
    }

    /// Values at a time step; `None` if that step has not been loaded.
    ///
    /// A loaded step may be empty (compacted storage with no active cells).
    pub fn values(&self, time_step: usize) -> Option<&[f64]> {
        self.time_steps.get(time_step).and_then(Option::as_deref)
    }

    fn set_values(&mut self, time_step: usize, values: Vec<f64>) {
        if self.time_steps.len() <= time_step {
            self.time_steps.resize_with(time_step + 1, || None);
        }
        self.time_steps[time_step] = Some(values);
        self.min_max.invalidate();
    }

    fn clear_values(&mut self) {
        self.time_steps.clear();
        self.min_max.invalidate();
    }

    /// Smallest and largest finite value over all loaded time steps
    pub fn min_max(&mut self) -> Option<(f64, f64)> {
        let time_steps = &self.time_steps;
        *self.min_max.get_or_insert_with(|| {
            time_steps
                .iter()
                .flatten()
                .flatten()
                .copied()
                .filter(|value| value.is_finite())
                .fold(None, |range, value| match range {
                    None => Some((value, value)),
                    Some((min, max)) => Some((min.min(value), max.max(value))),
                })
        })
    }
}

/// All scalar results of one porosity model
#[derive(Debug, Clone)]
pub struct ResultStore {
    porosity_model: PorosityModel,
    results: Vec<ScalarResult>,
    name_to_index: FxHashMap<String, usize>,
}

impl ResultStore {
    pub fn new(porosity_model: PorosityModel) -> Self {
        ResultStore {
            porosity_model,
            results: Vec::new(),
            name_to_index: FxHashMap::default(),
        }
    }

    pub fn porosity_model(&self) -> PorosityModel {
        self.porosity_model
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn find_result_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Index of the result called `name`, registering it if new.
    ///
    /// An existing result keeps the layout it was registered with.
    pub fn find_or_add_result(&mut self, name: &str, layout: StorageLayout) -> usize {
        if let Some(index) = self.find_result_index(name) {
            trace!(name, index, "Result already registered");
            return index;
        }
        let index = self.results.len();
        self.results.push(ScalarResult::new(name.to_string(), layout));
        self.name_to_index.insert(name.to_string(), index);
        debug!(model = %self.porosity_model, name, index, ?layout, "Registered scalar result");
        index
    }

    /// Registered names in index order
    pub fn result_names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(ScalarResult::name)
    }

    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered index.
    pub fn result(&self, index: usize) -> Result<&ScalarResult, GridError> {
        self.results.get(index).ok_or(GridError::ResultIndexOutOfRange {
            index,
            result_count: self.results.len(),
        })
    }

    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered index.
    pub fn result_mut(&mut self, index: usize) -> Result<&mut ScalarResult, GridError> {
        let result_count = self.results.len();
        self.results
            .get_mut(index)
            .ok_or(GridError::ResultIndexOutOfRange {
                index,
                result_count,
            })
    }

    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered index.
    pub fn time_step_count(&self, index: usize) -> Result<usize, GridError> {
        Ok(self.result(index)?.time_step_count())
    }

    /// Store the values of one time step. Length is not checked here; see
    /// `ReservoirCase::set_scalar_values` for the layout-aware entry point.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered index.
    pub fn set_time_step_values(&mut self, index: usize, time_step: usize, values: Vec<f64>) -> Result<(), GridError> {
        self.result_mut(index)?.set_values(time_step, values);
        Ok(())
    }

    /// Cached finite value range of a result over all time steps
    ///
    /// # Errors
    ///
    /// Returns `GridError::ResultIndexOutOfRange` for an unregistered index.
    pub fn min_max(&mut self, index: usize) -> Result<Option<(f64, f64)>, GridError> {
        Ok(self.result_mut(index)?.min_max())
    }

    /// Unload every time step of the compacted results, keeping their
    /// registrations. Compacted arrays are laid out against one set of
    /// active flags and cannot be read under another.
    pub fn clear_compacted_values(&mut self) {
        let mut cleared = 0;
        for result in &mut self.results {
            if result.layout == StorageLayout::Compacted && !result.time_steps.is_empty() {
                result.clear_values();
                cleared += 1;
            }
        }
        if cleared > 0 {
            debug!(model = %self.porosity_model, results = cleared, "Unloaded compacted results");
        }
    }

    /// Drop every registered result (grid reload)
    pub fn clear(&mut self) {
        self.results.clear();
        self.name_to_index.clear();
    }
}
