//! Explicit state for lazily derived artifacts
//!
//! Every derived artifact (active-cell bounds, well-cell membership, result
//! ranges) lives in one `CacheState`. It is filled on first access and only
//! emptied through `invalidate`, so a cache can never be half-valid.

/// Lazily computed value with a single invalidation entry point
#[derive(Debug, Clone, Default)]
pub enum CacheState<T> {
    /// Not computed since creation or the last invalidation
    #[default]
    Empty,
    /// Computed and current
    Valid(T),
}

impl<T> CacheState<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, CacheState::Valid(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            CacheState::Valid(value) => Some(value),
            CacheState::Empty => None,
        }
    }

    /// Drop the cached value; the next access recomputes it
    pub fn invalidate(&mut self) {
        *self = CacheState::Empty;
    }

    /// Return the cached value, computing it with `compute` if empty
    pub fn get_or_insert_with(&mut self, compute: impl FnOnce() -> T) -> &mut T {
        if let CacheState::Empty = self {
            *self = CacheState::Valid(compute());
        }
        match self {
            CacheState::Valid(value) => value,
            CacheState::Empty => unreachable!("cache populated above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_until_invalidated() {
        let mut cache: CacheState<u32> = CacheState::default();
        let mut calls = 0;

        assert!(!cache.is_valid());
        assert_eq!(
            *cache.get_or_insert_with(|| {
                calls += 1;
                7
            }),
            7
        );
        assert_eq!(
            *cache.get_or_insert_with(|| {
                calls += 1;
                9
            }),
            7
        );
        assert_eq!(calls, 1);

        cache.invalidate();
        assert!(cache.get().is_none());
        assert_eq!(*cache.get_or_insert_with(|| 9), 9);
    }
}
