//! Derived-data cache.
//!
//! The matrix and date buckets depend only on the dataset generation and the
//! visible transaction count. A change to either forces a full recompute;
//! repeated reads of the same view (page, partials, JSON) share one result.
//! The generation comes from [`crate::services::dataset::Dataset`], which
//! bumps it on every store.

use std::sync::{Arc, RwLock};

use crate::services::matrix::VolumeMatrix;
use crate::services::time_series::DateBucket;

/// Identifies one filtered view of one loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewKey {
    pub generation: u64,
    pub count: usize,
}

struct Slot<T> {
    inner: RwLock<Option<(ViewKey, Arc<T>)>>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn get(&self, key: ViewKey) -> Option<Arc<T>> {
        let guard = self.inner.read().ok()?;
        match guard.as_ref() {
            Some((stored, val)) if *stored == key => Some(Arc::clone(val)),
            _ => None,
        }
    }

    fn set(&self, key: ViewKey, val: Arc<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some((key, val));
        }
    }

    fn get_or_compute(&self, key: ViewKey, compute: impl FnOnce() -> T) -> Arc<T> {
        if let Some(cached) = self.get(key) {
            return cached;
        }
        let val = Arc::new(compute());
        self.set(key, Arc::clone(&val));
        val
    }
}

pub struct AppCache {
    matrix: Slot<VolumeMatrix>,
    buckets: Slot<Vec<DateBucket>>,
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCache {
    pub fn new() -> Self {
        Self {
            matrix: Slot::new(),
            buckets: Slot::new(),
        }
    }

    pub fn matrix(&self, key: ViewKey, compute: impl FnOnce() -> VolumeMatrix) -> Arc<VolumeMatrix> {
        self.matrix.get_or_compute(key, compute)
    }

    pub fn buckets(
        &self,
        key: ViewKey,
        compute: impl FnOnce() -> Vec<DateBucket>,
    ) -> Arc<Vec<DateBucket>> {
        self.buckets.get_or_compute(key, compute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn key(generation: u64, count: usize) -> ViewKey {
        ViewKey { generation, count }
    }

    #[test]
    fn test_same_key_computes_once() {
        let cache = AppCache::new();
        let calls = Cell::new(0);
        let key = key(1, 10);

        for _ in 0..3 {
            cache.matrix(key, || {
                calls.set(calls.get() + 1);
                VolumeMatrix::default()
            });
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_count_change_recomputes() {
        let cache = AppCache::new();
        let calls = Cell::new(0);
        for count in [10, 20, 10] {
            cache.buckets(key(1, count), || {
                calls.set(calls.get() + 1);
                Vec::new()
            });
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_generation_change_recomputes() {
        let cache = AppCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            VolumeMatrix::default()
        };

        cache.matrix(key(1, 5), compute);
        cache.matrix(key(2, 5), compute);
        assert_eq!(calls.get(), 2);
    }
}
