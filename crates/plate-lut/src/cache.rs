//! Memoised film print tables.
//!
//! Building a table costs a few thousand `powf` calls; viewers ask for the
//! same parameters once per frame. [`LutCache`] keeps one shared table per
//! distinct parameter set.
//!
//! # Example
//!
//! ```rust
//! use plate_lut::cache::LutCache;
//! use plate_lut::cineon::FilmPrintToLinear;
//! use std::sync::Arc;
//!
//! let cache = LutCache::new();
//! let a = cache.film_print_to_linear(&FilmPrintToLinear::default());
//! let b = cache.film_print_to_linear(&FilmPrintToLinear::default());
//! assert!(Arc::ptr_eq(&a, &b));
//! ```

use crate::Lut1D;
use crate::cineon::{FilmPrintToLinear, LinearToFilmPrint, film_print_to_linear_lut, linear_to_film_print_lut};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Key for cached tables. Gamma is compared bitwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TableKey {
    LinearToFilmPrint { black: i32, white: i32, gamma: u32 },
    FilmPrintToLinear { black: i32, white: i32, gamma: u32, soft_clip: i32 },
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that built a new table.
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<TableKey, Arc<Lut1D>>,
    stats: CacheStats,
}

/// Thread-safe cache of film print tables.
#[derive(Debug, Default)]
pub struct LutCache {
    inner: Mutex<Inner>,
}

impl LutCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear to film print table for `params`.
    pub fn linear_to_film_print(&self, params: &LinearToFilmPrint) -> Arc<Lut1D> {
        let key = TableKey::LinearToFilmPrint {
            black: params.black,
            white: params.white,
            gamma: params.gamma.to_bits(),
        };
        self.get_or_build(key, || linear_to_film_print_lut(params))
    }

    /// Film print to linear table for `params`.
    pub fn film_print_to_linear(&self, params: &FilmPrintToLinear) -> Arc<Lut1D> {
        let key = TableKey::FilmPrintToLinear {
            black: params.black,
            white: params.white,
            gamma: params.gamma.to_bits(),
            soft_clip: params.soft_clip,
        };
        self.get_or_build(key, || film_print_to_linear_lut(params))
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.lock().tables.len()
    }

    /// Whether the cache holds no tables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit and miss counts.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drops every cached table. Tables already handed out stay alive.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.tables.clear();
        inner.stats = CacheStats::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // tables are immutable once inserted, so a poisoned map is still valid
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds outside the lock so distinct tables build in parallel. When two
    /// threads race on one key, the first insert wins and both get it.
    fn get_or_build(&self, key: TableKey, build: impl FnOnce() -> Lut1D) -> Arc<Lut1D> {
        {
            let mut inner = self.lock();
            if let Some(table) = inner.tables.get(&key).cloned() {
                inner.stats.hits += 1;
                return table;
            }
        }

        tracing::debug!(?key, "LUT cache miss");
        let built = Arc::new(build());

        let mut inner = self.lock();
        if let Some(table) = inner.tables.get(&key).cloned() {
            inner.stats.hits += 1;
            return table;
        }
        inner.tables.insert(key, Arc::clone(&built));
        inner.stats.misses += 1;
        built
    }
}
