//! Key-based resource caching
//!
//! A [`ResourceCache`] sits between the host and an underlying
//! [`ResourceLoader`]: the first `load` of a key invokes the loader and
//! caches the result, later loads are served from the cache. The cache is
//! unbounded and never evicts on its own; hosts drop entries explicitly via
//! [`ResourceCache::unload`] or [`ResourceCache::clear`].

use std::collections::HashMap;
use thiserror::Error;

/// Errors from the underlying resource loader
#[derive(Debug, Error)]
pub enum LoadError {
    /// The key did not resolve to any resource
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource exists but its data could not be decoded
    #[error("invalid resource data: {0}")]
    InvalidData(String),

    /// IO error during loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Cache miss whose underlying load also failed
    #[error("cache miss for '{key}' and underlying load failed")]
    NotFound {
        /// The key that failed to resolve
        key: String,
        /// The loader failure
        #[source]
        source: LoadError,
    },
}

/// Loader callback supplied by the host
///
/// This is the seam to the engine: the cache never knows how a resource is
/// produced, only that a key either resolves to one or fails with a
/// [`LoadError`]. Loaders must never return partially-initialized resources.
pub trait ResourceLoader {
    /// The payload type this loader produces
    type Resource;

    /// Perform the underlying load for `key`
    ///
    /// # Errors
    /// Returns a [`LoadError`] when the key does not resolve or its data is
    /// unusable.
    fn load(&mut self, key: &str) -> Result<Self::Resource, LoadError>;
}

/// Resources that can report their in-memory footprint
pub trait ResourceSize {
    /// Payload size in bytes
    fn size_bytes(&self) -> usize;
}

/// Read-only cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Underlying loads performed (misses that succeeded)
    pub loads: u64,
    /// Lookups served from the cache
    pub hits: u64,
    /// Entries currently cached
    pub cached: usize,
    /// Total payload bytes currently cached
    pub bytes: usize,
}

struct CacheEntry<R> {
    resource: R,
    hit_count: u64,
}

/// Cache of loaded resources keyed by string path
///
/// Counters are monotonically non-decreasing for the lifetime of the cache;
/// `unload`/`clear` drop entries but never rewind statistics.
pub struct ResourceCache<L: ResourceLoader> {
    loader: L,
    entries: HashMap<String, CacheEntry<L::Resource>>,
    load_count: u64,
    hit_count: u64,
}

impl<L: ResourceLoader> ResourceCache<L> {
    /// Create a cache around the given loader
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
            load_count: 0,
            hit_count: 0,
        }
    }

    /// Fetch the resource for `key`, loading and caching it on a miss
    ///
    /// A hit increments the hit counter; a successful miss increments the
    /// load counter. Re-invoking after a failure is safe: the cache state is
    /// unchanged by failed loads.
    ///
    /// # Errors
    /// Returns [`CacheError::NotFound`] when the key is not cached and the
    /// underlying load fails.
    pub fn load(&mut self, key: &str) -> Result<&L::Resource, CacheError> {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.hit_count += 1;
            self.hit_count += 1;
            log::debug!("cache hit: '{key}'");
        } else {
            let resource = self.loader.load(key).map_err(|source| {
                log::warn!("cache miss for '{key}' and load failed: {source}");
                CacheError::NotFound {
                    key: key.to_string(),
                    source,
                }
            })?;
            self.load_count += 1;
            log::debug!("cache miss: loaded '{key}'");
            self.entries.insert(
                key.to_string(),
                CacheEntry {
                    resource,
                    hit_count: 0,
                },
            );
        }
        Ok(&self.entries[key].resource)
    }

    /// Whether `key` is currently cached
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop the entry for `key`, returning whether one existed
    pub fn unload(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            log::info!("unloaded '{key}'");
            true
        } else {
            log::debug!("unload ignored: '{key}' not cached");
            false
        }
    }

    /// Drop every cached entry (counters are kept)
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        log::info!("cache cleared: {dropped} entries dropped");
    }

    /// Underlying loads performed so far
    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    /// Lookups served from the cache so far
    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    /// Number of entries currently cached
    pub fn cached_count(&self) -> usize {
        self.entries.len()
    }

    /// Hits recorded against a single cached entry
    pub fn hits_for(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.hit_count)
    }

    /// Access the underlying loader
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Mutable access to the underlying loader
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}

impl<L> ResourceCache<L>
where
    L: ResourceLoader,
    L::Resource: ResourceSize,
{
    /// Total payload bytes currently cached
    pub fn total_bytes(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.resource.size_bytes())
            .sum()
    }

    /// Total payload size currently cached, in megabytes
    pub fn total_megabytes(&self) -> f32 {
        self.total_bytes() as f32 / 1024.0 / 1024.0
    }

    /// Snapshot of all cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            loads: self.load_count,
            hits: self.hit_count,
            cached: self.entries.len(),
            bytes: self.total_bytes(),
        }
    }

    /// Log cache counters at info level
    pub fn log_stats(&self) {
        let stats = self.stats();
        log::info!(
            "ResourceCache stats: loads={} hits={} cached={} memory={:.2} MB",
            stats.loads,
            stats.hits,
            stats.cached,
            stats.bytes as f32 / 1024.0 / 1024.0
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loader producing the key uppercased; keys starting with '!' fail
    struct UpperLoader {
        calls: u32,
    }

    impl ResourceLoader for UpperLoader {
        type Resource = String;

        fn load(&mut self, key: &str) -> Result<String, LoadError> {
            self.calls += 1;
            if key.starts_with('!') {
                Err(LoadError::NotFound(key.to_string()))
            } else {
                Ok(key.to_uppercase())
            }
        }
    }

    impl ResourceSize for String {
        fn size_bytes(&self) -> usize {
            self.len()
        }
    }

    fn cache() -> ResourceCache<UpperLoader> {
        ResourceCache::new(UpperLoader { calls: 0 })
    }

    #[test]
    fn miss_then_hit() {
        let mut cache = cache();
        assert_eq!(cache.load("velkhana").unwrap(), "VELKHANA");
        assert_eq!(cache.load_count(), 1);
        assert_eq!(cache.hit_count(), 0);

        assert_eq!(cache.load("velkhana").unwrap(), "VELKHANA");
        assert_eq!(cache.load_count(), 1);
        assert_eq!(cache.hit_count(), 1);
        assert_eq!(cache.loader().calls, 1);
        assert_eq!(cache.hits_for("velkhana"), Some(1));
    }

    #[test]
    fn unload_forces_reload() {
        let mut cache = cache();
        cache.load("yugo").unwrap();
        assert!(cache.unload("yugo"));
        assert!(!cache.contains("yugo"));

        cache.load("yugo").unwrap();
        assert_eq!(cache.load_count(), 2);
        assert_eq!(cache.hit_count(), 0);
    }

    #[test]
    fn unload_unknown_key_returns_false() {
        let mut cache = cache();
        assert!(!cache.unload("nothing"));
    }

    #[test]
    fn failed_load_leaves_cache_untouched() {
        let mut cache = cache();
        let err = cache.load("!missing").unwrap_err();
        assert!(matches!(err, CacheError::NotFound { ref key, .. } if key == "!missing"));
        assert_eq!(cache.load_count(), 0);
        assert_eq!(cache.cached_count(), 0);

        // Retry is allowed and independent
        assert!(cache.load("!missing").is_err());
        assert_eq!(cache.loader().calls, 2);
    }

    #[test]
    fn clear_keeps_counters() {
        let mut cache = cache();
        cache.load("a").unwrap();
        cache.load("a").unwrap();
        cache.load("b").unwrap();
        cache.clear();

        assert_eq!(cache.cached_count(), 0);
        assert_eq!(cache.load_count(), 2);
        assert_eq!(cache.hit_count(), 1);
    }

    #[test]
    fn three_passes_over_five_keys() {
        // Original tester scenario: 3 passes over 5 keys must produce
        // 5 loads and 10 hits.
        let keys = ["k1", "k2", "k3", "k4", "k5"];
        let mut cache = cache();
        for _ in 0..3 {
            for key in keys {
                cache.load(key).unwrap();
            }
        }
        assert_eq!(cache.load_count(), 5);
        assert_eq!(cache.hit_count(), 10);
        assert_eq!(cache.cached_count(), 5);
    }

    #[test]
    fn byte_accounting_follows_entries() {
        let mut cache = cache();
        cache.load("abcd").unwrap(); // 4 bytes
        cache.load("xy").unwrap(); // 2 bytes
        assert_eq!(cache.total_bytes(), 6);

        cache.unload("abcd");
        assert_eq!(cache.total_bytes(), 2);
        assert_eq!(cache.stats().cached, 1);
    }
}
