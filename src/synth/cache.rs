//! Process-lifetime memoization for synthesized metrics.
//!
//! The dashboard refreshes every 30 seconds but must show stable historical
//! data, so each generator runs at most once per distinct (domain, params)
//! key and later requests return the stored value. Keys hash the canonical
//! JSON serialization of the parameters; the full serialization is kept as
//! a fingerprint so a hash collision between distinct parameter sets is
//! detected instead of silently serving the wrong domain data.

use crate::core::error::{OpsdeckError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Cache key: domain identifier plus a hash of the serialized parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    domain: &'static str,
    params_hash: u64,
}

#[derive(Debug)]
struct CacheSlot<V> {
    /// Canonical JSON of the parameters that produced this value.
    fingerprint: String,
    value: Arc<V>,
}

/// Concurrent memoization map from (domain, params) to a generated value.
///
/// `DashMap::entry` holds the shard lock while a vacant entry is filled, so
/// concurrent callers racing on one key still perform a single generation.
#[derive(Debug)]
pub struct SynthCache<V> {
    map: DashMap<CacheKey, CacheSlot<V>>,
}

impl<V> SynthCache<V> {
    pub fn new() -> Self {
        SynthCache {
            map: DashMap::new(),
        }
    }

    /// Returns the cached value for (domain, params), generating it on the
    /// first call. `build` runs at most once per distinct key.
    pub fn get_or_insert_with<P, F>(
        &self,
        domain: &'static str,
        params: &P,
        build: F,
    ) -> Result<Arc<V>>
    where
        P: Serialize,
        F: FnOnce() -> Result<V>,
    {
        let fingerprint = serde_json::to_string(params)?;
        let params_hash = hash_params(&fingerprint);
        self.get_or_insert_hashed(domain, params_hash, fingerprint, build)
    }

    /// Lookup by precomputed hash and fingerprint. Split out so tests can
    /// fabricate a hash collision between distinct parameter sets.
    fn get_or_insert_hashed<F>(
        &self,
        domain: &'static str,
        params_hash: u64,
        fingerprint: String,
        build: F,
    ) -> Result<Arc<V>>
    where
        F: FnOnce() -> Result<V>,
    {
        let key = CacheKey {
            domain,
            params_hash,
        };

        match self.map.entry(key) {
            Entry::Occupied(slot) => {
                if slot.get().fingerprint != fingerprint {
                    return Err(OpsdeckError::CacheKeyCollision {
                        domain,
                        stored: slot.get().fingerprint.clone(),
                        requested: fingerprint,
                    });
                }
                tracing::debug!(domain, "cache hit");
                Ok(Arc::clone(&slot.get().value))
            },
            Entry::Vacant(entry) => {
                tracing::debug!(domain, "cache miss, generating");
                let value = Arc::new(build()?);
                entry.insert(CacheSlot {
                    fingerprint,
                    value: Arc::clone(&value),
                });
                Ok(value)
            },
        }
    }

    /// Drops every cached value. Not called during normal operation; exists
    /// for manual invalidation and for simulating a process restart in
    /// tests.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Number of distinct keys generated so far.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<V> Default for SynthCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_params(fingerprint: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    fingerprint.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Serialize)]
    struct Params {
        n: usize,
    }

    #[test]
    fn test_build_runs_once_per_key() {
        let cache: SynthCache<u64> = SynthCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_insert_with("performance", &Params { n: 30 }, || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(17)
            })
            .unwrap();
        let second = cache
            .get_or_insert_with("performance", &Params { n: 30 }, || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(99)
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*first, 17);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_params_distinct_entries() {
        let cache: SynthCache<u64> = SynthCache::new();
        cache
            .get_or_insert_with("performance", &Params { n: 30 }, || Ok(1))
            .unwrap();
        cache
            .get_or_insert_with("performance", &Params { n: 31 }, || Ok(2))
            .unwrap();
        cache
            .get_or_insert_with("resources", &Params { n: 30 }, || Ok(3))
            .unwrap();
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_clear_allows_regeneration() {
        let cache: SynthCache<u64> = SynthCache::new();
        let v1 = cache
            .get_or_insert_with("drift", &Params { n: 50 }, || Ok(1))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
        let v2 = cache
            .get_or_insert_with("drift", &Params { n: 50 }, || Ok(2))
            .unwrap();
        assert_eq!(*v1, 1);
        assert_eq!(*v2, 2);
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let cache: SynthCache<u64> = SynthCache::new();
        let err = cache.get_or_insert_with("drift", &Params { n: 0 }, || {
            Err(OpsdeckError::invalid_parameter("n", "zero"))
        });
        assert!(err.is_err());
        assert!(cache.is_empty());

        let ok = cache
            .get_or_insert_with("drift", &Params { n: 0 }, || Ok(5))
            .unwrap();
        assert_eq!(*ok, 5);
    }

    #[test]
    fn test_fabricated_collision_is_fatal() {
        let cache: SynthCache<u64> = SynthCache::new();
        // Force two distinct parameter sets onto the same hashed key.
        cache
            .get_or_insert_hashed("performance", 12345, "{\"n\":30}".to_string(), || Ok(1))
            .unwrap();

        let err = cache
            .get_or_insert_hashed("performance", 12345, "{\"n\":31}".to_string(), || Ok(2))
            .unwrap_err();
        assert!(matches!(err, OpsdeckError::CacheKeyCollision { .. }));
        assert!(!err.is_recoverable());

        // The stored value survives the rejected lookup.
        let v = cache
            .get_or_insert_hashed("performance", 12345, "{\"n\":30}".to_string(), || Ok(3))
            .unwrap();
        assert_eq!(*v, 1);
    }
}
