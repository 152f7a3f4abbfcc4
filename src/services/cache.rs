// src/services/cache.rs
//
// Read-through cache of per-account record lists

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::AppResult;

/// Caches one ordered record list per account, evicting the least
/// recently used account when full. Each service holds its own cache,
/// so dropping an account's entry touches nothing but that list.
pub struct ListCache<T> {
    entries: Mutex<LruCache<Uuid, Vec<T>>>,
}

impl<T: Clone> ListCache<T> {
    /// Capacity counts accounts, not records; zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get_or_load(
        &self,
        user: Uuid,
        load: impl FnOnce() -> AppResult<Vec<T>>,
    ) -> AppResult<Vec<T>> {
        if let Some(records) = self.entries.lock().unwrap().get(&user) {
            return Ok(records.clone());
        }

        // Loaded outside the lock; a concurrent load of the same list
        // just overwrites with an identical value.
        let records = load()?;
        self.entries.lock().unwrap().put(user, records.clone());
        Ok(records)
    }

    pub fn invalidate(&self, user: Uuid) {
        self.entries.lock().unwrap().pop(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_read_hits_the_cache() {
        let cache = ListCache::new(4);
        let user = Uuid::new_v4();
        let mut loads = 0;

        for _ in 0..2 {
            let records = cache
                .get_or_load(user, || {
                    loads += 1;
                    Ok(vec![1, 2, 3])
                })
                .unwrap();
            assert_eq!(records, vec![1, 2, 3]);
        }

        assert_eq!(loads, 1);
    }

    #[test]
    fn test_invalidation_is_per_account() {
        let cache = ListCache::new(4);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        cache.get_or_load(alice, || Ok(vec!["a"])).unwrap();
        cache.get_or_load(bob, || Ok(vec!["b"])).unwrap();
        cache.invalidate(alice);

        let reloaded = cache.get_or_load(alice, || Ok(vec!["a2"])).unwrap();
        assert_eq!(reloaded, vec!["a2"]);

        let untouched = cache.get_or_load(bob, || Ok(vec!["b2"])).unwrap();
        assert_eq!(untouched, vec!["b"]);
    }

    #[test]
    fn test_full_cache_evicts_least_recent_account() {
        let cache = ListCache::new(1);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        cache.get_or_load(alice, || Ok(vec![1])).unwrap();
        cache.get_or_load(bob, || Ok(vec![2])).unwrap();

        let reloaded = cache.get_or_load(alice, || Ok(vec![3])).unwrap();
        assert_eq!(reloaded, vec![3]);
    }
}
