use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Price history is refetched at most this often.
pub const PRICE_TTL: Duration = Duration::from_secs(5 * 60);
/// The composite sentiment index moves slowly upstream.
pub const SENTIMENT_INDEX_TTL: Duration = Duration::from_secs(60 * 60);

/// Builds a cache key from an operation name and its arguments.
pub fn cache_key(op: &str, args: &[&str]) -> String {
    let mut key = op.to_string();
    for arg in args {
        key.push('|');
        key.push_str(arg);
    }
    key
}

struct CacheEntry<V> {
    data: V,
    cached_at: Instant,
}

/// Time-bounded memo keyed by operation and arguments.
///
/// A lookup older than the TTL is a miss and evicts the entry. The `_at`
/// variants take an explicit instant so expiry can be tested without sleeping.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&self, key: String, value: V) {
        self.put_at(key, value, Instant::now())
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let fresh = self
            .entries
            .get(key)
            .and_then(|entry| self.is_fresh(&entry, now).then(|| entry.data.clone()));
        if fresh.is_none() {
            self.entries
                .remove_if(key, |_, entry| !self.is_fresh(entry, now));
        }
        fresh
    }

    pub fn put_at(&self, key: String, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                data: value,
                cached_at: now,
            },
        );
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.cached_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.put_at("prices|SPY".into(), 1u32, t0);
        assert_eq!(cache.get_at("prices|SPY", t0 + Duration::from_secs(299)), Some(1));
    }

    #[test]
    fn test_miss_after_ttl() {
        let cache = TtlCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.put_at("k".into(), "v".to_string(), t0);
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(300)), None);
        // expired entry is evicted, not resurrected
        assert_eq!(cache.get_at("k", t0), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put(cache_key("prices", &["SPY,QQQ", "3mo"]), 1);
        cache.put(cache_key("prices", &["SPY,QQQ", "1mo"]), 2);
        assert_eq!(cache.get("prices|SPY,QQQ|3mo"), Some(1));
        assert_eq!(cache.get("prices|SPY,QQQ|1mo"), Some(2));
        assert_eq!(cache.get("prices|SPY|3mo"), None);
    }

    #[test]
    fn test_overwrite_refreshes_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.put_at("k".into(), 1, t0);
        cache.put_at("k".into(), 2, t0 + Duration::from_secs(50));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(100)), Some(2));
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = std::sync::Arc::new(TtlCache::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        cache.put(cache_key("prices", &[t.to_string().as_str(), i.to_string().as_str()]), i);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.get("prices|3|99"), Some(99));
        assert_eq!(cache.get("prices|0|0"), Some(0));
    }
}
