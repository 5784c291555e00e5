use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::{mapref::entry::Entry, DashMap};

/// Request counter for one client, anchored at the first request of its window.
#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    count: u32,
    window_start: Instant,
}

impl FixedWindow {
    fn new(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }

    /// Whole seconds until the client may retry, never less than one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            RateDecision::Allowed { .. } => None,
            RateDecision::Limited { retry_after } => {
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                Some(secs.max(1))
            }
        }
    }
}

type Key = String;

/// Per-client fixed window limiter shared by every worker.
///
/// Check-and-increment for a key happens under the map shard lock, so two
/// workers can never both take the last slot of a window.
#[derive(Clone, Debug)]
pub struct RateLimiterStore {
    map: Arc<DashMap<Key, FixedWindow>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiterStore {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            max_requests: max_requests.max(1),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        match self.map.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(FixedWindow::new(now));
                RateDecision::Allowed { remaining: self.max_requests - 1 }
            }
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();

                if state.is_expired(now, self.window) {
                    *state = FixedWindow::new(now);
                    return RateDecision::Allowed { remaining: self.max_requests - 1 };
                }

                if state.count >= self.max_requests {
                    let elapsed = now.saturating_duration_since(state.window_start);
                    return RateDecision::Limited {
                        retry_after: self.window.saturating_sub(elapsed),
                    };
                }

                state.count += 1;
                RateDecision::Allowed { remaining: self.max_requests - state.count }
            }
        }
    }

    /// Drops clients whose window has elapsed. Returns how many were removed.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let before = self.map.len();
        self.map.retain(|_, state| !state.is_expired(now, self.window));
        before.saturating_sub(self.map.len())
    }

    /// Number of clients currently tracked.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn sixth_request_in_window_is_limited() {
        let store = RateLimiterStore::new(5, HOUR);
        let start = Instant::now();

        for i in 0..5 {
            let decision = store.check_at("203.0.113.7", start + Duration::from_secs(i));
            assert!(decision.is_allowed(), "request {} should pass", i + 1);
        }

        let sixth = store.check_at("203.0.113.7", start + Duration::from_secs(10));
        assert!(!sixth.is_allowed());
        assert_eq!(sixth.retry_after_secs(), Some(3590));
    }

    #[test]
    fn remaining_counts_down() {
        let store = RateLimiterStore::new(3, HOUR);
        let now = Instant::now();

        assert_eq!(store.check_at("a", now), RateDecision::Allowed { remaining: 2 });
        assert_eq!(store.check_at("a", now), RateDecision::Allowed { remaining: 1 });
        assert_eq!(store.check_at("a", now), RateDecision::Allowed { remaining: 0 });
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let store = RateLimiterStore::new(5, HOUR);
        let start = Instant::now();

        for _ in 0..6 {
            store.check_at("client", start);
        }
        assert!(!store.check_at("client", start + HOUR).is_allowed());

        let later = start + HOUR + Duration::from_secs(1);
        assert_eq!(store.check_at("client", later), RateDecision::Allowed { remaining: 4 });
    }

    #[test]
    fn clients_are_limited_independently() {
        let store = RateLimiterStore::new(1, HOUR);
        let now = Instant::now();

        assert!(store.check_at("one", now).is_allowed());
        assert!(!store.check_at("one", now).is_allowed());
        assert!(store.check_at("two", now).is_allowed());
    }

    #[test]
    fn eviction_removes_only_expired_windows() {
        let store = RateLimiterStore::new(5, HOUR);
        let start = Instant::now();

        store.check_at("old", start);
        store.check_at("fresh", start + HOUR);

        let removed = store.evict_expired(start + HOUR + Duration::from_secs(1));

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn retry_after_rounds_up_to_at_least_one_second() {
        let decision = RateDecision::Limited { retry_after: Duration::from_millis(10) };
        assert_eq!(decision.retry_after_secs(), Some(1));

        let decision = RateDecision::Limited { retry_after: Duration::from_millis(2500) };
        assert_eq!(decision.retry_after_secs(), Some(3));
    }

    #[test]
    fn concurrent_checks_never_exceed_limit() {
        let store = RateLimiterStore::new(5, HOUR);
        let now = Instant::now();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.check_at("shared", now).is_allowed())
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|allowed| *allowed)
            .count();

        assert_eq!(allowed, 5);
    }
}
