use std::time::Instant;

use tokio::time::{interval, MissedTickBehavior};

use crate::limiter::rate_limiter::RateLimiterStore;

/// Drops expired rate-limit windows once per window period.
pub async fn start_rate_limit_eviction_task(limiter: RateLimiterStore) {
    let mut interval = interval(limiter.window());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        let removed = limiter.evict_expired(Instant::now());
        if removed > 0 {
            tracing::info!("Evicted {} expired rate limit entries", removed);
        }
    }
}
