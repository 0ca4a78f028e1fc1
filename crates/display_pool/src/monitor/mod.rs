//! Periodic statistics reporting
//!
//! [`StatsMonitor`] gathers pool and cache counters into a text report on a
//! fixed virtual-time interval. The host routes the text wherever it likes
//! (UI overlay, console); the monitor also logs it at info level.

use crate::cache::{ResourceCache, ResourceLoader, ResourceSize};
use crate::foundation::time::{Countdown, TickClock};
use crate::pool::PoolStats;

/// Interval-gated, tick-driven statistics reporter
pub struct StatsMonitor {
    interval: f32,
    countdown: Countdown,
    clock: TickClock,
}

impl StatsMonitor {
    /// Create a monitor reporting every `interval` seconds of virtual time
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            countdown: Countdown::new(interval),
            clock: TickClock::new(),
        }
    }

    /// Advance by `delta` seconds, producing a report when the interval elapses
    pub fn on_tick<L>(
        &mut self,
        delta: f32,
        pool: PoolStats,
        cache: &ResourceCache<L>,
    ) -> Option<String>
    where
        L: ResourceLoader,
        L::Resource: ResourceSize,
    {
        self.clock.advance(delta);
        if !self.countdown.tick(delta) {
            return None;
        }
        self.countdown.reset(self.interval);

        let stats = cache.stats();
        let report = format!(
            "=== RESOURCE MONITOR ===\n\
             uptime: {:.1}s ({} ticks, {:.1}/s)\n\
             pool: available={} active={} total={}\n\
             cache: loads={} hits={} cached={}\n\
             texture memory: {:.2} MB",
            self.clock.total_time(),
            self.clock.tick_count(),
            self.clock.average_tick_rate(),
            pool.available,
            pool.active,
            pool.total,
            stats.loads,
            stats.hits,
            stats.cached,
            stats.bytes as f32 / 1024.0 / 1024.0,
        );
        log::info!("{report}");
        Some(report)
    }

    /// Total virtual time observed
    pub fn uptime(&self) -> f32 {
        self.clock.total_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LoadError;

    struct ByteLoader;

    struct Blob(usize);

    impl ResourceSize for Blob {
        fn size_bytes(&self) -> usize {
            self.0
        }
    }

    impl ResourceLoader for ByteLoader {
        type Resource = Blob;

        fn load(&mut self, key: &str) -> Result<Blob, LoadError> {
            Ok(Blob(key.len()))
        }
    }

    fn pool_stats() -> PoolStats {
        PoolStats {
            available: 3,
            active: 2,
            total: 5,
        }
    }

    #[test]
    fn fires_only_on_interval() {
        let mut monitor = StatsMonitor::new(1.0);
        let cache = ResourceCache::new(ByteLoader);

        assert!(monitor.on_tick(0.4, pool_stats(), &cache).is_none());
        assert!(monitor.on_tick(0.4, pool_stats(), &cache).is_none());
        assert!(monitor.on_tick(0.4, pool_stats(), &cache).is_some());
    }

    #[test]
    fn fires_repeatedly() {
        let mut monitor = StatsMonitor::new(0.5);
        let cache = ResourceCache::new(ByteLoader);
        let mut reports = 0;
        for _ in 0..10 {
            if monitor.on_tick(0.25, pool_stats(), &cache).is_some() {
                reports += 1;
            }
        }
        assert_eq!(reports, 5);
    }

    #[test]
    fn report_contains_counters() {
        let mut monitor = StatsMonitor::new(1.0);
        let mut cache = ResourceCache::new(ByteLoader);
        cache.load("four").unwrap();
        cache.load("four").unwrap();

        let report = monitor.on_tick(1.0, pool_stats(), &cache).unwrap();
        assert!(report.contains("available=3 active=2 total=5"));
        assert!(report.contains("loads=1 hits=1 cached=1"));
    }
}
