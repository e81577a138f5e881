// Generation metrics
//
// Lightweight counters for the generate/cache/export pipeline

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session-wide performance metrics.
///
/// Uses atomic operations so the registry, the controller and the state
/// manager can share one instance behind an `Arc` without locking.
#[derive(Debug)]
pub struct Metrics {
    /// Generator calls that produced output (cache hits excluded)
    pub generations_succeeded: AtomicUsize,

    /// Generator calls rejected with a validation or variant error
    pub generations_failed: AtomicUsize,

    pub cache_hits: AtomicUsize,

    pub cache_misses: AtomicUsize,

    /// Files handed to a download sink or written by project export
    pub files_exported: AtomicUsize,

    /// Cumulative time spent inside generators, in microseconds
    pub total_generation_time_us: AtomicU64,

    /// Number of state updates performed
    pub state_updates: AtomicU64,

    /// Number of state broadcasts sent
    pub state_broadcasts: AtomicU64,

    /// Broadcasts with no live receiver
    pub state_broadcast_errors: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            generations_succeeded: AtomicUsize::new(0),
            generations_failed: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            files_exported: AtomicUsize::new(0),
            total_generation_time_us: AtomicU64::new(0),
            state_updates: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            state_broadcast_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_generation_succeeded(&self, duration: Duration) {
        self.generations_succeeded.fetch_add(1, Ordering::Relaxed);
        self.total_generation_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_generation_failed(&self) {
        self.generations_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_files_exported(&self, count: usize) {
        self.files_exported.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast_error(&self) {
        self.state_broadcast_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average time per successful generator call in milliseconds
    pub fn avg_generation_time_ms(&self) -> f64 {
        let total = self.total_generation_time_us.load(Ordering::Relaxed);
        let count = self.generations_succeeded.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64 / 1000.0
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Generation Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Generations: {} succeeded, {} failed (avg: {:.3}ms)",
            self.generations_succeeded.load(Ordering::Relaxed),
            self.generations_failed.load(Ordering::Relaxed),
            self.avg_generation_time_ms()
        );
        tracing::info!(
            "Cache: {} hits, {} misses",
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Files exported: {}",
            self.files_exported.load(Ordering::Relaxed)
        );
        tracing::info!(
            "State updates: {}, broadcasts: {}, errors: {}",
            self.state_updates.load(Ordering::Relaxed),
            self.state_broadcasts.load(Ordering::Relaxed),
            self.state_broadcast_errors.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.generations_succeeded.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.cache_hits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_generations() {
        let metrics = Metrics::new();

        metrics.record_generation_succeeded(Duration::from_millis(2));
        metrics.record_generation_succeeded(Duration::from_millis(4));
        metrics.record_generation_failed();

        assert_eq!(metrics.generations_succeeded.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.generations_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.avg_generation_time_ms(), 3.0);
    }

    #[test]
    fn test_avg_generation_time_empty() {
        assert_eq!(Metrics::new().avg_generation_time_ms(), 0.0);
    }

    #[test]
    fn test_cache_and_export_counters() {
        let metrics = Metrics::new();

        metrics.record_cache_hit();
        metrics.record_cache_miss();
        metrics.record_cache_miss();
        metrics.record_files_exported(7);

        assert_eq!(metrics.cache_hits.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.cache_misses.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.files_exported.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
