//! Lookup observability counters.
//!
//! Tracks how translation lookups resolve: straight from the requested
//! locale's table, via the default-locale fallback, or by giving the raw
//! key back. The counters feed log-side diagnostics for untranslated
//! content.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global lookup metrics singleton.
pub struct LookupMetrics {
    /// Lookups resolved from the requested locale's own table
    hits: AtomicUsize,

    /// Lookups resolved from the default locale's table
    default_fallbacks: AtomicUsize,

    /// Lookups that returned the raw key
    key_fallbacks: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<LookupMetrics> = OnceLock::new();

impl LookupMetrics {
    /// Get the global lookup metrics instance.
    pub fn global() -> &'static LookupMetrics {
        METRICS.get_or_init(|| LookupMetrics {
            hits: AtomicUsize::new(0),
            default_fallbacks: AtomicUsize::new(0),
            key_fallbacks: AtomicUsize::new(0),
        })
    }

    /// Record a lookup resolved from the requested locale's table.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup resolved via the default-locale fallback.
    pub fn record_default_fallback(&self) {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that fell through to the raw key.
    pub fn record_key_fallback(&self) {
        self.key_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn default_fallbacks(&self) -> usize {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    pub fn key_fallbacks(&self) -> usize {
        self.key_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> LookupReport {
        let hits = self.hits();
        let default_fallbacks = self.default_fallbacks();
        let key_fallbacks = self.key_fallbacks();
        let total = hits + default_fallbacks + key_fallbacks;

        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        LookupReport {
            hits,
            default_fallbacks,
            key_fallbacks,
            hit_rate,
        }
    }

    /// Reset all counters to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.default_fallbacks.store(0, Ordering::Relaxed);
        self.key_fallbacks.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    /// Lookups resolved from the requested locale's table
    pub hits: usize,

    /// Lookups resolved via the default-locale fallback
    pub default_fallbacks: usize,

    /// Lookups that returned the raw key
    pub key_fallbacks: usize,

    /// Share of lookups resolved without any fallback, as a percentage
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // All tests share the process-wide singleton

    fn reset_metrics() {
        LookupMetrics::global().reset();
    }

    #[test]
    #[serial]
    fn test_record_hit() {
        reset_metrics();
        let metrics = LookupMetrics::global();

        assert_eq!(metrics.hits(), 0);
        metrics.record_hit();
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);
    }

    #[test]
    #[serial]
    fn test_record_default_fallback() {
        reset_metrics();
        let metrics = LookupMetrics::global();

        metrics.record_default_fallback();
        assert_eq!(metrics.default_fallbacks(), 1);
    }

    #[test]
    #[serial]
    fn test_record_key_fallback() {
        reset_metrics();
        let metrics = LookupMetrics::global();

        metrics.record_key_fallback();
        assert_eq!(metrics.key_fallbacks(), 1);
    }

    #[test]
    #[serial]
    fn test_report_empty() {
        reset_metrics();
        let report = LookupMetrics::global().report();

        assert_eq!(report.hits, 0);
        assert_eq!(report.default_fallbacks, 0);
        assert_eq!(report.key_fallbacks, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    #[serial]
    fn test_report_hit_rate() {
        reset_metrics();
        let metrics = LookupMetrics::global();

        // 3 hits, 1 fallback = 75% hit rate
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_key_fallback();

        let report = metrics.report();
        assert_eq!(report.hits, 3);
        assert_eq!(report.key_fallbacks, 1);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    #[serial]
    fn test_report_serializes() {
        reset_metrics();
        let metrics = LookupMetrics::global();
        metrics.record_hit();

        let json = serde_json::to_string(&metrics.report()).expect("serialize");
        assert!(json.contains("\"hits\":1"));
        assert!(json.contains("hit_rate"));
    }

    #[test]
    #[serial]
    fn test_global_returns_same_instance() {
        let metrics1 = LookupMetrics::global();
        let metrics2 = LookupMetrics::global();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(metrics1, metrics2));
    }
}
