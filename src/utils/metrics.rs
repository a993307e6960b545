//! Codec Metrics
//!
//! Counters for registry lookups and list encoding, owned by a
//! [`CodecRegistry`](crate::registry::CodecRegistry) and shared with the list
//! codecs it builds.
//!
//! Uses relaxed atomic counters; recording never affects codec results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for codec operations
#[derive(Debug)]
pub struct CodecMetrics {
    /// Successful codec resolutions
    pub resolutions: AtomicU64,
    /// Resolutions that found no codec
    pub resolution_misses: AtomicU64,
    /// Lists encoded
    pub list_encodes: AtomicU64,
    /// Elements written into list envelopes
    pub list_elements_encoded: AtomicU64,
    /// Lists decoded successfully
    pub list_decodes: AtomicU64,
    /// List decodes rejected (missing tag, mismatch, element failure)
    pub list_decode_failures: AtomicU64,
    /// Empty lists accepted without checking their tag
    pub empty_list_tag_bypasses: AtomicU64,
    start_time: Instant,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            resolutions: AtomicU64::new(0),
            resolution_misses: AtomicU64::new(0),
            list_encodes: AtomicU64::new(0),
            list_elements_encoded: AtomicU64::new(0),
            list_decodes: AtomicU64::new(0),
            list_decode_failures: AtomicU64::new(0),
            empty_list_tag_bypasses: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn resolution_hit(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolution_miss(&self) {
        self.resolution_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a list encoded with `element_count` elements
    pub fn list_encoded(&self, element_count: u64) {
        self.list_encodes.fetch_add(1, Ordering::Relaxed);
        self.list_elements_encoded
            .fetch_add(element_count, Ordering::Relaxed);
    }

    pub fn list_decoded(&self) {
        self.list_decodes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn list_decode_failed(&self) {
        self.list_decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn empty_list_bypassed(&self) {
        self.empty_list_tag_bypasses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolutions: self.resolutions.load(Ordering::Relaxed),
            resolution_misses: self.resolution_misses.load(Ordering::Relaxed),
            list_encodes: self.list_encodes.load(Ordering::Relaxed),
            list_elements_encoded: self.list_elements_encoded.load(Ordering::Relaxed),
            list_decodes: self.list_decodes.load(Ordering::Relaxed),
            list_decode_failures: self.list_decode_failures.load(Ordering::Relaxed),
            empty_list_tag_bypasses: self.empty_list_tag_bypasses.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Logs a snapshot of all counters at info level.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            resolutions = snapshot.resolutions,
            resolution_misses = snapshot.resolution_misses,
            list_encodes = snapshot.list_encodes,
            list_elements_encoded = snapshot.list_elements_encoded,
            list_decodes = snapshot.list_decodes,
            list_decode_failures = snapshot.list_decode_failures,
            empty_list_tag_bypasses = snapshot.empty_list_tag_bypasses,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub resolutions: u64,
    pub resolution_misses: u64,
    pub list_encodes: u64,
    pub list_elements_encoded: u64,
    pub list_decodes: u64,
    pub list_decode_failures: u64,
    pub empty_list_tag_bypasses: u64,
    pub uptime_seconds: u64,
}
