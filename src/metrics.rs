//! Lightweight global metrics for HiveKV.
//!
//! Thread-safe atomic counters for the two cores:
//! - Seq (buffer growths, refused allocations)
//! - Map (bucket resizes, rehashed entries)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Seq -----
static SEQ_GROWTHS_TOTAL: AtomicU64 = AtomicU64::new(0);
static ALLOC_FAILURES_TOTAL: AtomicU64 = AtomicU64::new(0);

// ----- Map -----
static MAP_RESIZES_TOTAL: AtomicU64 = AtomicU64::new(0);
static MAP_REHASHED_ENTRIES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    // Seq
    pub seq_growths_total: u64,
    pub alloc_failures_total: u64,

    // Map
    pub map_resizes_total: u64,
    pub map_rehashed_entries: u64,
}

impl MetricsSnapshot {
    pub fn avg_rehashed_per_resize(&self) -> f64 {
        if self.map_resizes_total == 0 {
            0.0
        } else {
            self.map_rehashed_entries as f64 / self.map_resizes_total as f64
        }
    }
}

// ----- Recorders (Seq) -----
pub fn record_seq_growth() {
    SEQ_GROWTHS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn record_alloc_failure() {
    ALLOC_FAILURES_TOTAL.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Map) -----
pub fn record_map_resize(rehashed_entries: u64) {
    MAP_RESIZES_TOTAL.fetch_add(1, Ordering::Relaxed);
    MAP_REHASHED_ENTRIES.fetch_add(rehashed_entries, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        seq_growths_total: SEQ_GROWTHS_TOTAL.load(Ordering::Relaxed),
        alloc_failures_total: ALLOC_FAILURES_TOTAL.load(Ordering::Relaxed),

        map_resizes_total: MAP_RESIZES_TOTAL.load(Ordering::Relaxed),
        map_rehashed_entries: MAP_REHASHED_ENTRIES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SEQ_GROWTHS_TOTAL.store(0, Ordering::Relaxed);
    ALLOC_FAILURES_TOTAL.store(0, Ordering::Relaxed);

    MAP_RESIZES_TOTAL.store(0, Ordering::Relaxed);
    MAP_REHASHED_ENTRIES.store(0, Ordering::Relaxed);
}
