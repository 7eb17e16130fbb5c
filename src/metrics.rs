use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operation counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub items_created: Arc<AtomicU64>,
    pub items_updated: Arc<AtomicU64>,
    pub items_deleted: Arc<AtomicU64>,
    pub bulk_deletes: Arc<AtomicU64>,
    pub downloads: Arc<AtomicU64>,
    pub persist_failures: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            items_created: Arc::new(AtomicU64::new(0)),
            items_updated: Arc::new(AtomicU64::new(0)),
            items_deleted: Arc::new(AtomicU64::new(0)),
            bulk_deletes: Arc::new(AtomicU64::new(0)),
            downloads: Arc::new(AtomicU64::new(0)),
            persist_failures: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_items_created(&self) {
        self.items_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_items_updated(&self) {
        self.items_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_items_deleted(&self, count: u64) {
        self.items_deleted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_bulk_deletes(&self) {
        self.bulk_deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_downloads(&self) {
        self.downloads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_persist_failures(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_created: self.items_created.load(Ordering::Relaxed),
            items_updated: self.items_updated.load(Ordering::Relaxed),
            items_deleted: self.items_deleted.load(Ordering::Relaxed),
            bulk_deletes: self.bulk_deletes.load(Ordering::Relaxed),
            downloads: self.downloads.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub items_created: u64,
    pub items_updated: u64,
    pub items_deleted: u64,
    pub bulk_deletes: u64,
    pub downloads: u64,
    pub persist_failures: u64,
    pub uptime_seconds: u64,
}
