use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::store::InventoryStore;

/// The store behind a single lock. Every handler holds it for the full
/// read-modify-persist sequence.
pub type SharedStore = Arc<Mutex<InventoryStore>>;

/// The shared application state.
///
/// Cloned into every handler by Axum's `State` extractor; all fields are
/// cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory inventory, mirrored to the data file.
    pub store: SharedStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// The application metrics.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: InventoryStore, config: AppConfig) -> Self {
        Self { store: Arc::new(Mutex::new(store)), config: Arc::new(config), metrics: Metrics::new() }
    }
}
