use std::sync::Arc;

use medterm_config::Config;
use medterm_core::status::StatusController;
use tokio::sync::{Mutex, RwLock};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Sole owner of the current analysis state
    pub status: Mutex<StatusController>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            status: Mutex::new(StatusController::new()),
        }
    }
}
