pub mod api;
pub mod config;
pub mod crypto;
pub mod db;

use config::Config;
use std::sync::Arc;

use crate::db::Store;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        Self { config, store }
    }
}
