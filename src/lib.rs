pub mod auth;
pub mod config;
pub mod db;
pub mod session;
pub mod web;

pub use db::DbPool;

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use session::SessionStore;

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let ttl = Duration::from_secs(config.session.ttl_minutes * 60);
        Self {
            config,
            db,
            sessions: SessionStore::new(ttl),
        }
    }
}

pub type SharedState = Arc<AppState>;
