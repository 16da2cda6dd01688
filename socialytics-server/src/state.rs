use std::sync::{Arc, Mutex};

use crate::config::Analytics;
use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub default_limit: i64,
    pub trending_limit: i64,
    /// Held while secondary indexes are being dropped, rebuilt or timed
    pub index_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: Database, analytics: &Analytics) -> Self {
        Self {
            db,
            default_limit: analytics.default_limit,
            trending_limit: analytics.trending_limit,
            index_lock: Arc::new(Mutex::new(())),
        }
    }
}
