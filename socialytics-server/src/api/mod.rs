pub mod analytics;
pub mod error;
pub mod overview;
pub mod performance;
pub mod posts;
pub mod relationships;
pub mod users;

use serde::Deserialize;

pub use error::{ApiError, ApiResult};

/// `?limit=` on list and ranking endpoints
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}
