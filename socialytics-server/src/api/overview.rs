use axum::{extract::State, Json};
use socialytics_types::Overview;

use crate::{
    api::ApiResult,
    db::repositories::{AnalyticsRepository, PostRepository, UserRepository},
    state::AppState,
};

/// Posts shown on the overview page
const RECENT_POSTS: i64 = 20;

/// GET /overview - Table counts, all users, and the most recent posts
pub async fn get_overview(State(state): State<AppState>) -> ApiResult<Json<Overview>> {
    let counts = AnalyticsRepository::new(state.db.pool.clone()).table_counts()?;
    let users = UserRepository::new(state.db.pool.clone()).list_all()?;
    let posts = PostRepository::new(state.db.pool.clone()).list_recent(RECENT_POSTS)?;

    Ok(Json(Overview {
        counts,
        users,
        posts,
    }))
}
