use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use socialytics_types::{ActivityRow, AnalyticsQuery, InfluencerRow, TimedResponse, TrendingPost};

use crate::{
    api::{ApiResult, LimitQuery},
    db::{repositories::AnalyticsRepository, QueryError},
    state::AppState,
};

fn timed<T, F>(query: AnalyticsQuery, limit: i64, run: F) -> ApiResult<Json<TimedResponse<T>>>
where
    F: FnOnce(i64) -> Result<Vec<T>, QueryError>,
{
    let start = Instant::now();
    let rows = run(limit)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::debug!("{} returned {} rows in {:.3}ms", query.as_str(), rows.len(), elapsed_ms);
    Ok(Json(TimedResponse {
        query,
        limit,
        elapsed_ms,
        rows,
    }))
}

/// GET /analytics/top-influencers?limit=N
pub async fn top_influencers(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<TimedResponse<InfluencerRow>>> {
    let repo = AnalyticsRepository::new(state.db.pool.clone());
    let limit = query.limit.unwrap_or(state.default_limit);
    timed(AnalyticsQuery::TopInfluencers, limit, |limit| {
        repo.top_influencers(limit)
    })
}

/// GET /analytics/most-active?limit=N
pub async fn most_active_users(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<TimedResponse<ActivityRow>>> {
    let repo = AnalyticsRepository::new(state.db.pool.clone());
    let limit = query.limit.unwrap_or(state.default_limit);
    timed(AnalyticsQuery::MostActiveUsers, limit, |limit| {
        repo.most_active_users(limit)
    })
}

/// GET /analytics/trending-posts?limit=N
pub async fn trending_posts(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<TimedResponse<TrendingPost>>> {
    let repo = AnalyticsRepository::new(state.db.pool.clone());
    let limit = query.limit.unwrap_or(state.trending_limit);
    timed(AnalyticsQuery::TrendingPosts, limit, |limit| {
        repo.trending_posts(limit)
    })
}
