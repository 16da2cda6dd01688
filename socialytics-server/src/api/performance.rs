use std::sync::{MutexGuard, TryLockError};

use axum::{
    extract::{Query, State},
    Json,
};
use socialytics_types::{BenchmarkReport, IndexResponse};

use crate::{
    api::{ApiError, ApiResult, LimitQuery},
    db::performance,
    state::AppState,
};

/// Only one index operation runs at a time; a second caller gets 409
fn lock_indexes(state: &AppState) -> ApiResult<MutexGuard<'_, ()>> {
    match state.index_lock.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::WouldBlock) => Err(ApiError::Conflict(
            "An index operation is already running".to_string(),
        )),
        // Guarded value is ()
        Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
    }
}

/// POST /performance/indexes - Create the secondary indexes
pub async fn create_indexes(State(state): State<AppState>) -> ApiResult<Json<IndexResponse>> {
    let _guard = lock_indexes(&state)?;
    let indexes = performance::create_indexes(&state.db)?;
    Ok(Json(IndexResponse { indexes }))
}

/// GET /performance/benchmark?limit=N - Time the catalog without and with indexes
///
/// The secondary indexes are dropped on the shared database for the first
/// pass, so other requests run unindexed until it finishes.
pub async fn benchmark(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<BenchmarkReport>> {
    let limit = query.limit.unwrap_or(state.default_limit);
    let _guard = lock_indexes(&state)?;
    let report = performance::benchmark(&state.db, limit)?;

    for (query, before, after) in report.comparisons() {
        tracing::info!(
            "{}: {:.3}ms without indexes, {:.3}ms with indexes",
            query.label(),
            before,
            after
        );
    }

    Ok(Json(report))
}
