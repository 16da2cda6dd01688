use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use socialytics_types::{FollowRequest, Relationship, UserId};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::RelationshipRepository,
    state::AppState,
};

/// POST /relationships - Record that `follower_id` follows `following_id`
pub async fn follow(
    State(state): State<AppState>,
    Json(payload): Json<FollowRequest>,
) -> ApiResult<(StatusCode, Json<Relationship>)> {
    let relationship = RelationshipRepository::new(state.db.pool.clone())
        .follow(payload.follower_id, payload.following_id)?;

    tracing::info!(
        "User {} now follows {}",
        relationship.follower_id,
        relationship.following_id
    );
    Ok((StatusCode::CREATED, Json(relationship)))
}

/// DELETE /relationships/:follower_id/:following_id
pub async fn unfollow(
    State(state): State<AppState>,
    Path((follower_id, following_id)): Path<(UserId, UserId)>,
) -> ApiResult<Json<serde_json::Value>> {
    let removed = RelationshipRepository::new(state.db.pool.clone())
        .unfollow(follower_id, following_id)?;

    if !removed {
        return Err(ApiError::NotFound(format!(
            "User {} does not follow {}",
            follower_id, following_id
        )));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Unfollowed successfully",
        "follower_id": follower_id,
        "following_id": following_id
    })))
}
