use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use socialytics_types::{NewUser, UpdateUser, User, UserId, UserProfile};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::{PostRepository, RelationshipRepository, UserRepository},
    state::AppState,
};

fn require_user(repo: &UserRepository, user_id: UserId) -> ApiResult<User> {
    repo.get_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))
}

/// GET /users - Newest users first
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = UserRepository::new(state.db.pool.clone()).list_all()?;
    Ok(Json(users))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = UserRepository::new(state.db.pool.clone()).create(&payload)?;
    tracing::info!("Created user {} ({})", user.username, user.user_id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/:id - User with post and follow counts
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<UserProfile>> {
    let user = require_user(&UserRepository::new(state.db.pool.clone()), user_id)?;
    let post_count = PostRepository::new(state.db.pool.clone()).count_by_user(user_id)?;
    let relationships = RelationshipRepository::new(state.db.pool.clone());

    Ok(Json(UserProfile {
        user,
        post_count,
        follower_count: relationships.follower_count(user_id)?,
        following_count: relationships.following_count(user_id)?,
    }))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let user = UserRepository::new(state.db.pool.clone()).update(user_id, &payload)?;
    Ok(Json(user))
}

/// DELETE /users/:id - Removes the user's posts, comments and follows too
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<serde_json::Value>> {
    UserRepository::new(state.db.pool.clone()).delete(user_id)?;
    tracing::info!("Deleted user {}", user_id);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "User deleted successfully",
        "user_id": user_id
    })))
}

/// GET /users/:id/followers
pub async fn get_followers(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<Vec<User>>> {
    require_user(&UserRepository::new(state.db.pool.clone()), user_id)?;
    let followers = RelationshipRepository::new(state.db.pool.clone()).followers_of(user_id)?;
    Ok(Json(followers))
}

/// GET /users/:id/following
pub async fn get_following(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<Vec<User>>> {
    require_user(&UserRepository::new(state.db.pool.clone()), user_id)?;
    let following = RelationshipRepository::new(state.db.pool.clone()).following_of(user_id)?;
    Ok(Json(following))
}
