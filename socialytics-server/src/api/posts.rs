use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use socialytics_types::{
    Comment, CreateCommentRequest, NewComment, NewPost, Post, PostId, UpdatePost, UserId,
};

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::{CommentRepository, PostRepository},
    state::AppState,
};

/// Posts returned when no limit is given
const DEFAULT_POST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct GetPostsQuery {
    pub limit: Option<i64>,
    pub user_id: Option<UserId>,
}

fn require_post(repo: &PostRepository, post_id: PostId) -> ApiResult<Post> {
    repo.get_by_id(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", post_id)))
}

/// GET /posts?limit=N&user_id=ID - Newest first, optionally for one author
pub async fn get_posts(
    State(state): State<AppState>,
    Query(query): Query<GetPostsQuery>,
) -> ApiResult<Json<Vec<Post>>> {
    let repo = PostRepository::new(state.db.pool.clone());

    let limit = query.limit.unwrap_or(DEFAULT_POST_LIMIT);
    if limit <= 0 {
        return Err(ApiError::BadRequest(format!(
            "Limit must be a positive integer, got {}",
            limit
        )));
    }

    let mut posts = match query.user_id {
        Some(user_id) => repo.list_by_user(user_id)?,
        None => repo.list_recent(limit)?,
    };
    posts.truncate(limit as usize);

    Ok(Json(posts))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<NewPost>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = PostRepository::new(state.db.pool.clone()).create(&payload)?;
    tracing::info!("User {} created post {}", post.user_id, post.post_id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<Post>> {
    let repo = PostRepository::new(state.db.pool.clone());
    Ok(Json(require_post(&repo, post_id)?))
}

/// PUT /posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
    Json(payload): Json<UpdatePost>,
) -> ApiResult<Json<Post>> {
    let post = PostRepository::new(state.db.pool.clone()).update(post_id, &payload)?;
    Ok(Json(post))
}

/// DELETE /posts/:id - Comments on the post go with it
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    PostRepository::new(state.db.pool.clone()).delete(post_id)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Post deleted successfully",
        "post_id": post_id
    })))
}

/// GET /posts/:id/comments - Oldest first
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<Vec<Comment>>> {
    require_post(&PostRepository::new(state.db.pool.clone()), post_id)?;
    let comments = CommentRepository::new(state.db.pool.clone()).list_by_post(post_id)?;
    Ok(Json(comments))
}

/// POST /posts/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
    Json(payload): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    require_post(&PostRepository::new(state.db.pool.clone()), post_id)?;

    let comment = CommentRepository::new(state.db.pool.clone()).create(&NewComment {
        post_id,
        user_id: payload.user_id,
        content: payload.content,
    })?;

    Ok((StatusCode::CREATED, Json(comment)))
}
