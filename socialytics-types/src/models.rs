use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::timestamp::serde_format;

/// Surrogate keys are SQLite rowids
pub type UserId = i64;
pub type PostId = i64;
pub type CommentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    #[serde(with = "serde_format")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub likes: i64,
    #[serde(with = "serde_format")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    #[serde(with = "serde_format")]
    pub created_at: NaiveDateTime,
}

/// One-way follow edge: `follower_id` follows `following_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub follower_id: UserId,
    pub following_id: UserId,
    #[serde(with = "serde_format")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: UserId,
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    /// Defaults to the insertion time when absent
    #[serde(default, with = "serde_format::option")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePost {
    pub content: String,
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub user_id: UserId,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowRequest {
    pub follower_id: UserId,
    pub following_id: UserId,
}

/// A user with their post and follow counts
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub post_count: i64,
    pub follower_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TableCounts {
    pub users: i64,
    pub posts: i64,
    pub comments: i64,
    pub relationships: i64,
}

/// Everything the "Database Overview" screen shows
#[derive(Debug, Serialize, Deserialize)]
pub struct Overview {
    pub counts: TableCounts,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp;

    #[test]
    fn test_user_serializes_sqlite_timestamp() {
        let user = User {
            user_id: 1,
            username: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: timestamp::parse("2024-01-01 09:00:00").unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["created_at"], "2024-01-01 09:00:00");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_new_post_defaults() {
        let post: NewPost =
            serde_json::from_str(r#"{"user_id": 2, "content": "hello"}"#).unwrap();
        assert_eq!(post.likes, 0);
        assert!(post.created_at.is_none());

        let post: NewPost = serde_json::from_str(
            r#"{"user_id": 2, "content": "hello", "likes": 4, "created_at": "2024-02-03 10:11:12"}"#,
        )
        .unwrap();
        assert_eq!(post.likes, 4);
        assert_eq!(post.created_at, timestamp::parse("2024-02-03 10:11:12"));
    }

    #[test]
    fn test_new_post_rejects_bad_timestamp() {
        let result: Result<NewPost, _> = serde_json::from_str(
            r#"{"user_id": 2, "content": "hello", "created_at": "10:11"}"#,
        );
        assert!(result.is_err());
    }
}
