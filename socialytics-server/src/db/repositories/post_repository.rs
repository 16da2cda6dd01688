use rusqlite::OptionalExtension;

use socialytics_types::{timestamp, NewPost, Post, PostId, UpdatePost, UserId};

use crate::db::error::StoreError;
use crate::db::rows::{self, POST_COLUMNS};
use crate::db::DbPool;

pub struct PostRepository {
    pool: DbPool,
}

fn validate(content: &str, likes: i64) -> Result<(), StoreError> {
    if content.trim().is_empty() {
        return Err(StoreError::Invalid("Post content cannot be empty".to_string()));
    }
    if likes < 0 {
        return Err(StoreError::Invalid(format!("Likes cannot be negative, got {}", likes)));
    }
    Ok(())
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post
    ///
    /// `created_at` falls back to the insertion time when the caller leaves it out.
    pub fn create(&self, post: &NewPost) -> Result<Post, StoreError> {
        validate(&post.content, post.likes)?;

        let post_id = {
            let conn = self.pool.get()?;
            conn.execute(
                "INSERT INTO Posts (user_id, content, likes, created_at)
                 VALUES (?, ?, ?, COALESCE(?, CURRENT_TIMESTAMP))",
                (
                    post.user_id,
                    &post.content,
                    post.likes,
                    post.created_at.as_ref().map(timestamp::format),
                ),
            )?;
            conn.last_insert_rowid()
        };

        self.get_by_id(post_id)?
            .ok_or_else(|| StoreError::not_found("Post", post_id))
    }

    /// Get a single post by ID
    pub fn get_by_id(&self, post_id: PostId) -> Result<Option<Post>, StoreError> {
        let conn = self.pool.get()?;
        let post = conn
            .query_row(
                &format!("SELECT {} FROM Posts p WHERE p.post_id = ?", POST_COLUMNS),
                [post_id],
                rows::post,
            )
            .optional()?;
        Ok(post)
    }

    /// Most recent posts first
    pub fn list_recent(&self, limit: i64) -> Result<Vec<Post>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Posts p
             ORDER BY p.created_at DESC, p.post_id DESC
             LIMIT ?",
            POST_COLUMNS
        ))?;

        let posts = stmt
            .query_map([limit], rows::post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    /// Get posts by a specific user
    pub fn list_by_user(&self, user_id: UserId) -> Result<Vec<Post>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Posts p
             WHERE p.user_id = ?
             ORDER BY p.created_at DESC, p.post_id DESC",
            POST_COLUMNS
        ))?;

        let posts = stmt
            .query_map([user_id], rows::post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    /// Update content and like counter
    pub fn update(&self, post_id: PostId, update: &UpdatePost) -> Result<Post, StoreError> {
        validate(&update.content, update.likes)?;

        let changed = {
            let conn = self.pool.get()?;
            conn.execute(
                "UPDATE Posts SET content = ?, likes = ? WHERE post_id = ?",
                (&update.content, update.likes, post_id),
            )?
        };
        if changed == 0 {
            return Err(StoreError::not_found("Post", post_id));
        }

        self.get_by_id(post_id)?
            .ok_or_else(|| StoreError::not_found("Post", post_id))
    }

    /// Delete a post and its comments
    pub fn delete(&self, post_id: PostId) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM Posts WHERE post_id = ?", [post_id])?;
        if removed == 0 {
            return Err(StoreError::not_found("Post", post_id));
        }
        Ok(())
    }

    /// Get post count for a user
    pub fn count_by_user(&self, user_id: UserId) -> Result<i64, StoreError> {
        let conn = self.pool.get()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM Posts WHERE user_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
