use rusqlite::OptionalExtension;

use socialytics_types::{Comment, CommentId, NewComment, PostId};

use crate::db::error::StoreError;
use crate::db::rows::{self, COMMENT_COLUMNS};
use crate::db::DbPool;

pub struct CommentRepository {
    pool: DbPool,
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a comment; both the post and the author must exist
    pub fn create(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        if comment.content.trim().is_empty() {
            return Err(StoreError::Invalid("Comment content cannot be empty".to_string()));
        }

        let comment_id = {
            let conn = self.pool.get()?;
            conn.execute(
                "INSERT INTO Comments (post_id, user_id, content) VALUES (?, ?, ?)",
                (comment.post_id, comment.user_id, &comment.content),
            )?;
            conn.last_insert_rowid()
        };

        self.get_by_id(comment_id)?
            .ok_or_else(|| StoreError::not_found("Comment", comment_id))
    }

    pub fn get_by_id(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        let conn = self.pool.get()?;
        let comment = conn
            .query_row(
                &format!("SELECT {} FROM Comments c WHERE c.comment_id = ?", COMMENT_COLUMNS),
                [comment_id],
                rows::comment,
            )
            .optional()?;
        Ok(comment)
    }

    /// Comments on a post, oldest first
    pub fn list_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Comments c
             WHERE c.post_id = ?
             ORDER BY c.created_at ASC, c.comment_id ASC",
            COMMENT_COLUMNS
        ))?;

        let comments = stmt
            .query_map([post_id], rows::comment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    pub fn delete(&self, comment_id: CommentId) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM Comments WHERE comment_id = ?", [comment_id])?;
        if removed == 0 {
            return Err(StoreError::not_found("Comment", comment_id));
        }
        Ok(())
    }
}
