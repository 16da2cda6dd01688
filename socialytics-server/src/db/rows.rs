//! Row mappers shared by the repositories.
//!
//! Column lists below must stay in the order the mappers read them.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;

use socialytics_types::{timestamp, Comment, Post, Relationship, User};

pub const USER_COLUMNS: &str = "u.user_id, u.username, u.email, u.created_at";
pub const POST_COLUMNS: &str = "p.post_id, p.user_id, p.content, p.likes, p.created_at";
pub const COMMENT_COLUMNS: &str = "c.comment_id, c.post_id, c.user_id, c.content, c.created_at";
pub const RELATIONSHIP_COLUMNS: &str = "r.follower_id, r.following_id, r.created_at";

/// Read a stored timestamp, surfacing bad text as a conversion error
pub fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    timestamp::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid timestamp: {}", raw).into(),
        )
    })
}

/// Map a `User` starting at column `offset`
pub fn user_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get(offset)?,
        username: row.get(offset + 1)?,
        email: row.get(offset + 2)?,
        created_at: timestamp_at(row, offset + 3)?,
    })
}

pub fn user(row: &Row<'_>) -> rusqlite::Result<User> {
    user_at(row, 0)
}

pub fn post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        post_id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        likes: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
    })
}

pub fn comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        comment_id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
    })
}

pub fn relationship(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    Ok(Relationship {
        follower_id: row.get(0)?,
        following_id: row.get(1)?,
        created_at: timestamp_at(row, 2)?,
    })
}
