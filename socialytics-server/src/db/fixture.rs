//! Sample data: three users who follow each other in a ring, one post each,
//! and one comment each on the next user's post.
//!
//! Dependent rows reference the ids SQLite actually assigned, never assumed
//! positions.

use rusqlite::Transaction;

use socialytics_types::{PostId, UserId};

use super::error::StoreError;
use super::Database;

const SAMPLE_USERS: [(&str, &str); 3] = [
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
];

const SAMPLE_POSTS: [&str; 3] = [
    "Hello world! My first post.",
    "Learning SQL joins today.",
    "Indexes make everything faster.",
];

const SAMPLE_COMMENTS: [&str; 3] = ["Welcome aboard!", "Great progress!", "So true."];

/// Ids assigned while loading the sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIds {
    pub alice: UserId,
    pub bob: UserId,
    pub charlie: UserId,
    /// Posts by Alice, Bob and Charlie, in that order
    pub posts: [PostId; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(SampleIds),
    /// Users already present; nothing was written
    Skipped { existing_users: i64 },
}

/// Load the sample fixture into an empty database, in one transaction
pub fn seed_sample_data(db: &Database) -> Result<SeedOutcome, StoreError> {
    let mut conn = db.pool.get()?;
    let tx = conn.transaction()?;

    let existing_users: i64 = tx.query_row("SELECT COUNT(*) FROM Users", [], |row| row.get(0))?;
    if existing_users > 0 {
        tracing::debug!("Skipping sample data, {} users already present", existing_users);
        return Ok(SeedOutcome::Skipped { existing_users });
    }

    let ids = insert_sample(&tx)?;
    tx.commit()?;

    tracing::info!(
        "Seeded sample data: users {}, {}, {}",
        ids.alice,
        ids.bob,
        ids.charlie
    );
    Ok(SeedOutcome::Seeded(ids))
}

fn insert_sample(tx: &Transaction<'_>) -> Result<SampleIds, StoreError> {
    let mut users = [0; 3];
    for (slot, (username, email)) in users.iter_mut().zip(SAMPLE_USERS) {
        tx.execute(
            "INSERT INTO Users (username, email) VALUES (?, ?)",
            (username, email),
        )?;
        *slot = tx.last_insert_rowid();
    }

    let mut posts = [0; 3];
    for (i, content) in SAMPLE_POSTS.iter().enumerate() {
        tx.execute(
            "INSERT INTO Posts (user_id, content) VALUES (?, ?)",
            (users[i], content),
        )?;
        posts[i] = tx.last_insert_rowid();
    }

    // Each user comments on the previous user's post: Bob on Alice's, and so on
    for (i, content) in SAMPLE_COMMENTS.iter().enumerate() {
        let author = users[(i + 1) % 3];
        tx.execute(
            "INSERT INTO Comments (post_id, user_id, content) VALUES (?, ?, ?)",
            (posts[i], author, content),
        )?;
    }

    // Alice -> Bob -> Charlie -> Alice
    for i in 0..3 {
        tx.execute(
            "INSERT INTO Relationships (follower_id, following_id) VALUES (?, ?)",
            (users[i], users[(i + 1) % 3]),
        )?;
    }

    Ok(SampleIds {
        alice: users[0],
        bob: users[1],
        charlie: users[2],
        posts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{CommentRepository, RelationshipRepository, UserRepository};

    fn database() -> Database {
        let db = Database::in_memory().expect("Failed to create database");
        db.ensure_schema().expect("Failed to ensure schema");
        db
    }

    #[test]
    fn test_seed_assigns_ids_in_insertion_order() {
        let db = database();
        let ids = match seed_sample_data(&db).unwrap() {
            SeedOutcome::Seeded(ids) => ids,
            other => panic!("expected seed, got {:?}", other),
        };

        assert_eq!((ids.alice, ids.bob, ids.charlie), (1, 2, 3));

        let users = UserRepository::new(db.pool.clone());
        assert_eq!(users.get_by_id(ids.alice).unwrap().unwrap().username, "Alice");
        assert_eq!(users.get_by_id(ids.charlie).unwrap().unwrap().username, "Charlie");
    }

    #[test]
    fn test_seed_wires_rows_by_captured_id() {
        let db = database();
        let SeedOutcome::Seeded(ids) = seed_sample_data(&db).unwrap() else {
            panic!("expected a fresh seed");
        };

        let relationships = RelationshipRepository::new(db.pool.clone());
        assert!(relationships.is_following(ids.alice, ids.bob).unwrap());
        assert!(relationships.is_following(ids.bob, ids.charlie).unwrap());
        assert!(relationships.is_following(ids.charlie, ids.alice).unwrap());

        let comments = CommentRepository::new(db.pool.clone()).list_by_post(ids.posts[0]).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].user_id, ids.bob);
    }

    #[test]
    fn test_seed_runs_once() {
        let db = database();
        assert!(matches!(seed_sample_data(&db).unwrap(), SeedOutcome::Seeded(_)));
        assert_eq!(
            seed_sample_data(&db).unwrap(),
            SeedOutcome::Skipped { existing_users: 3 }
        );
        assert_eq!(UserRepository::new(db.pool.clone()).count().unwrap(), 3);
    }

    #[test]
    fn test_seed_skips_when_users_exist() {
        let db = database();
        {
            let conn = db.connection().unwrap();
            conn.execute("INSERT INTO Users (username, email) VALUES ('Zed', 'zed@example.com')", [])
                .unwrap();
        }

        assert_eq!(
            seed_sample_data(&db).unwrap(),
            SeedOutcome::Skipped { existing_users: 1 }
        );
    }
}
