use socialytics_types::{Relationship, User, UserId};

use crate::db::error::StoreError;
use crate::db::rows::{self, RELATIONSHIP_COLUMNS, USER_COLUMNS};
use crate::db::DbPool;

pub struct RelationshipRepository {
    pool: DbPool,
}

impl RelationshipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record that `follower_id` follows `following_id`.
    ///
    /// A pair can only be recorded once; a repeat is a constraint violation.
    /// Following yourself is allowed.
    pub fn follow(&self, follower_id: UserId, following_id: UserId) -> Result<Relationship, StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO Relationships (follower_id, following_id) VALUES (?, ?)",
            (follower_id, following_id),
        )?;

        let relationship = conn.query_row(
            &format!(
                "SELECT {} FROM Relationships r WHERE r.follower_id = ? AND r.following_id = ?",
                RELATIONSHIP_COLUMNS
            ),
            (follower_id, following_id),
            rows::relationship,
        )?;
        Ok(relationship)
    }

    /// Remove a follow; returns whether one existed
    pub fn unfollow(&self, follower_id: UserId, following_id: UserId) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let removed = conn.execute(
            "DELETE FROM Relationships WHERE follower_id = ? AND following_id = ?",
            (follower_id, following_id),
        )?;
        Ok(removed > 0)
    }

    /// Check if user A is following user B
    pub fn is_following(&self, follower_id: UserId, following_id: UserId) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM Relationships WHERE follower_id = ? AND following_id = ?",
            (follower_id, following_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Users following `user_id`, by user id
    pub fn followers_of(&self, user_id: UserId) -> Result<Vec<User>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Relationships r
             JOIN Users u ON u.user_id = r.follower_id
             WHERE r.following_id = ?
             ORDER BY u.user_id ASC",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([user_id], rows::user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Users `user_id` follows, by user id
    pub fn following_of(&self, user_id: UserId) -> Result<Vec<User>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Relationships r
             JOIN Users u ON u.user_id = r.following_id
             WHERE r.follower_id = ?
             ORDER BY u.user_id ASC",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([user_id], rows::user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Get follower count
    pub fn follower_count(&self, user_id: UserId) -> Result<i64, StoreError> {
        let conn = self.pool.get()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM Relationships WHERE following_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn following_count(&self, user_id: UserId) -> Result<i64, StoreError> {
        let conn = self.pool.get()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM Relationships WHERE follower_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::Database;
    use socialytics_types::NewUser;

    fn setup() -> (RelationshipRepository, Vec<UserId>) {
        let db = Database::in_memory().expect("Failed to create database");
        db.ensure_schema().expect("Failed to ensure schema");
        let users = UserRepository::new(db.pool.clone());
        let ids = ["Alice", "Bob", "Charlie"]
            .iter()
            .map(|name| {
                users
                    .create(&NewUser {
                        username: name.to_string(),
                        email: format!("{}@example.com", name.to_lowercase()),
                    })
                    .unwrap()
                    .user_id
            })
            .collect();
        (RelationshipRepository::new(db.pool), ids)
    }

    #[test]
    fn test_follow_and_counts() {
        let (repo, ids) = setup();
        let (alice, bob, charlie) = (ids[0], ids[1], ids[2]);

        let rel = repo.follow(alice, bob).unwrap();
        assert_eq!((rel.follower_id, rel.following_id), (alice, bob));
        repo.follow(charlie, bob).unwrap();

        assert_eq!(repo.follower_count(bob).unwrap(), 2);
        assert_eq!(repo.follower_count(alice).unwrap(), 0);
        assert_eq!(repo.following_count(alice).unwrap(), 1);
        assert!(repo.is_following(alice, bob).unwrap());
        assert!(!repo.is_following(bob, alice).unwrap());

        let followers: Vec<_> = repo.followers_of(bob).unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(followers, vec!["Alice", "Charlie"]);
        let following: Vec<_> = repo.following_of(alice).unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(following, vec!["Bob"]);
    }

    #[test]
    fn test_duplicate_follow_is_rejected() {
        let (repo, ids) = setup();
        repo.follow(ids[0], ids[1]).unwrap();

        let err = repo.follow(ids[0], ids[1]).unwrap_err();
        assert!(err.is_constraint_violation(), "got {:?}", err);
        assert_eq!(repo.follower_count(ids[1]).unwrap(), 1);
    }

    #[test]
    fn test_self_follow_is_allowed() {
        let (repo, ids) = setup();
        repo.follow(ids[2], ids[2]).unwrap();
        assert_eq!(repo.follower_count(ids[2]).unwrap(), 1);
    }

    #[test]
    fn test_follow_unknown_user_violates_foreign_key() {
        let (repo, ids) = setup();
        let err = repo.follow(ids[0], 404).unwrap_err();
        assert!(err.is_constraint_violation(), "got {:?}", err);
        let err = repo.follow(404, ids[0]).unwrap_err();
        assert!(err.is_constraint_violation(), "got {:?}", err);
    }

    #[test]
    fn test_unfollow() {
        let (repo, ids) = setup();
        repo.follow(ids[0], ids[1]).unwrap();

        assert!(repo.unfollow(ids[0], ids[1]).unwrap());
        assert!(!repo.unfollow(ids[0], ids[1]).unwrap());
        assert_eq!(repo.follower_count(ids[1]).unwrap(), 0);
    }
}
