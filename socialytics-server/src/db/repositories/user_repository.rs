use rusqlite::OptionalExtension;

use socialytics_types::{NewUser, UpdateUser, User, UserId};

use crate::db::error::StoreError;
use crate::db::rows::{self, USER_COLUMNS};
use crate::db::DbPool;

pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user; `created_at` is assigned by the database
    pub fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let username = user.username.trim();
        let email = user.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(StoreError::Invalid("Username and email are required".to_string()));
        }

        let user_id = {
            let conn = self.pool.get()?;
            conn.execute(
                "INSERT INTO Users (username, email) VALUES (?, ?)",
                (username, email),
            )?;
            conn.last_insert_rowid()
        };

        tracing::debug!("Created user {} ({})", username, user_id);
        self.get_by_id(user_id)?
            .ok_or_else(|| StoreError::not_found("User", user_id))
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM Users u WHERE u.user_id = ?", USER_COLUMNS),
                [user_id],
                rows::user,
            )
            .optional()?;
        Ok(user)
    }

    /// Get user by username
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM Users u WHERE u.username = ?", USER_COLUMNS),
                [username],
                rows::user,
            )
            .optional()?;
        Ok(user)
    }

    /// All users, newest first
    pub fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM Users u ORDER BY u.user_id DESC",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], rows::user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Update username and email
    pub fn update(&self, user_id: UserId, update: &UpdateUser) -> Result<User, StoreError> {
        let username = update.username.trim();
        let email = update.email.trim();
        if username.is_empty() || email.is_empty() {
            return Err(StoreError::Invalid("Username and email are required".to_string()));
        }

        let changed = {
            let conn = self.pool.get()?;
            conn.execute(
                "UPDATE Users SET username = ?, email = ? WHERE user_id = ?",
                (username, email, user_id),
            )?
        };
        if changed == 0 {
            return Err(StoreError::not_found("User", user_id));
        }

        self.get_by_id(user_id)?
            .ok_or_else(|| StoreError::not_found("User", user_id))
    }

    /// Delete a user along with their posts, comments and follows
    pub fn delete(&self, user_id: UserId) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM Users WHERE user_id = ?", [user_id])?;
        if removed == 0 {
            return Err(StoreError::not_found("User", user_id));
        }
        tracing::debug!("Deleted user {}", user_id);
        Ok(())
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM Users", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn repo() -> UserRepository {
        let db = Database::in_memory().expect("Failed to create database");
        db.ensure_schema().expect("Failed to ensure schema");
        UserRepository::new(db.pool)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username.to_lowercase()),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let repo = repo();
        let alice = repo.create(&new_user("Alice")).unwrap();
        let bob = repo.create(&new_user("Bob")).unwrap();

        assert_eq!(alice.user_id, 1);
        assert_eq!(bob.user_id, 2);
        assert_eq!(alice.email, "alice@example.com");
    }

    #[test]
    fn test_duplicate_username_is_rejected() {
        let repo = repo();
        repo.create(&new_user("Alice")).unwrap();

        let err = repo.create(&new_user("Alice")).unwrap_err();
        assert!(err.is_constraint_violation(), "got {:?}", err);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_blank_fields_are_invalid() {
        let repo = repo();
        let err = repo
            .create(&NewUser {
                username: "  ".to_string(),
                email: "x@example.com".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[test]
    fn test_lookup_update_and_list() {
        let repo = repo();
        let alice = repo.create(&new_user("Alice")).unwrap();
        repo.create(&new_user("Bob")).unwrap();

        let found = repo.get_by_username("Alice").unwrap().unwrap();
        assert_eq!(found, alice);

        let updated = repo
            .update(
                alice.user_id,
                &UpdateUser {
                    username: "Alicia".to_string(),
                    email: "alicia@example.com".to_string(),
                },
            )
            .unwrap();
        assert_eq!(updated.username, "Alicia");
        assert_eq!(updated.created_at, alice.created_at);

        let names: Vec<_> = repo.list_all().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["Bob", "Alicia"]);
    }

    #[test]
    fn test_update_and_delete_missing_user() {
        let repo = repo();
        let update = UpdateUser {
            username: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
        };
        assert!(matches!(
            repo.update(42, &update),
            Err(StoreError::NotFound { id: 42, .. })
        ));
        assert!(matches!(repo.delete(42), Err(StoreError::NotFound { .. })));
    }
}
