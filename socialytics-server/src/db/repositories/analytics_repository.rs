use socialytics_types::{ActivityRow, InfluencerRow, TableCounts, TrendingPost};

use crate::db::error::{validate_limit, QueryError};
use crate::db::rows::{self, USER_COLUMNS};
use crate::db::DbPool;

/// Read-only aggregate queries behind the dashboard.
///
/// Every ranking breaks ties on the ascending surrogate key, so results are
/// deterministic for a given database state.
pub struct AnalyticsRepository {
    pool: DbPool,
}

impl AnalyticsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Users ranked by how many others follow them.
    ///
    /// Users nobody follows do not appear.
    pub fn top_influencers(&self, limit: i64) -> Result<Vec<InfluencerRow>, QueryError> {
        let limit = validate_limit(limit)?;
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, COUNT(*) AS follower_count
             FROM Users u
             JOIN Relationships r ON r.following_id = u.user_id
             GROUP BY u.user_id
             ORDER BY follower_count DESC, u.user_id ASC
             LIMIT ?",
            USER_COLUMNS
        ))?;

        let influencers = stmt
            .query_map([limit], |row| {
                Ok(InfluencerRow {
                    user: rows::user_at(row, 0)?,
                    follower_count: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(influencers)
    }

    /// Users ranked by posts plus comments authored.
    ///
    /// Counts come from independent subqueries; joining Posts and Comments in
    /// one pass would multiply them together.
    pub fn most_active_users(&self, limit: i64) -> Result<Vec<ActivityRow>, QueryError> {
        let limit = validate_limit(limit)?;
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, post_count, comment_count, post_count + comment_count AS activity_count
             FROM (
                SELECT u.*,
                       (SELECT COUNT(*) FROM Posts p WHERE p.user_id = u.user_id) AS post_count,
                       (SELECT COUNT(*) FROM Comments c WHERE c.user_id = u.user_id) AS comment_count
                FROM Users u
             ) u
             ORDER BY activity_count DESC, u.user_id ASC
             LIMIT ?",
            USER_COLUMNS
        ))?;

        let active = stmt
            .query_map([limit], |row| {
                Ok(ActivityRow {
                    user: rows::user_at(row, 0)?,
                    post_count: row.get(4)?,
                    comment_count: row.get(5)?,
                    activity_count: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(active)
    }

    /// Posts ranked by likes plus number of comments
    pub fn trending_posts(&self, limit: i64) -> Result<Vec<TrendingPost>, QueryError> {
        let limit = validate_limit(limit)?;
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT p.post_id, p.user_id, u.username, p.content, p.likes,
                    COUNT(c.comment_id) AS comment_count,
                    p.likes + COUNT(c.comment_id) AS engagement_score
             FROM Posts p
             JOIN Users u ON u.user_id = p.user_id
             LEFT JOIN Comments c ON c.post_id = p.post_id
             GROUP BY p.post_id
             ORDER BY engagement_score DESC, p.post_id ASC
             LIMIT ?",
        )?;

        let posts = stmt
            .query_map([limit], |row| {
                Ok(TrendingPost {
                    post_id: row.get(0)?,
                    user_id: row.get(1)?,
                    username: row.get(2)?,
                    content: row.get(3)?,
                    likes: row.get(4)?,
                    comment_count: row.get(5)?,
                    engagement_score: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    /// Row counts for the overview screen
    pub fn table_counts(&self) -> Result<TableCounts, QueryError> {
        let conn = self.pool.get()?;
        let counts = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM Users),
                    (SELECT COUNT(*) FROM Posts),
                    (SELECT COUNT(*) FROM Comments),
                    (SELECT COUNT(*) FROM Relationships)",
            [],
            |row| {
                Ok(TableCounts {
                    users: row.get(0)?,
                    posts: row.get(1)?,
                    comments: row.get(2)?,
                    relationships: row.get(3)?,
                })
            },
        )?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixture::{seed_sample_data, SeedOutcome};
    use crate::db::repositories::{CommentRepository, PostRepository, RelationshipRepository};
    use crate::db::Database;
    use socialytics_types::{NewComment, NewPost};

    fn seeded() -> (Database, AnalyticsRepository) {
        let db = Database::in_memory().expect("Failed to create database");
        db.ensure_schema().expect("Failed to ensure schema");
        seed_sample_data(&db).expect("Failed to seed sample data");
        let repo = AnalyticsRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_top_influencers_tie_breaks_on_user_id() {
        let (_db, repo) = seeded();
        let rows = repo.top_influencers(3).unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.user.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
        assert!(rows.iter().all(|r| r.follower_count == 1));
    }

    #[test]
    fn test_top_influencers_truncates_to_limit() {
        let (_db, repo) = seeded();
        let rows = repo.top_influencers(1).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user.username, "Alice");
        assert_eq!(rows[0].follower_count, 1);
    }

    #[test]
    fn test_top_influencers_orders_by_count() {
        let (db, repo) = seeded();
        match seed_sample_data(&db).unwrap() {
            SeedOutcome::Skipped { existing_users } => assert_eq!(existing_users, 3),
            SeedOutcome::Seeded(ids) => panic!("sample data seeded twice: {:?}", ids),
        }

        // Alice also follows Charlie, so Charlie now has two followers
        RelationshipRepository::new(db.pool.clone()).follow(1, 3).unwrap();
        let rows = repo.top_influencers(10).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].user.username, "Charlie");
        assert_eq!(rows[0].follower_count, 2);
        assert_eq!(rows[1].user.username, "Alice");
    }

    #[test]
    fn test_users_without_followers_are_not_influencers() {
        let db = Database::in_memory().unwrap();
        db.ensure_schema().unwrap();
        {
            let conn = db.connection().unwrap();
            conn.execute_batch(
                "INSERT INTO Users (username, email) VALUES ('solo', 'solo@example.com');",
            )
            .unwrap();
        }
        let repo = AnalyticsRepository::new(db.pool.clone());
        assert!(repo.top_influencers(5).unwrap().is_empty());
        // ...but they still show up, last, in activity
        let active = repo.most_active_users(5).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].activity_count, 0);
    }

    #[test]
    fn test_most_active_users_sums_posts_and_comments() {
        let (_db, repo) = seeded();
        let rows = repo.most_active_users(3).unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.user.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
        for row in &rows {
            assert_eq!(row.post_count, 1);
            assert_eq!(row.comment_count, 1);
            assert_eq!(row.activity_count, 2);
        }
    }

    #[test]
    fn test_activity_does_not_multiply_posts_by_comments() {
        let (db, repo) = seeded();
        let posts = PostRepository::new(db.pool.clone());
        let comments = CommentRepository::new(db.pool.clone());

        // Bob: 3 posts, 3 comments -> 6 (a naive double join would report 9)
        for i in 0..2 {
            let post = posts
                .create(&NewPost {
                    user_id: 2,
                    content: format!("extra {}", i),
                    likes: 0,
                    created_at: None,
                })
                .unwrap();
            comments
                .create(&NewComment {
                    post_id: post.post_id,
                    user_id: 2,
                    content: "self reply".to_string(),
                })
                .unwrap();
        }

        let rows = repo.most_active_users(1).unwrap();
        assert_eq!(rows[0].user.username, "Bob");
        assert_eq!(rows[0].post_count, 3);
        assert_eq!(rows[0].comment_count, 3);
        assert_eq!(rows[0].activity_count, 6);
    }

    #[test]
    fn test_trending_posts_scores_likes_plus_comments() {
        let (db, repo) = seeded();
        {
            let conn = db.connection().unwrap();
            conn.execute("UPDATE Posts SET likes = 5 WHERE post_id = 3", []).unwrap();
        }

        let rows = repo.trending_posts(5).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].post_id, 3);
        assert_eq!(rows[0].engagement_score, 6);
        assert_eq!(rows[0].comment_count, 1);
        // Remaining posts tie at 1 and fall back to post id
        assert_eq!(rows[1].post_id, 1);
        assert_eq!(rows[2].post_id, 2);
    }

    #[test]
    fn test_non_positive_limit_is_rejected() {
        let (_db, repo) = seeded();
        assert!(matches!(repo.top_influencers(0), Err(QueryError::InvalidLimit(0))));
        assert!(matches!(repo.most_active_users(-1), Err(QueryError::InvalidLimit(-1))));
        assert!(matches!(repo.trending_posts(0), Err(QueryError::InvalidLimit(0))));
    }

    #[test]
    fn test_empty_database() {
        let db = Database::in_memory().unwrap();
        db.ensure_schema().unwrap();
        let repo = AnalyticsRepository::new(db.pool.clone());

        assert!(repo.top_influencers(10).unwrap().is_empty());
        assert!(repo.most_active_users(10).unwrap().is_empty());
        assert!(repo.trending_posts(10).unwrap().is_empty());
        let counts = repo.table_counts().unwrap();
        assert_eq!(counts.users, 0);
    }

    #[test]
    fn test_table_counts() {
        let (_db, repo) = seeded();
        let counts = repo.table_counts().unwrap();
        assert_eq!(
            (counts.users, counts.posts, counts.comments, counts.relationships),
            (3, 3, 3, 3)
        );
    }
}
