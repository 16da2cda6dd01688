use serde::{Deserialize, Serialize};

use crate::enums::AnalyticsQuery;
use crate::models::{PostId, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluencerRow {
    pub user: User,
    /// Relationship rows naming this user as `following_id`
    pub follower_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRow {
    pub user: User,
    pub post_count: i64,
    pub comment_count: i64,
    /// `post_count + comment_count`
    pub activity_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingPost {
    pub post_id: PostId,
    pub user_id: UserId,
    pub username: String,
    pub content: String,
    pub likes: i64,
    pub comment_count: i64,
    /// `likes + comment_count`
    pub engagement_score: i64,
}

/// Analytics rows plus how long the store took to produce them
#[derive(Debug, Serialize, Deserialize)]
pub struct TimedResponse<T> {
    pub query: AnalyticsQuery,
    pub limit: i64,
    pub elapsed_ms: f64,
    pub rows: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTiming {
    pub query: AnalyticsQuery,
    pub rows: usize,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub limit: i64,
    pub without_indexes: Vec<QueryTiming>,
    pub with_indexes: Vec<QueryTiming>,
}

impl BenchmarkReport {
    /// Pair up timings for the same query across both runs
    pub fn comparisons(&self) -> Vec<(AnalyticsQuery, f64, f64)> {
        self.without_indexes
            .iter()
            .filter_map(|before| {
                self.with_indexes
                    .iter()
                    .find(|after| after.query == before.query)
                    .map(|after| (before.query, before.elapsed_ms, after.elapsed_ms))
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub indexes: Vec<String>,
}
