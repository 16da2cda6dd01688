use serde::{Deserialize, Serialize};

/// The fixed catalog of dashboard analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsQuery {
    TopInfluencers,
    MostActiveUsers,
    TrendingPosts,
}

impl AnalyticsQuery {
    pub const ALL: [AnalyticsQuery; 3] = [
        AnalyticsQuery::TopInfluencers,
        AnalyticsQuery::MostActiveUsers,
        AnalyticsQuery::TrendingPosts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsQuery::TopInfluencers => "top_influencers",
            AnalyticsQuery::MostActiveUsers => "most_active_users",
            AnalyticsQuery::TrendingPosts => "trending_posts",
        }
    }

    /// Human label used by the dashboard and the CLI
    pub fn label(&self) -> &'static str {
        match self {
            AnalyticsQuery::TopInfluencers => "Top Influencers",
            AnalyticsQuery::MostActiveUsers => "Most Active Users",
            AnalyticsQuery::TrendingPosts => "Trending Posts",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "top_influencers" | "influencers" => Some(AnalyticsQuery::TopInfluencers),
            "most_active_users" | "most_active" | "active" => Some(AnalyticsQuery::MostActiveUsers),
            "trending_posts" | "trending" => Some(AnalyticsQuery::TrendingPosts),
            _ => None,
        }
    }
}
