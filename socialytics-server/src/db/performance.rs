//! Index management and query timing for the "Performance" screen.

use std::time::Instant;

use socialytics_types::{AnalyticsQuery, BenchmarkReport, QueryTiming};

use super::error::{BenchmarkError, QueryError, SchemaError};
use super::repositories::AnalyticsRepository;
use super::Database;

/// Create the secondary indexes; safe to repeat
pub fn create_indexes(db: &Database) -> Result<Vec<String>, SchemaError> {
    let created = db.create_indexes()?;
    tracing::info!("Ensured {} indexes", created.len());
    Ok(created)
}

pub fn drop_indexes(db: &Database) -> Result<(), SchemaError> {
    db.drop_indexes()?;
    tracing::info!("Dropped secondary indexes");
    Ok(())
}

/// Run one catalog query and measure it
pub fn time_query(db: &Database, query: AnalyticsQuery, limit: i64) -> Result<QueryTiming, QueryError> {
    let repo = AnalyticsRepository::new(db.pool.clone());

    let start = Instant::now();
    let rows = match query {
        AnalyticsQuery::TopInfluencers => repo.top_influencers(limit)?.len(),
        AnalyticsQuery::MostActiveUsers => repo.most_active_users(limit)?.len(),
        AnalyticsQuery::TrendingPosts => repo.trending_posts(limit)?.len(),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::debug!("{} returned {} rows in {:.3}ms", query.as_str(), rows, elapsed_ms);
    Ok(QueryTiming {
        query,
        rows,
        elapsed_ms,
    })
}

fn time_catalog(db: &Database, limit: i64) -> Result<Vec<QueryTiming>, QueryError> {
    AnalyticsQuery::ALL
        .iter()
        .map(|query| time_query(db, *query, limit))
        .collect()
}

/// Time every catalog query without, then with, the secondary indexes.
///
/// Indexes are in place when this returns, including on query failure.
/// Callers sharing the database see the unindexed schema while the first pass
/// runs and must not start a second benchmark concurrently.
pub fn benchmark(db: &Database, limit: i64) -> Result<BenchmarkReport, BenchmarkError> {
    drop_indexes(db)?;
    let without_indexes = time_catalog(db, limit);
    create_indexes(db)?;

    let without_indexes = without_indexes?;
    let with_indexes = time_catalog(db, limit)?;

    Ok(BenchmarkReport {
        limit,
        without_indexes,
        with_indexes,
    })
}
