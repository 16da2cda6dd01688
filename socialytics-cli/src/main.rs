mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::{Connection, OpenFlags};
use socialytics_server::db::{
    fixture::{seed_sample_data, SeedOutcome},
    performance,
    repositories::AnalyticsRepository,
    Database,
};
use tracing_subscriber::EnvFilter;

use report::{millis, speedup, Table};

/// Socialytics database utility
///
/// Creates and seeds the analytics store, runs the analytics catalog, and
/// compares query timings with and without the secondary indexes.
#[derive(Parser, Debug)]
#[command(name = "socialytics")]
#[command(about = "Social media analytics over SQLite", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, env = "DATABASE_PATH", default_value = "./socialytics.db", global = true)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Show tables, columns and row counts without modifying the file
    Inspect,

    #[command(flatten)]
    Store(StoreCommand),
}

/// Commands that open the store and bring its schema up to date first
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum StoreCommand {
    /// Create missing tables and indexes
    Init,
    /// Load the Alice/Bob/Charlie sample into an empty database
    Seed,
    /// Users with the most followers
    Influencers {
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
    /// Users with the most posts plus comments
    Active {
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
    /// Posts with the most likes plus comments
    Trending {
        #[arg(short, long, default_value_t = 5)]
        limit: i64,
    },
    /// Create the secondary indexes
    Indexes,
    /// Time the analytics queries without and with indexes
    Bench {
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
}

fn open_database(path: &str) -> Result<Database> {
    let db = Database::new(path)
        .with_context(|| format!("Failed to open database: {}", path))?;
    db.ensure_schema()
        .context("Database schema is incompatible")?;
    Ok(db)
}

/// Run a command against an open database and return what to print
fn run(command: &StoreCommand, db: &Database) -> Result<String> {
    let analytics = AnalyticsRepository::new(db.pool.clone());

    let output = match command {
        StoreCommand::Init => {
            let tables = db.table_names().context("Failed to list tables")?;
            let indexes = db.index_names().context("Failed to list indexes")?;
            format!(
                "Schema ready\nTables: {}\nIndexes: {}",
                tables.join(", "),
                indexes.join(", ")
            )
        }
        StoreCommand::Seed => match seed_sample_data(db).context("Failed to seed sample data")? {
            SeedOutcome::Seeded(ids) => format!(
                "Seeded sample data\nAlice: {}\nBob: {}\nCharlie: {}",
                ids.alice, ids.bob, ids.charlie
            ),
            SeedOutcome::Skipped { existing_users } => format!(
                "Database already has {} users - sample data not loaded.",
                existing_users
            ),
        },
        StoreCommand::Influencers { limit } => {
            let mut table = Table::new(["user_id", "username", "followers"]);
            for row in analytics.top_influencers(*limit)? {
                table.push([
                    row.user.user_id.to_string(),
                    row.user.username,
                    row.follower_count.to_string(),
                ]);
            }
            table.render()
        }
        StoreCommand::Active { limit } => {
            let mut table = Table::new(["user_id", "username", "posts", "comments", "activity"]);
            for row in analytics.most_active_users(*limit)? {
                table.push([
                    row.user.user_id.to_string(),
                    row.user.username,
                    row.post_count.to_string(),
                    row.comment_count.to_string(),
                    row.activity_count.to_string(),
                ]);
            }
            table.render()
        }
        StoreCommand::Trending { limit } => {
            let mut table = Table::new(["post_id", "author", "likes", "comments", "score", "content"]);
            for post in analytics.trending_posts(*limit)? {
                table.push([
                    post.post_id.to_string(),
                    post.username,
                    post.likes.to_string(),
                    post.comment_count.to_string(),
                    post.engagement_score.to_string(),
                    post.content,
                ]);
            }
            table.render()
        }
        StoreCommand::Indexes => {
            let indexes = performance::create_indexes(db).context("Failed to create indexes")?;
            format!("Created indexes:\n  {}", indexes.join("\n  "))
        }
        StoreCommand::Bench { limit } => {
            let report = performance::benchmark(db, *limit).context("Benchmark failed")?;
            let mut table = Table::new(["query", "rows", "without indexes", "with indexes", "change"]);
            for (before, after) in report.without_indexes.iter().zip(&report.with_indexes) {
                let change = speedup(before.elapsed_ms, after.elapsed_ms)
                    .map(|pct| format!("{:.1}%", pct))
                    .unwrap_or_else(|| "n/a".to_string());
                table.push([
                    before.query.label().to_string(),
                    after.rows.to_string(),
                    millis(before.elapsed_ms),
                    millis(after.elapsed_ms),
                    change,
                ]);
            }
            table.render()
        }
    };

    Ok(output)
}

/// Describe an existing database file without creating anything in it
fn inspect(path: &str) -> Result<String> {
    if !std::path::Path::new(path).exists() {
        anyhow::bail!("Database file not found: {}", path);
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .context("Failed to open database connection")?;

    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()
        .context("Failed to list tables")?;

    let mut sections = Vec::new();
    for table in &tables {
        let rows: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| row.get(0))
            .with_context(|| format!("Failed to count rows in {}", table))?;

        let mut columns = Table::new(["column", "type", "not null", "pk"]);
        let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{}\")", table))?;
        let infos = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, i64>(5)? > 0,
            ))
        })?;
        for info in infos {
            let (name, sql_type, not_null, pk) = info?;
            columns.push([name, sql_type, not_null.to_string(), pk.to_string()]);
        }

        sections.push(format!("{} ({} rows)\n{}", table, rows, columns.render()));
    }

    if sections.is_empty() {
        return Ok("No tables found".to_string());
    }
    Ok(sections.join("\n\n"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("Using database {}", args.database);

    let output = match &args.command {
        Command::Inspect => inspect(&args.database)?,
        Command::Store(command) => {
            let db = open_database(&args.database)?;
            run(command, &db)?
        }
    };

    println!("{}", output);
    Ok(())
}
