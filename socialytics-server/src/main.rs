use std::net::SocketAddr;

use anyhow::Context;
use socialytics_server::{
    config::Settings,
    db::{fixture::{self, SeedOutcome}, Database},
    router,
    state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "socialytics_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new().context("Failed to load settings")?;

    let db = Database::open(&settings.database.path, settings.pool_options())
        .with_context(|| format!("Failed to open database at {}", settings.database.path))?;

    db.ensure_schema()
        .context("Failed to initialize database schema")?;
    tracing::info!("Database initialized at {}", settings.database.path);

    if settings.database.seed_sample_data {
        match fixture::seed_sample_data(&db).context("Failed to seed sample data")? {
            SeedOutcome::Seeded(ids) => tracing::info!(
                "Seeded sample users alice={} bob={} charlie={}",
                ids.alice,
                ids.bob,
                ids.charlie
            ),
            SeedOutcome::Skipped { existing_users } => {
                tracing::info!("Skipping sample data, {} users already present", existing_users)
            }
        }
    }

    let app = router(AppState::new(db, &settings.analytics));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Failed to parse server address")?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
