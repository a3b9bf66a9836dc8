use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use folio::auth::hash_password;
use folio::config::{Cli, Config, ContentBackend};
use folio::content::seed::Seed;
use folio::kv::SqliteKv;
use folio::state::AppState;
use folio::store::PortfolioStore;
use folio::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(ref password) = cli.hash_password {
        println!("{}", hash_password(password)?);
        return Ok(());
    }

    let data_dir = Config::data_dir(&cli)?;
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;
    std::fs::create_dir_all(config.uploads_path())?;

    if config.auth.admin_password_hash.is_empty() {
        tracing::warn!("No admin_password_hash configured; admin login is disabled");
    }

    // Initialize database
    let pool = db::create_pool(&config.db_path())?;
    db::run_migrations(&pool)?;

    let seed = if config.content.seed {
        Seed::sample()
    } else {
        Seed::empty()
    };

    // The theme preference always persists; content only in sqlite mode
    let store = match config.content.backend {
        ContentBackend::Memory => {
            PortfolioStore::in_memory(seed, Box::new(SqliteKv::new(pool.clone())))?
        }
        ContentBackend::Sqlite => PortfolioStore::sqlite(pool.clone(), seed)?,
    };
    tracing::info!("Content backend: {:?}", config.content.backend);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = routes::app(AppState::new(store, config));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
