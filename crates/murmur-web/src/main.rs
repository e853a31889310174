//! Server binary for Murmur.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use murmur::Board;
use murmur_core::initialize_security_keys;
use murmur_store::SqliteStore;
use murmur_web::{router, Cli, ShutdownSignal};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur=info,murmur_web=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Keys first: nothing is served unless both are usable.
    let keys = initialize_security_keys(&cli.key_paths()).context("loading security keys")?;

    let store = SqliteStore::open(&cli.database)
        .with_context(|| format!("opening database {}", cli.database.display()))?;

    let board = Arc::new(Board::new(Arc::new(keys), store, cli.board_config()));
    let app = router(board, &cli.assets_dir);

    let shutdown = ShutdownSignal::install().context("installing signal handlers")?;

    let addr = cli.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("murmur listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.wait())
        .await
        .context("serving")?;

    info!("shut down");
    Ok(())
}
