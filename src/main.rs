//! chirpy: HTTP server for posts and users backed by a JSON file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chirpy_store::server::{router, AppState};
use chirpy_store::Store;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(about = "Serve posts and users from a JSON file over HTTP")]
struct Cli {
    /// Path to the JSON database
    #[arg(long, env = "CHIRPY_DB_PATH", default_value = "database.json")]
    db_path: PathBuf,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Directory served under /app
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Write indented JSON
    #[arg(long)]
    pretty: bool,

    /// Delete the database before serving
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chirpy_store=info")),
        )
        .init();

    let cli = Cli::parse();

    let store = Store::builder(&cli.db_path)
        .pretty(cli.pretty)
        .build()
        .context("cannot open database")?;
    if cli.reset {
        store.reset().context("cannot reset database")?;
    }

    let state = AppState::new(Arc::new(store));
    let app = router(state, &cli.root);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    info!("Serving files from {} on port: {}", cli.root.display(), cli.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
