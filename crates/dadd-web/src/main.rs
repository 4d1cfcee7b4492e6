//! dadd-server binary.
//!
//! Reads `dadd.toml` (or the path specified with `--config`) and `DADD_*`
//! environment variables, opens the SQLite store, and serves the reporting
//! pages over HTTP.
//!
//! # Loading data
//!
//! Countries and `DADD_RECORD` rows are read-only through the web UI. Load
//! them from a SQL script at startup:
//!
//! ```
//! cargo run -p dadd-web --bin dadd-server -- --import data/dadd.sql
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use dadd_store_sqlite::SqliteStore;
use dadd_web::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "DADD reporting server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "dadd.toml")]
  config: PathBuf,

  /// SQL script to run after schema initialisation.
  #[arg(long)]
  import: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DADD"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // A broken database is not fatal: pages fail individually until it is fixed.
  let store = match SqliteStore::connect(&server_cfg.database).await {
    Ok(store) => {
      match store.init_schema().await {
        Ok(()) => tracing::info!(database = ?server_cfg.database, "connected to database"),
        Err(e) => tracing::error!(database = ?server_cfg.database, error = %e, "database initialisation failed"),
      }
      store
    }
    Err(e) => {
      tracing::error!(
        database = ?server_cfg.database,
        error = %e,
        "failed to open database; retrying on each request"
      );
      SqliteStore::deferred(&server_cfg.database)
    }
  };

  if let Some(script) = &cli.import {
    match store.import_file(script).await {
      Ok(()) => tracing::info!(script = ?script, "import complete"),
      Err(e) => tracing::error!(script = ?script, error = %e, "import failed"),
    }
  }

  let app = dadd_web::router(Arc::new(store), &server_cfg);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
