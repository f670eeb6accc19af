//! coachbook server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), optionally seeds
//! the in-memory store from a JSON export, and serves the JSON API over HTTP.
//!
//! ```
//! cargo run -p coachbook-server -- --seed export.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use coachbook_core::memory::MemoryStore;
use coachbook_server::{ServerConfig, build_app, seed_from_file};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Coachbook practice server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// JSON snapshot (current or legacy shape) to import at startup.
  /// Overrides `seed_path` from the configuration.
  #[arg(long)]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("COACHBOOK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  let offset = server_cfg.offset()?;

  let store = Arc::new(MemoryStore::new());
  if let Some(seed) = cli.seed.or_else(|| server_cfg.seed_path.clone()) {
    seed_from_file(store.as_ref(), &seed)
      .await
      .with_context(|| format!("failed to seed store from {seed:?}"))?;
  }

  let app = build_app(store, offset);
  let address = server_cfg.address();

  tracing::info!(%offset, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
