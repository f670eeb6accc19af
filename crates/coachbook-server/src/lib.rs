//! Coachbook HTTP server: configuration, seeding, and application assembly.

pub mod error;

pub use error::{Error, Result};

use std::{path::{Path, PathBuf}, sync::Arc};

use axum::Router;
use chrono::FixedOffset;
use coachbook_core::{
  legacy,
  store::{ImportSummary, PracticeStore},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `COACHBOOK_*` environment variables. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Calendar used for the dashboard's week and month windows.
  pub utc_offset: String,
  /// JSON snapshot imported into the empty store at startup.
  pub seed_path:  Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      utc_offset: "+00:00".to_string(),
      seed_path:  None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Parse [`Self::utc_offset`].
  pub fn offset(&self) -> Result<FixedOffset> {
    self
      .utc_offset
      .trim()
      .parse()
      .map_err(|source| Error::InvalidOffset { value: self.utc_offset.clone(), source })
  }
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Import a seed document (current or legacy shape) into `store`.
pub async fn seed_from_str<S>(store: &S, json: &str) -> Result<ImportSummary>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let records = legacy::load_snapshot(json)?;
  Ok(store.import(records).await?)
}

/// Read `path` and import it with [`seed_from_str`].
pub async fn seed_from_file<S>(store: &S, path: &Path) -> Result<ImportSummary>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let json = tokio::fs::read_to_string(path)
    .await
    .map_err(|source| Error::SeedRead { path: path.to_path_buf(), source })?;
  let summary = seed_from_str(store, &json).await?;

  tracing::info!(
    path = %path.display(),
    clients = summary.clients,
    sessions = summary.sessions,
    payments = summary.payments,
    "seeded store"
  );
  Ok(summary)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Mount the JSON API under `/api` with request tracing.
pub fn build_app<S>(store: Arc<S>, utc_offset: FixedOffset) -> Router
where
  S: PracticeStore<Error = coachbook_core::Error> + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", coachbook_api::api_router(store, utc_offset))
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
