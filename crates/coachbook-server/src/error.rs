//! Server startup errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid utc_offset {value:?}: expected e.g. \"+02:00\"")]
  InvalidOffset {
    value:  String,
    #[source]
    source: chrono::ParseError,
  },

  #[error("failed to read seed file {path:?}")]
  SeedRead {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Core(#[from] coachbook_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
