//! Error types for `coachbook-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("client not found: {0}")]
  ClientNotFound(Uuid),

  #[error("session not found: {0}")]
  SessionNotFound(Uuid),

  #[error("payment not found: {0}")]
  PaymentNotFound(Uuid),

  /// A create request carried a missing or out-of-range field.
  #[error("invalid input: {0}")]
  Validation(String),

  #[error("cannot {action} from the {from} view")]
  InvalidTransition {
    from:   &'static str,
    action: &'static str,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// `true` for the lookup failures (`*NotFound`).
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::ClientNotFound(_) | Self::SessionNotFound(_) | Self::PaymentNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
