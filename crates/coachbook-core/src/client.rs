//! Clients: the people or organisations receiving coaching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A coaching client. Immutable once stored; edits replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub client_id:     Uuid,
  pub name:          String,
  #[serde(default)]
  pub email:         String,
  #[serde(default)]
  pub company:       String,
  /// Free-text statement of what the client wants out of coaching.
  #[serde(default)]
  pub coaching_goal: String,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::PracticeStore::add_client`].
/// `client_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
  pub name:          String,
  #[serde(default)]
  pub email:         String,
  #[serde(default)]
  pub company:       String,
  #[serde(default)]
  pub coaching_goal: String,
}

impl NewClient {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub(crate) fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::Validation("client name is required".into()));
    }
    Ok(())
  }

  pub(crate) fn into_client(self, client_id: Uuid, created_at: DateTime<Utc>) -> Client {
    Client {
      client_id,
      name: self.name,
      email: self.email,
      company: self.company,
      coaching_goal: self.coaching_goal,
      created_at,
    }
  }
}
