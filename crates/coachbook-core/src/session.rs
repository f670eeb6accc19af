//! Coaching sessions held with a client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  money::{check_amount, default_currency},
};

/// Commercial nature of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
  Free,
  Paid,
  /// An introductory "chemistry" call before an engagement starts.
  Chemistry,
}

/// A recorded coaching session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub session_id:     Uuid,
  /// The client this session was held with. Not checked against the client
  /// list by readers; a dangling id resolves to "no client".
  pub client_id:      Uuid,
  /// When the session took place.
  pub date:           DateTime<Utc>,
  /// Sequential per client, assigned as `existing + 1` at creation time.
  /// Never renumbered, so gaps and duplicates are possible.
  pub session_number: u32,
  /// Free-text grouping key for the focus-area histogram.
  pub focus_area:     String,
  pub summary:        String,
  pub action_items:   Vec<String>,
  pub session_type:   Option<SessionType>,
  /// Price of the session; payments are reconciled against it.
  pub due_amount:     Option<Decimal>,
  pub currency:       String,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::PracticeStore::add_session`].
///
/// `session_id`, `session_number` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
  pub client_id:    Uuid,
  pub date:         DateTime<Utc>,
  pub focus_area:   String,
  pub summary:      String,
  #[serde(default)]
  pub action_items: Vec<String>,
  #[serde(default)]
  pub session_type: Option<SessionType>,
  #[serde(default)]
  pub due_amount:   Option<Decimal>,
  #[serde(default = "default_currency")]
  pub currency:     String,
}

impl NewSession {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(
    client_id: Uuid,
    date: DateTime<Utc>,
    focus_area: impl Into<String>,
    summary: impl Into<String>,
  ) -> Self {
    Self {
      client_id,
      date,
      focus_area: focus_area.into(),
      summary: summary.into(),
      action_items: Vec::new(),
      session_type: None,
      due_amount: None,
      currency: default_currency(),
    }
  }

  pub(crate) fn validate(&self) -> Result<()> {
    if self.focus_area.trim().is_empty() {
      return Err(Error::Validation("session focus area is required".into()));
    }
    if self.summary.trim().is_empty() {
      return Err(Error::Validation("session summary is required".into()));
    }
    if let Some(due) = self.due_amount {
      check_amount("due amount", due)?;
    }
    Ok(())
  }

  pub(crate) fn into_session(
    self,
    session_id: Uuid,
    session_number: u32,
    created_at: DateTime<Utc>,
  ) -> Session {
    let currency = if self.currency.trim().is_empty() {
      default_currency()
    } else {
      self.currency
    };

    Session {
      session_id,
      client_id: self.client_id,
      date: self.date,
      session_number,
      focus_area: self.focus_area,
      summary: self.summary,
      action_items: self
        .action_items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect(),
      session_type: self.session_type,
      due_amount: self.due_amount,
      currency,
      created_at,
    }
  }
}
