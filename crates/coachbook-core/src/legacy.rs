//! Import of the older record shape, where a session carried at most one
//! embedded payment instead of payments living in their own collection.
//!
//! Legacy data is only ever read. [`migrate`] turns it into the current
//! model; nothing in the crate writes the embedded shape back out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  Result,
  client::Client,
  money::default_currency,
  payment::{Payment, PaymentMethod},
  session::{Session, SessionType},
  store::OwnedSnapshot,
};

/// A payment embedded directly on a legacy session.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedPayment {
  pub amount:         Decimal,
  #[serde(default = "default_currency")]
  pub currency:       String,
  pub payment_date:   DateTime<Utc>,
  /// Free-form label from either historical label set.
  #[serde(default)]
  pub payment_method: String,
  #[serde(default)]
  pub notes:          Option<String>,
}

/// A session as stored before payments became a separate collection.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySession {
  pub session_id:     Uuid,
  pub client_id:      Uuid,
  pub date:           DateTime<Utc>,
  pub session_number: u32,
  pub focus_area:     String,
  #[serde(default)]
  pub summary:        String,
  #[serde(default)]
  pub action_items:   Vec<String>,
  #[serde(default)]
  pub session_type:   Option<SessionType>,
  #[serde(default)]
  pub due_amount:     Option<Decimal>,
  #[serde(default = "default_currency")]
  pub currency:       String,
  pub created_at:     DateTime<Utc>,
  #[serde(default)]
  pub payment:        Option<EmbeddedPayment>,
}

/// A whole legacy export: clients plus sessions with embedded payments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyDocument {
  #[serde(default)]
  pub clients:  Vec<Client>,
  #[serde(default)]
  pub sessions: Vec<LegacySession>,
}

/// Output of [`migrate`].
#[derive(Debug, Clone, Default)]
pub struct MigratedRecords {
  pub sessions: Vec<Session>,
  pub payments: Vec<Payment>,
}

/// Split legacy sessions into sessions and standalone payments.
///
/// A session that carried a payment but no explicit type becomes
/// [`SessionType::Paid`]. Each embedded payment gets a fresh id and inherits
/// the session's `created_at`.
pub fn migrate(legacy: Vec<LegacySession>) -> MigratedRecords {
  let mut out = MigratedRecords::default();

  for old in legacy {
    let session_type = match (&old.session_type, &old.payment) {
      (Some(t), _) => Some(*t),
      (None, Some(_)) => Some(SessionType::Paid),
      (None, None) => None,
    };

    if let Some(embedded) = old.payment {
      out.payments.push(Payment {
        payment_id:     Uuid::new_v4(),
        session_id:     old.session_id,
        amount:         embedded.amount,
        currency:       embedded.currency,
        payment_date:   embedded.payment_date,
        payment_method: PaymentMethod::parse_lenient(&embedded.payment_method),
        notes:          embedded.notes.filter(|n| !n.trim().is_empty()),
        created_at:     old.created_at,
      });
    }

    out.sessions.push(Session {
      session_id: old.session_id,
      client_id: old.client_id,
      date: old.date,
      session_number: old.session_number,
      focus_area: old.focus_area,
      summary: old.summary,
      action_items: old
        .action_items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect(),
      session_type,
      due_amount: old.due_amount,
      currency: old.currency,
      created_at: old.created_at,
    });
  }

  out
}

/// Parse a seed document in either shape.
///
/// A document with a top-level `payments` key is read as the current
/// [`OwnedSnapshot`]; anything else is read as a [`LegacyDocument`] and
/// migrated.
pub fn load_snapshot(json: &str) -> Result<OwnedSnapshot> {
  let value: serde_json::Value = serde_json::from_str(json)?;

  if value.get("payments").is_some() {
    return Ok(serde_json::from_value(value)?);
  }

  let legacy: LegacyDocument = serde_json::from_value(value)?;
  let MigratedRecords { sessions, payments } = migrate(legacy.sessions);
  Ok(OwnedSnapshot { clients: legacy.clients, sessions, payments })
}
