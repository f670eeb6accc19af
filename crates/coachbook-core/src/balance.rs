//! Reconciling a session's due amount against the payments received for it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  money::{format_amount, total},
  payment::Payment,
  session::Session,
};

/// Where a session stands financially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
  /// The session has no due amount, so there is nothing to reconcile.
  Unpriced,
  Unpaid,
  Partial,
  FullyPaid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBalance {
  pub session_id:        Uuid,
  pub currency:          String,
  pub due:               Option<Decimal>,
  pub paid:              Decimal,
  /// `due - paid`; negative when overpaid. `None` for unpriced sessions.
  pub remaining:         Option<Decimal>,
  pub remaining_display: Option<String>,
  pub payment_count:     usize,
  pub status:            BalanceStatus,
}

impl SessionBalance {
  /// Reconcile `session` against whichever of `payments` belong to it.
  pub fn for_session(session: &Session, payments: &[Payment]) -> Self {
    let own: Vec<&Payment> = payments
      .iter()
      .filter(|p| p.session_id == session.session_id)
      .collect();
    let paid = total(own.iter().map(|p| p.amount));
    let remaining = session.due_amount.map(|due| due.saturating_sub(paid));

    let status = match remaining {
      None => BalanceStatus::Unpriced,
      Some(r) if r <= Decimal::ZERO => BalanceStatus::FullyPaid,
      Some(_) if paid > Decimal::ZERO => BalanceStatus::Partial,
      Some(_) => BalanceStatus::Unpaid,
    };

    Self {
      session_id: session.session_id,
      currency: session.currency.clone(),
      due: session.due_amount,
      paid,
      remaining,
      remaining_display: remaining.map(format_amount),
      payment_count: own.len(),
      status,
    }
  }
}
