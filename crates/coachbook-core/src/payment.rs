//! Payments received against a session.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{
  Result,
  money::{check_amount, default_currency},
};

// ─── PaymentMethod ───────────────────────────────────────────────────────────

/// How a payment was made.
///
/// This is the only method vocabulary the store speaks. Older data used a
/// different label set (`bank_transfer`, `credit_card`, `cash`, `check`,
/// `paypal`); those labels still parse and map as follows:
///
/// | stored label    | method           |
/// |-----------------|------------------|
/// | `bank_transfer` | `BankTransfer`   |
/// | `cash`          | `Cash`           |
/// | `paypal`        | `PayPal`         |
/// | `credit_card`   | `Stripe`         |
/// | `check`         | `Other`          |
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethod {
  #[default]
  #[serde(rename = "bank_transfer", alias = "Bank Transfer")]
  #[strum(to_string = "Bank Transfer", serialize = "bank_transfer")]
  BankTransfer,
  #[serde(rename = "cash", alias = "Cash")]
  #[strum(to_string = "Cash", serialize = "cash")]
  Cash,
  #[serde(rename = "paypal", alias = "PayPal")]
  #[strum(to_string = "PayPal", serialize = "paypal")]
  PayPal,
  #[serde(rename = "stripe", alias = "Stripe", alias = "credit_card")]
  #[strum(to_string = "Stripe", serialize = "stripe", serialize = "credit_card")]
  Stripe,
  #[serde(rename = "other", alias = "Other", alias = "check")]
  #[strum(to_string = "Other", serialize = "other", serialize = "check")]
  Other,
}

impl PaymentMethod {
  /// Parse any current or legacy label, falling back to
  /// [`PaymentMethod::Other`] for anything unrecognised.
  pub fn parse_lenient(label: &str) -> Self {
    Self::from_str(label.trim()).unwrap_or(Self::Other)
  }
}

// ─── Payment ─────────────────────────────────────────────────────────────────

/// A single payment against a session. A session may carry several
/// (partial payments); see [`crate::balance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
  pub payment_id:     Uuid,
  pub session_id:     Uuid,
  pub amount:         Decimal,
  pub currency:       String,
  /// When the money was received; independent of the session date.
  pub payment_date:   DateTime<Utc>,
  pub payment_method: PaymentMethod,
  pub notes:          Option<String>,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::PracticeStore::add_payment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
  pub session_id:     Uuid,
  pub amount:         Decimal,
  #[serde(default = "default_currency")]
  pub currency:       String,
  pub payment_date:   DateTime<Utc>,
  #[serde(default)]
  pub payment_method: PaymentMethod,
  #[serde(default)]
  pub notes:          Option<String>,
}

impl NewPayment {
  /// Convenience constructor: default currency, bank transfer, no notes.
  pub fn new(session_id: Uuid, amount: Decimal, payment_date: DateTime<Utc>) -> Self {
    Self {
      session_id,
      amount,
      currency: default_currency(),
      payment_date,
      payment_method: PaymentMethod::default(),
      notes: None,
    }
  }

  pub(crate) fn validate(&self) -> Result<()> {
    check_amount("payment amount", self.amount)
  }

  pub(crate) fn into_payment(self, payment_id: Uuid, created_at: DateTime<Utc>) -> Payment {
    let currency = if self.currency.trim().is_empty() {
      default_currency()
    } else {
      self.currency
    };

    Payment {
      payment_id,
      session_id: self.session_id,
      amount: self.amount,
      currency,
      payment_date: self.payment_date,
      payment_method: self.payment_method,
      notes: self.notes.filter(|n| !n.trim().is_empty()),
      created_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn display_labels_round_trip_through_parse() {
    for method in PaymentMethod::iter() {
      assert_eq!(PaymentMethod::parse_lenient(&method.to_string()), method);
    }
  }

  #[test]
  fn legacy_labels_map_to_canonical_methods() {
    assert_eq!(PaymentMethod::parse_lenient("bank_transfer"), PaymentMethod::BankTransfer);
    assert_eq!(PaymentMethod::parse_lenient("cash"), PaymentMethod::Cash);
    assert_eq!(PaymentMethod::parse_lenient("paypal"), PaymentMethod::PayPal);
    assert_eq!(PaymentMethod::parse_lenient("credit_card"), PaymentMethod::Stripe);
    assert_eq!(PaymentMethod::parse_lenient("check"), PaymentMethod::Other);
  }

  #[test]
  fn unknown_labels_fall_back_to_other() {
    assert_eq!(PaymentMethod::parse_lenient("barter"), PaymentMethod::Other);
    assert_eq!(PaymentMethod::parse_lenient(""), PaymentMethod::Other);
  }

  #[test]
  fn serde_accepts_display_and_legacy_labels() {
    let m: PaymentMethod = serde_json::from_str("\"Bank Transfer\"").unwrap();
    assert_eq!(m, PaymentMethod::BankTransfer);
    let m: PaymentMethod = serde_json::from_str("\"credit_card\"").unwrap();
    assert_eq!(m, PaymentMethod::Stripe);
    assert_eq!(serde_json::to_string(&PaymentMethod::PayPal).unwrap(), "\"paypal\"");
  }
}
