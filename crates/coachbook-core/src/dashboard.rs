//! Dashboard aggregation.
//!
//! [`DashboardStats::compute`] derives every dashboard figure from a
//! [`Snapshot`] and a single `now` instant. It never fails and keeps no
//! state: call it again whenever the snapshot changes.

use std::{
  collections::{HashMap, HashSet},
  hash::Hash,
};

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  client::Client,
  money::{format_amount, format_fixed, total},
  payment::{Payment, PaymentMethod},
  session::Session,
  store::Snapshot,
};

/// Length of the "top N" display lists.
pub const TOP_N: usize = 5;

/// Size of the recent-activity window, in calendar days.
pub const RECENT_DAYS: u64 = 7;

// ─── Windows ─────────────────────────────────────────────────────────────────

/// The two date windows of a dashboard pass, both derived from the same
/// `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Windows {
  pub as_of:        DateTime<Utc>,
  /// `now` minus [`RECENT_DAYS`] calendar days, same local time of day.
  pub recent_since: DateTime<Utc>,
  /// Local midnight on the first day of `now`'s month.
  pub month_start:  DateTime<Utc>,
}

impl Windows {
  /// Compute both window boundaries in `now`'s timezone.
  pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
    let recent_since = now
      .clone()
      .checked_sub_days(Days::new(RECENT_DAYS))
      // The same wall-clock time can be missing a week earlier (DST gap).
      .unwrap_or_else(|| now.clone() - Duration::days(RECENT_DAYS as i64));

    Self {
      as_of:        now.with_timezone(&Utc),
      recent_since: recent_since.with_timezone(&Utc),
      month_start:  month_start(now),
    }
  }

  pub fn is_recent(&self, at: DateTime<Utc>) -> bool { at >= self.recent_since }

  pub fn is_this_month(&self, at: DateTime<Utc>) -> bool { at >= self.month_start }
}

fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
  let local = now.date_naive();
  let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1).unwrap_or(local);
  let tz = now.timezone();

  // Midnight may not exist locally; take the first hour that does.
  (0..24)
    .filter_map(|hour| first.and_hms_opt(hour, 0, 0))
    .find_map(|naive| tz.from_local_datetime(&naive).earliest())
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|| now.with_timezone(&Utc))
}

// ─── View-model rows ─────────────────────────────────────────────────────────

/// A session as shown in the recent-activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionActivity {
  pub session_id:     Uuid,
  pub client_id:      Uuid,
  /// `None` when the session points at a client that no longer exists.
  pub client_name:    Option<String>,
  pub session_number: u32,
  pub focus_area:     String,
  pub date:           DateTime<Utc>,
}

/// How engaged one client is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEngagement {
  pub client:        Client,
  pub session_count: usize,
  /// The client's latest session by `date`, if any.
  pub last_session:  Option<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusAreaCount {
  pub focus_area: String,
  pub count:      usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodCount {
  pub payment_method: PaymentMethod,
  pub label:          String,
  pub count:          usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyTotal {
  pub currency: String,
  pub total:    Decimal,
  pub display:  String,
}

/// A payment as shown in the recent-payments list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentActivity {
  pub payment_id:     Uuid,
  pub session_id:     Uuid,
  /// `None` when the payment's session is missing.
  pub session_number: Option<u32>,
  /// `None` when the session or its client is missing.
  pub client_name:    Option<String>,
  pub payment_method: PaymentMethod,
  pub amount:         Decimal,
  pub amount_display: String,
  pub currency:       String,
  pub payment_date:   DateTime<Utc>,
}

// ─── DashboardStats ──────────────────────────────────────────────────────────

/// Everything the dashboard displays. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
  pub windows: Windows,

  pub total_clients:               usize,
  pub total_sessions:              usize,
  /// One decimal place, or `"0"` when there are no clients.
  pub average_sessions_per_client: String,

  /// Every session inside the recent window, in snapshot order.
  pub recent_sessions:     Vec<Session>,
  /// The latest [`TOP_N`] recent sessions, newest first.
  pub recent_activity:     Vec<SessionActivity>,
  /// Every session since the start of the month, in snapshot order.
  pub this_month_sessions: Vec<Session>,

  /// Top [`TOP_N`] clients by session count.
  pub client_overview: Vec<ClientEngagement>,
  /// Top [`TOP_N`] focus areas by session count.
  pub top_focus_areas: Vec<FocusAreaCount>,

  /// Number of payments recorded.
  pub paid_count:                 usize,
  /// Number of distinct sessions with at least one payment.
  pub paid_sessions:              usize,
  pub total_revenue:              Decimal,
  pub total_revenue_display:      String,
  /// Revenue from payments whose session falls inside the month-to-date
  /// window.
  pub this_month_revenue:         Decimal,
  pub this_month_revenue_display: String,
  pub revenue_by_currency:        Vec<CurrencyTotal>,

  /// All payment methods in use, most frequent first.
  pub payment_methods: Vec<PaymentMethodCount>,
  /// The latest [`TOP_N`] payments by `payment_date`.
  pub recent_payments: Vec<PaymentActivity>,
}

impl DashboardStats {
  /// Aggregate `snapshot` as seen at `now`. The timezone of `now` decides
  /// calendar boundaries (week arithmetic and the start of the month).
  pub fn compute<Tz: TimeZone>(snapshot: Snapshot<'_>, now: &DateTime<Tz>) -> Self {
    let windows = Windows::at(now);
    let Snapshot { clients, sessions, payments } = snapshot;

    // ── Totals ──────────────────────────────────────────────────────────────

    let total_clients = clients.len();
    let total_sessions = sessions.len();

    // ── Windows ─────────────────────────────────────────────────────────────

    let recent_sessions: Vec<Session> = sessions
      .iter()
      .filter(|s| windows.is_recent(s.date))
      .cloned()
      .collect();

    let this_month_sessions: Vec<Session> = sessions
      .iter()
      .filter(|s| windows.is_this_month(s.date))
      .cloned()
      .collect();

    let mut latest: Vec<&Session> = recent_sessions.iter().collect();
    latest.sort_by(|a, b| b.date.cmp(&a.date));
    let recent_activity = latest
      .into_iter()
      .take(TOP_N)
      .map(|s| SessionActivity {
        session_id:     s.session_id,
        client_id:      s.client_id,
        client_name:    snapshot.client(s.client_id).map(|c| c.name.clone()),
        session_number: s.session_number,
        focus_area:     s.focus_area.clone(),
        date:           s.date,
      })
      .collect();

    // ── Payments ────────────────────────────────────────────────────────────

    let total_revenue = total(payments.iter().map(|p| p.amount));
    let this_month_revenue = total(
      payments
        .iter()
        .filter(|p| windows.is_this_month(effective_date(&snapshot, p)))
        .map(|p| p.amount),
    );

    let paid_sessions = payments
      .iter()
      .map(|p| p.session_id)
      .collect::<HashSet<_>>()
      .len();

    let mut by_date: Vec<&Payment> = payments.iter().collect();
    by_date.sort_by(|a, b| {
      b.payment_date
        .cmp(&a.payment_date)
        .then(b.created_at.cmp(&a.created_at))
        .then(a.payment_id.cmp(&b.payment_id))
    });
    let recent_payments = by_date
      .into_iter()
      .take(TOP_N)
      .map(|p| payment_activity(&snapshot, p))
      .collect();

    Self {
      windows,
      total_clients,
      total_sessions,
      average_sessions_per_client: average(total_sessions, total_clients),
      recent_sessions,
      recent_activity,
      this_month_sessions,
      client_overview: client_overview(clients, sessions),
      top_focus_areas: ranked_counts(sessions.iter().map(|s| s.focus_area.as_str()))
        .into_iter()
        .take(TOP_N)
        .map(|(area, count)| FocusAreaCount { focus_area: area.to_owned(), count })
        .collect(),
      paid_count: payments.len(),
      paid_sessions,
      total_revenue,
      total_revenue_display: format_amount(total_revenue),
      this_month_revenue,
      this_month_revenue_display: format_amount(this_month_revenue),
      revenue_by_currency: revenue_by_currency(payments),
      payment_methods: ranked_counts(payments.iter().map(|p| p.payment_method))
        .into_iter()
        .map(|(method, count)| PaymentMethodCount {
          payment_method: method,
          label: method.to_string(),
          count,
        })
        .collect(),
      recent_payments,
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn average(sessions: usize, clients: usize) -> String {
  if clients == 0 {
    return "0".to_owned();
  }
  let ratio = Decimal::from(sessions as u64) / Decimal::from(clients as u64);
  format_fixed(ratio, 1)
}

/// Count occurrences of each key. Keys are ranked by descending count; equal
/// counts keep first-seen order.
fn ranked_counts<K: Eq + Hash + Copy>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
  let mut index: HashMap<K, usize> = HashMap::new();
  let mut counts: Vec<(K, usize)> = Vec::new();

  for key in keys {
    match index.get(&key) {
      Some(&i) => counts[i].1 += 1,
      None => {
        index.insert(key, counts.len());
        counts.push((key, 1));
      }
    }
  }

  counts.sort_by(|a, b| b.1.cmp(&a.1));
  counts
}

fn client_overview(clients: &[Client], sessions: &[Session]) -> Vec<ClientEngagement> {
  let mut per_client: HashMap<Uuid, (usize, &Session)> = HashMap::new();
  for session in sessions {
    per_client
      .entry(session.client_id)
      .and_modify(|(count, last)| {
        *count += 1;
        if session.date > last.date {
          *last = session;
        }
      })
      .or_insert((1, session));
  }

  let mut overview: Vec<ClientEngagement> = clients
    .iter()
    .map(|client| {
      let (session_count, last_session) = per_client
        .get(&client.client_id)
        .map_or((0, None), |(count, last)| (*count, Some((*last).clone())));
      ClientEngagement { client: client.clone(), session_count, last_session }
    })
    .collect();

  overview.sort_by(|a, b| b.session_count.cmp(&a.session_count));
  overview.truncate(TOP_N);
  overview
}

fn revenue_by_currency(payments: &[Payment]) -> Vec<CurrencyTotal> {
  let mut totals: Vec<(&str, Decimal)> = Vec::new();
  for payment in payments {
    match totals.iter_mut().find(|(c, _)| *c == payment.currency) {
      Some((_, sum)) => *sum = sum.saturating_add(payment.amount),
      None => totals.push((payment.currency.as_str(), payment.amount)),
    }
  }

  totals
    .into_iter()
    .map(|(currency, total)| CurrencyTotal {
      currency: currency.to_owned(),
      total,
      display: format_amount(total),
    })
    .collect()
}

/// The date a payment is booked under: its session's date, or the payment's
/// own date when the session is missing.
fn effective_date(snapshot: &Snapshot<'_>, payment: &Payment) -> DateTime<Utc> {
  snapshot
    .session(payment.session_id)
    .map_or(payment.payment_date, |s| s.date)
}

fn payment_activity(snapshot: &Snapshot<'_>, payment: &Payment) -> PaymentActivity {
  let session = snapshot.session(payment.session_id);
  PaymentActivity {
    payment_id:     payment.payment_id,
    session_id:     payment.session_id,
    session_number: session.map(|s| s.session_number),
    client_name:    session
      .and_then(|s| snapshot.client(s.client_id))
      .map(|c| c.name.clone()),
    payment_method: payment.payment_method,
    amount:         payment.amount,
    amount_display: format_amount(payment.amount),
    currency:       payment.currency.clone(),
    payment_date:   payment.payment_date,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
