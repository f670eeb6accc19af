//! Tests for `MemoryStore` through the `PracticeStore` trait.

use std::str::FromStr as _;

use chrono::{DateTime, Duration, TimeZone as _, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
  Error,
  client::{Client, NewClient},
  dashboard::DashboardStats,
  memory::MemoryStore,
  money::MAX_AMOUNT,
  payment::{NewPayment, PaymentMethod},
  session::{NewSession, SessionType},
  store::{OwnedSnapshot, PracticeStore},
};

fn store() -> MemoryStore { MemoryStore::new() }

fn at(day: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 6, day, 14, 0, 0).unwrap() }

fn dec(s: &str) -> Decimal { Decimal::from_str(s).unwrap() }

async fn client(s: &MemoryStore, name: &str) -> Client {
  s.add_client(NewClient::new(name)).await.unwrap()
}

fn new_session(client_id: Uuid, day: u32) -> NewSession {
  NewSession::new(client_id, at(day), "Leadership", "Worked on delegation")
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_client() {
  let s = store();

  let input = NewClient {
    name:          "Ada Lovelace".into(),
    email:         "ada@example.com".into(),
    company:       "Analytical Engines".into(),
    coaching_goal: "Ship the engine".into(),
  };
  let created = s.add_client(input).await.unwrap();

  let fetched = s.get_client(created.client_id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.company, "Analytical Engines");
}

#[tokio::test]
async fn get_client_missing_returns_none() {
  let s = store();
  assert!(s.get_client(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_client_name_is_rejected() {
  let s = store();
  let err = s.add_client(NewClient::new("   ")).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert!(s.list_clients().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_clients_newest_first() {
  let older = Client {
    client_id:     Uuid::new_v4(),
    name:          "Older".into(),
    email:         String::new(),
    company:       String::new(),
    coaching_goal: String::new(),
    created_at:    at(1),
  };
  let newer = Client {
    client_id:  Uuid::new_v4(),
    name:       "Newer".into(),
    created_at: at(2),
    ..older.clone()
  };
  let s = MemoryStore::with_records(OwnedSnapshot {
    clients: vec![older, newer],
    ..OwnedSnapshot::default()
  });

  let names: Vec<String> = s.list_clients().await.unwrap().into_iter().map(|c| c.name).collect();
  assert_eq!(names, ["Newer", "Older"]);
}

#[tokio::test]
async fn delete_client_cascades() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let bo = client(&s, "Bo").await;

  let ada_session = s.add_session(new_session(ada.client_id, 3)).await.unwrap();
  let bo_session = s.add_session(new_session(bo.client_id, 4)).await.unwrap();
  s.add_payment(NewPayment::new(ada_session.session_id, dec("90"), at(3))).await.unwrap();
  s.add_payment(NewPayment::new(bo_session.session_id, dec("60"), at(4))).await.unwrap();

  s.delete_client(ada.client_id).await.unwrap();

  let snap = s.snapshot().await.unwrap();
  assert_eq!(snap.clients.len(), 1);
  assert_eq!(snap.sessions.len(), 1);
  assert_eq!(snap.sessions[0].session_id, bo_session.session_id);
  assert_eq!(snap.payments.len(), 1);
  assert_eq!(snap.payments[0].session_id, bo_session.session_id);
}

#[tokio::test]
async fn delete_missing_client_is_not_found() {
  let s = store();
  let id = Uuid::new_v4();
  let err = s.delete_client(id).await.unwrap_err();
  assert!(matches!(err, Error::ClientNotFound(missing) if missing == id));
  assert!(err.is_not_found());
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_numbers_count_per_client() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let bo = client(&s, "Bo").await;

  let mut numbers = Vec::new();
  for day in 1..=3 {
    numbers.push(s.add_session(new_session(ada.client_id, day)).await.unwrap().session_number);
  }
  assert_eq!(numbers, [1, 2, 3]);

  let first_for_bo = s.add_session(new_session(bo.client_id, 5)).await.unwrap();
  assert_eq!(first_for_bo.session_number, 1);
}

#[tokio::test]
async fn session_numbers_are_not_renumbered_after_delete() {
  let s = store();
  let ada = client(&s, "Ada").await;

  let first = s.add_session(new_session(ada.client_id, 1)).await.unwrap();
  let second = s.add_session(new_session(ada.client_id, 2)).await.unwrap();
  let third = s.add_session(new_session(ada.client_id, 3)).await.unwrap();
  s.delete_session(first.session_id).await.unwrap();

  let fourth = s.add_session(new_session(ada.client_id, 4)).await.unwrap();
  assert_eq!(second.session_number, 2);
  assert_eq!(third.session_number, 3);
  // Two sessions remain, so the next number collides with `third`.
  assert_eq!(fourth.session_number, 3);
}

#[tokio::test]
async fn add_session_normalises_input() {
  let s = store();
  let ada = client(&s, "Ada").await;

  let mut input = new_session(ada.client_id, 7);
  input.action_items = vec!["Read chapter 3".into(), "".into(), "  ".into(), "Call Bo".into()];
  input.currency = String::new();
  input.session_type = Some(SessionType::Paid);
  input.due_amount = Some(dec("120"));

  let session = s.add_session(input).await.unwrap();
  assert_eq!(session.action_items, ["Read chapter 3", "Call Bo"]);
  assert_eq!(session.currency, "USD");
  assert_eq!(session.session_type, Some(SessionType::Paid));
  assert_eq!(session.due_amount, Some(dec("120")));
}

#[tokio::test]
async fn add_session_for_unknown_client_fails() {
  let s = store();
  let id = Uuid::new_v4();
  let err = s.add_session(new_session(id, 1)).await.unwrap_err();
  assert!(matches!(err, Error::ClientNotFound(missing) if missing == id));
}

#[tokio::test]
async fn add_session_validates_fields() {
  let s = store();
  let ada = client(&s, "Ada").await;

  let mut blank_focus = new_session(ada.client_id, 1);
  blank_focus.focus_area = " ".into();
  assert!(matches!(s.add_session(blank_focus).await, Err(Error::Validation(_))));

  let mut blank_summary = new_session(ada.client_id, 1);
  blank_summary.summary = String::new();
  assert!(matches!(s.add_session(blank_summary).await, Err(Error::Validation(_))));

  let mut free_due = new_session(ada.client_id, 1);
  free_due.due_amount = Some(Decimal::ZERO);
  assert!(matches!(s.add_session(free_due).await, Err(Error::Validation(_))));

  let mut huge_due = new_session(ada.client_id, 1);
  huge_due.due_amount = Some(MAX_AMOUNT + Decimal::ONE);
  assert!(matches!(s.add_session(huge_due).await, Err(Error::Validation(_))));

  assert!(s.list_sessions(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_sessions_filters_and_sorts_by_date() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let bo = client(&s, "Bo").await;

  s.add_session(new_session(ada.client_id, 2)).await.unwrap();
  s.add_session(new_session(bo.client_id, 9)).await.unwrap();
  s.add_session(new_session(ada.client_id, 5)).await.unwrap();

  let ada_sessions = s.list_sessions(Some(ada.client_id)).await.unwrap();
  let days: Vec<_> = ada_sessions.iter().map(|x| x.date).collect();
  assert_eq!(days, [at(5), at(2)]);

  assert_eq!(s.list_sessions(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_session_removes_its_payments() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let keep = s.add_session(new_session(ada.client_id, 1)).await.unwrap();
  let doomed = s.add_session(new_session(ada.client_id, 2)).await.unwrap();
  s.add_payment(NewPayment::new(keep.session_id, dec("10"), at(1))).await.unwrap();
  s.add_payment(NewPayment::new(doomed.session_id, dec("20"), at(2))).await.unwrap();
  s.add_payment(NewPayment::new(doomed.session_id, dec("30"), at(3))).await.unwrap();

  s.delete_session(doomed.session_id).await.unwrap();

  let payments = s.list_payments(None).await.unwrap();
  assert_eq!(payments.len(), 1);
  assert_eq!(payments[0].session_id, keep.session_id);
  assert!(s.get_session(doomed.session_id).await.unwrap().is_none());
  assert!(matches!(
    s.delete_session(doomed.session_id).await,
    Err(Error::SessionNotFound(_))
  ));
}

// ─── Payments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_payments() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let session = s.add_session(new_session(ada.client_id, 1)).await.unwrap();

  let mut input = NewPayment::new(session.session_id, dec("75.25"), at(2));
  input.payment_method = PaymentMethod::PayPal;
  input.notes = Some("  ".into());
  let first = s.add_payment(input).await.unwrap();
  assert_eq!(first.notes, None);
  assert_eq!(first.currency, "USD");

  let second = s
    .add_payment(NewPayment::new(session.session_id, dec("24.75"), at(4)))
    .await
    .unwrap();

  let listed = s.list_payments(Some(session.session_id)).await.unwrap();
  let ids: Vec<_> = listed.iter().map(|p| p.payment_id).collect();
  assert_eq!(ids, [second.payment_id, first.payment_id]);

  let fetched = s.get_payment(first.payment_id).await.unwrap().unwrap();
  assert_eq!(fetched.payment_method, PaymentMethod::PayPal);
}

#[tokio::test]
async fn add_payment_requires_session_and_positive_amount() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let session = s.add_session(new_session(ada.client_id, 1)).await.unwrap();

  let missing = Uuid::new_v4();
  let err = s.add_payment(NewPayment::new(missing, dec("10"), at(1))).await.unwrap_err();
  assert!(matches!(err, Error::SessionNotFound(id) if id == missing));

  let err = s
    .add_payment(NewPayment::new(session.session_id, dec("0"), at(1)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn oversized_payments_are_rejected_and_dashboard_survives() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let session = s.add_session(new_session(ada.client_id, 1)).await.unwrap();

  let err = s
    .add_payment(NewPayment::new(session.session_id, Decimal::MAX, at(1)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  for _ in 0..2 {
    s.add_payment(NewPayment::new(session.session_id, MAX_AMOUNT, at(1)))
      .await
      .unwrap();
  }
  let snapshot = s.snapshot().await.unwrap();
  let stats = DashboardStats::compute(snapshot.as_snapshot(), &at(3));
  assert_eq!(stats.total_revenue, MAX_AMOUNT + MAX_AMOUNT);
}

#[tokio::test]
async fn delete_payment() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let session = s.add_session(new_session(ada.client_id, 1)).await.unwrap();
  let payment = s
    .add_payment(NewPayment::new(session.session_id, dec("10"), at(1)))
    .await
    .unwrap();

  s.delete_payment(payment.payment_id).await.unwrap();
  assert!(s.get_payment(payment.payment_id).await.unwrap().is_none());
  assert!(matches!(
    s.delete_payment(payment.payment_id).await,
    Err(Error::PaymentNotFound(_))
  ));
}

// ─── Bulk ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_keeps_ids_and_skips_duplicates() {
  let source = store();
  let ada = client(&source, "Ada").await;
  let session = source.add_session(new_session(ada.client_id, 1)).await.unwrap();
  source
    .add_payment(NewPayment::new(session.session_id, dec("10"), at(1)))
    .await
    .unwrap();
  let exported = source.snapshot().await.unwrap();

  let target = store();
  let first = target.import(exported.clone()).await.unwrap();
  assert_eq!((first.clients, first.sessions, first.payments), (1, 1, 1));

  let again = target.import(exported.clone()).await.unwrap();
  assert_eq!((again.clients, again.sessions, again.payments), (0, 0, 0));

  assert_eq!(target.snapshot().await.unwrap(), exported);
}

#[tokio::test]
async fn snapshot_feeds_the_dashboard() {
  let s = store();
  let ada = client(&s, "Ada").await;
  let bo = client(&s, "Bo").await;

  let a1 = s.add_session(new_session(ada.client_id, 10)).await.unwrap();
  s.add_session(new_session(ada.client_id, 12)).await.unwrap();
  s.add_session(new_session(bo.client_id, 13)).await.unwrap();
  s.add_payment(NewPayment::new(a1.session_id, dec("100.00"), at(11))).await.unwrap();
  s.add_payment(NewPayment::new(a1.session_id, dec("50.005"), at(12))).await.unwrap();

  let snap = s.snapshot().await.unwrap();
  let now = at(14) + Duration::hours(1);
  let stats = DashboardStats::compute(snap.as_snapshot(), &now);

  assert_eq!(stats.total_clients, 2);
  assert_eq!(stats.total_sessions, 3);
  assert_eq!(stats.average_sessions_per_client, "1.5");
  assert_eq!(stats.client_overview[0].client.client_id, ada.client_id);
  assert_eq!(stats.total_revenue_display, "150.01");
  assert_eq!(stats.this_month_revenue_display, "150.01");
  assert_eq!(stats.paid_sessions, 1);
  assert_eq!(stats.recent_sessions.len(), 3);
}
