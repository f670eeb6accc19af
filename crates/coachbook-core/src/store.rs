//! The `PracticeStore` trait and the snapshot types handed to the dashboard.
//!
//! The trait is implemented by storage backends (currently
//! [`crate::memory::MemoryStore`]). The HTTP layer depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  client::{Client, NewClient},
  payment::{NewPayment, Payment},
  session::{NewSession, Session},
};

// ─── Snapshots ───────────────────────────────────────────────────────────────

/// Borrowed view of the three collections at one point in time.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
  pub clients:  &'a [Client],
  pub sessions: &'a [Session],
  pub payments: &'a [Payment],
}

impl<'a> Snapshot<'a> {
  pub fn new(clients: &'a [Client], sessions: &'a [Session], payments: &'a [Payment]) -> Self {
    Self { clients, sessions, payments }
  }

  pub fn client(&self, client_id: Uuid) -> Option<&'a Client> {
    self.clients.iter().find(|c| c.client_id == client_id)
  }

  pub fn session(&self, session_id: Uuid) -> Option<&'a Session> {
    self.sessions.iter().find(|s| s.session_id == session_id)
  }
}

/// Owned copy of every record, in insertion order. Also the JSON shape of a
/// seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedSnapshot {
  #[serde(default)]
  pub clients:  Vec<Client>,
  #[serde(default)]
  pub sessions: Vec<Session>,
  #[serde(default)]
  pub payments: Vec<Payment>,
}

impl OwnedSnapshot {
  pub fn as_snapshot(&self) -> Snapshot<'_> {
    Snapshot::new(&self.clients, &self.sessions, &self.payments)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Coachbook record store.
///
/// Records are never edited in place: they are created whole and deleted by
/// id. Deleting a client removes its sessions, and deleting a session removes
/// its payments.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PracticeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Clients ───────────────────────────────────────────────────────────

  /// Create and persist a new client.
  fn add_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// Retrieve a client by id. Returns `None` if not found.
  fn get_client(
    &self,
    client_id: Uuid,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// List all clients, newest first.
  fn list_clients(
    &self,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  /// Delete a client together with its sessions and their payments.
  fn delete_client(
    &self,
    client_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Record a new session. The store assigns the next session number for
  /// the client.
  fn add_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<Session, Self::Error>> + Send + '_;

  fn get_session(
    &self,
    session_id: Uuid,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;

  /// List sessions, optionally for a single client, most recent `date` first.
  fn list_sessions(
    &self,
    client_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Session>, Self::Error>> + Send + '_;

  /// Delete a session together with its payments.
  fn delete_session(
    &self,
    session_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Payments ──────────────────────────────────────────────────────────

  /// Record a payment against an existing session.
  fn add_payment(
    &self,
    input: NewPayment,
  ) -> impl Future<Output = Result<Payment, Self::Error>> + Send + '_;

  fn get_payment(
    &self,
    payment_id: Uuid,
  ) -> impl Future<Output = Result<Option<Payment>, Self::Error>> + Send + '_;

  /// List payments, optionally for a single session, most recent
  /// `payment_date` first.
  fn list_payments(
    &self,
    session_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Payment>, Self::Error>> + Send + '_;

  fn delete_payment(
    &self,
    payment_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Bulk ──────────────────────────────────────────────────────────────

  /// Copy every record out of the store, in insertion order.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<OwnedSnapshot, Self::Error>> + Send + '_;

  /// Load already-built records verbatim, keeping their ids, timestamps and
  /// session numbers. Records whose id is already present are skipped.
  fn import(
    &self,
    records: OwnedSnapshot,
  ) -> impl Future<Output = Result<ImportSummary, Self::Error>> + Send + '_;
}

/// Counts of records actually added by [`PracticeStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub clients:  usize,
  pub sessions: usize,
  pub payments: usize,
}
