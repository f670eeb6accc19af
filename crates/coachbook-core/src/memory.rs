//! The in-process implementation of [`PracticeStore`].

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
  Error, Result,
  client::{Client, NewClient},
  payment::{NewPayment, Payment},
  session::{NewSession, Session},
  store::{ImportSummary, OwnedSnapshot, PracticeStore},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A practice store holding every record in memory.
///
/// Clones share the same underlying collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  records: Arc<RwLock<OwnedSnapshot>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Build a store pre-populated with `records`.
  pub fn with_records(records: OwnedSnapshot) -> Self {
    Self { records: Arc::new(RwLock::new(records)) }
  }
}

fn next_session_number(sessions: &[Session], client_id: Uuid) -> u32 {
  let existing = sessions.iter().filter(|s| s.client_id == client_id).count();
  u32::try_from(existing).unwrap_or(u32::MAX).saturating_add(1)
}

// ─── PracticeStore impl ──────────────────────────────────────────────────────

impl PracticeStore for MemoryStore {
  type Error = Error;

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn add_client(&self, input: NewClient) -> Result<Client> {
    input.validate()?;
    let client = input.into_client(Uuid::new_v4(), Utc::now());

    self.records.write().await.clients.push(client.clone());
    tracing::debug!(client_id = %client.client_id, "added client");

    Ok(client)
  }

  async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>> {
    let records = self.records.read().await;
    Ok(records.clients.iter().find(|c| c.client_id == client_id).cloned())
  }

  async fn list_clients(&self) -> Result<Vec<Client>> {
    let mut clients = self.records.read().await.clients.clone();
    clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(clients)
  }

  async fn delete_client(&self, client_id: Uuid) -> Result<()> {
    let mut records = self.records.write().await;

    let before = records.clients.len();
    records.clients.retain(|c| c.client_id != client_id);
    if records.clients.len() == before {
      return Err(Error::ClientNotFound(client_id));
    }

    let orphaned: HashSet<Uuid> = records
      .sessions
      .iter()
      .filter(|s| s.client_id == client_id)
      .map(|s| s.session_id)
      .collect();
    records.sessions.retain(|s| s.client_id != client_id);

    let payments_before = records.payments.len();
    records.payments.retain(|p| !orphaned.contains(&p.session_id));

    tracing::info!(
      %client_id,
      sessions = orphaned.len(),
      payments = payments_before - records.payments.len(),
      "deleted client and dependent records"
    );
    Ok(())
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn add_session(&self, input: NewSession) -> Result<Session> {
    input.validate()?;

    let mut records = self.records.write().await;
    if !records.clients.iter().any(|c| c.client_id == input.client_id) {
      return Err(Error::ClientNotFound(input.client_id));
    }

    let number = next_session_number(&records.sessions, input.client_id);
    let session = input.into_session(Uuid::new_v4(), number, Utc::now());
    records.sessions.push(session.clone());

    tracing::debug!(
      session_id = %session.session_id,
      client_id = %session.client_id,
      session_number = session.session_number,
      "added session"
    );
    Ok(session)
  }

  async fn get_session(&self, session_id: Uuid) -> Result<Option<Session>> {
    let records = self.records.read().await;
    Ok(records.sessions.iter().find(|s| s.session_id == session_id).cloned())
  }

  async fn list_sessions(&self, client_id: Option<Uuid>) -> Result<Vec<Session>> {
    let mut sessions: Vec<Session> = self
      .records
      .read()
      .await
      .sessions
      .iter()
      .filter(|s| client_id.is_none_or(|id| s.client_id == id))
      .cloned()
      .collect();
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(sessions)
  }

  async fn delete_session(&self, session_id: Uuid) -> Result<()> {
    let mut records = self.records.write().await;

    let before = records.sessions.len();
    records.sessions.retain(|s| s.session_id != session_id);
    if records.sessions.len() == before {
      return Err(Error::SessionNotFound(session_id));
    }

    let payments_before = records.payments.len();
    records.payments.retain(|p| p.session_id != session_id);

    tracing::info!(
      %session_id,
      payments = payments_before - records.payments.len(),
      "deleted session and its payments"
    );
    Ok(())
  }

  // ── Payments ──────────────────────────────────────────────────────────────

  async fn add_payment(&self, input: NewPayment) -> Result<Payment> {
    input.validate()?;

    let mut records = self.records.write().await;
    if !records.sessions.iter().any(|s| s.session_id == input.session_id) {
      return Err(Error::SessionNotFound(input.session_id));
    }

    let payment = input.into_payment(Uuid::new_v4(), Utc::now());
    records.payments.push(payment.clone());

    tracing::debug!(
      payment_id = %payment.payment_id,
      session_id = %payment.session_id,
      amount = %payment.amount,
      "added payment"
    );
    Ok(payment)
  }

  async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>> {
    let records = self.records.read().await;
    Ok(records.payments.iter().find(|p| p.payment_id == payment_id).cloned())
  }

  async fn list_payments(&self, session_id: Option<Uuid>) -> Result<Vec<Payment>> {
    let mut payments: Vec<Payment> = self
      .records
      .read()
      .await
      .payments
      .iter()
      .filter(|p| session_id.is_none_or(|id| p.session_id == id))
      .cloned()
      .collect();
    payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
    Ok(payments)
  }

  async fn delete_payment(&self, payment_id: Uuid) -> Result<()> {
    let mut records = self.records.write().await;

    let before = records.payments.len();
    records.payments.retain(|p| p.payment_id != payment_id);
    if records.payments.len() == before {
      return Err(Error::PaymentNotFound(payment_id));
    }

    tracing::debug!(%payment_id, "deleted payment");
    Ok(())
  }

  // ── Bulk ──────────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<OwnedSnapshot> {
    Ok(self.records.read().await.clone())
  }

  async fn import(&self, incoming: OwnedSnapshot) -> Result<ImportSummary> {
    let mut records = self.records.write().await;
    let mut summary = ImportSummary::default();

    let mut known: HashSet<Uuid> = records.clients.iter().map(|c| c.client_id).collect();
    for client in incoming.clients {
      if known.insert(client.client_id) {
        records.clients.push(client);
        summary.clients += 1;
      }
    }

    let mut known: HashSet<Uuid> = records.sessions.iter().map(|s| s.session_id).collect();
    for session in incoming.sessions {
      if known.insert(session.session_id) {
        records.sessions.push(session);
        summary.sessions += 1;
      }
    }

    let mut known: HashSet<Uuid> = records.payments.iter().map(|p| p.payment_id).collect();
    for payment in incoming.payments {
      if known.insert(payment.payment_id) {
        records.payments.push(payment);
        summary.payments += 1;
      }
    }

    tracing::info!(
      clients = summary.clients,
      sessions = summary.sessions,
      payments = summary.payments,
      "imported records"
    );
    Ok(summary)
  }
}
