//! View-navigation state machine for a presentation layer.
//!
//! The current [`View`] carries the ids of whatever is selected, so there is
//! no separate "selected client" or "selected session" state to drift out of
//! sync with it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
  #[default]
  Dashboard,
  ClientList,
  ClientForm,
  SessionList {
    client_id: Uuid,
  },
  SessionForm {
    client_id: Uuid,
  },
  SessionDetail {
    client_id:  Uuid,
    session_id: Uuid,
  },
  PaymentForm {
    client_id:  Uuid,
    session_id: Uuid,
  },
}

impl View {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Dashboard => "dashboard",
      Self::ClientList => "client-list",
      Self::ClientForm => "client-form",
      Self::SessionList { .. } => "session-list",
      Self::SessionForm { .. } => "session-form",
      Self::SessionDetail { .. } => "session-detail",
      Self::PaymentForm { .. } => "payment-form",
    }
  }

  /// The client in focus, if the view has one.
  pub fn client_id(&self) -> Option<Uuid> {
    match *self {
      Self::SessionList { client_id }
      | Self::SessionForm { client_id }
      | Self::SessionDetail { client_id, .. }
      | Self::PaymentForm { client_id, .. } => Some(client_id),
      _ => None,
    }
  }

  /// The session in focus, if the view has one.
  pub fn session_id(&self) -> Option<Uuid> {
    match *self {
      Self::SessionDetail { session_id, .. } | Self::PaymentForm { session_id, .. } => {
        Some(session_id)
      }
      _ => None,
    }
  }
}

/// Holds the current [`View`] and applies transitions to it.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
  current: View,
}

impl Navigation {
  pub fn new() -> Self { Self::default() }

  pub fn current(&self) -> View { self.current }

  /// Apply `step` to the current view. On `None` the view is left unchanged
  /// and an [`Error::InvalidTransition`] is returned.
  fn go(&mut self, action: &'static str, step: impl FnOnce(View) -> Option<View>) -> Result<View> {
    let next = step(self.current).ok_or(Error::InvalidTransition {
      from: self.current.name(),
      action,
    })?;
    self.current = next;
    Ok(next)
  }

  // ── Top level ─────────────────────────────────────────────────────────────

  pub fn show_dashboard(&mut self) -> View {
    self.current = View::Dashboard;
    self.current
  }

  pub fn show_clients(&mut self) -> View {
    self.current = View::ClientList;
    self.current
  }

  // ── Clients ───────────────────────────────────────────────────────────────

  pub fn new_client(&mut self) -> Result<View> {
    self.go("add a client", |v| match v {
      View::Dashboard | View::ClientList => Some(View::ClientForm),
      _ => None,
    })
  }

  pub fn client_saved(&mut self) -> Result<View> {
    self.go("finish a client", |v| match v {
      View::ClientForm => Some(View::ClientList),
      _ => None,
    })
  }

  pub fn open_client(&mut self, client_id: Uuid) -> Result<View> {
    self.go("open a client", |v| match v {
      View::Dashboard | View::ClientList => Some(View::SessionList { client_id }),
      _ => None,
    })
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  pub fn new_session(&mut self) -> Result<View> {
    self.go("add a session", |v| match v {
      View::SessionList { client_id } => Some(View::SessionForm { client_id }),
      _ => None,
    })
  }

  pub fn session_saved(&mut self) -> Result<View> {
    self.go("finish a session", |v| match v {
      View::SessionForm { client_id } => Some(View::SessionList { client_id }),
      _ => None,
    })
  }

  pub fn open_session(&mut self, session_id: Uuid) -> Result<View> {
    self.go("open a session", |v| match v {
      View::SessionList { client_id } => Some(View::SessionDetail { client_id, session_id }),
      _ => None,
    })
  }

  // ── Payments ──────────────────────────────────────────────────────────────

  pub fn new_payment(&mut self) -> Result<View> {
    self.go("add a payment", |v| match v {
      View::SessionDetail { client_id, session_id } => {
        Some(View::PaymentForm { client_id, session_id })
      }
      _ => None,
    })
  }

  pub fn payment_saved(&mut self) -> Result<View> {
    self.go("finish a payment", |v| match v {
      View::PaymentForm { client_id, session_id } => {
        Some(View::SessionDetail { client_id, session_id })
      }
      _ => None,
    })
  }

  // ── Back ──────────────────────────────────────────────────────────────────

  /// Step one level up. Always succeeds; the dashboard is its own parent.
  pub fn back(&mut self) -> View {
    self.current = match self.current {
      View::Dashboard | View::ClientList => View::Dashboard,
      View::ClientForm | View::SessionList { .. } => View::ClientList,
      View::SessionForm { client_id } | View::SessionDetail { client_id, .. } => {
        View::SessionList { client_id }
      }
      View::PaymentForm { client_id, session_id } => View::SessionDetail { client_id, session_id },
    };
    self.current
  }
}
