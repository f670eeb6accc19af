//! JSON REST API for Coachbook.
//!
//! Exposes an axum [`Router`] backed by any
//! [`coachbook_core::store::PracticeStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", coachbook_api::api_router(store.clone(), offset))
//! ```

pub mod clients;
pub mod dashboard;
pub mod error;
pub mod payments;
pub mod sessions;

use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::FixedOffset;
use coachbook_core::store::PracticeStore;

pub use error::ApiError;

/// State shared by every handler.
pub struct ApiState<S> {
  pub store:      Arc<S>,
  /// Offset used to decide the dashboard's calendar boundaries.
  pub utc_offset: FixedOffset,
}

// Manual impl: `S` itself need not be `Clone` to share an `Arc<S>`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), utc_offset: self.utc_offset }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, utc_offset: FixedOffset) -> Router<()>
where
  S: PracticeStore<Error = coachbook_core::Error> + Send + Sync + 'static,
{
  Router::new()
    // Clients
    .route("/clients", get(clients::list::<S>).post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>).delete(clients::delete_one::<S>),
    )
    // Sessions
    .route("/sessions", get(sessions::list::<S>).post(sessions::create::<S>))
    .route(
      "/sessions/{id}",
      get(sessions::get_one::<S>).delete(sessions::delete_one::<S>),
    )
    .route("/sessions/{id}/balance", get(sessions::balance::<S>))
    // Payments
    .route("/payments", get(payments::list::<S>).post(payments::create::<S>))
    .route("/payments/{id}", axum::routing::delete(payments::delete_one::<S>))
    // Dashboard
    .route("/dashboard", get(dashboard::handler::<S>))
    .with_state(ApiState { store, utc_offset })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
