//! Handlers for `/sessions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/sessions` | Optional `?client_id`; most recent first |
//! | `POST`   | `/sessions` | Body: [`NewSession`]; the session number is assigned |
//! | `GET`    | `/sessions/:id` | 404 if not found |
//! | `DELETE` | `/sessions/:id` | 204; also removes the session's payments |
//! | `GET`    | `/sessions/:id/balance` | Due amount vs. payments received |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use coachbook_core::{
  balance::SessionBalance,
  session::{NewSession, Session},
  store::PracticeStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub client_id: Option<Uuid>,
}

/// `GET /sessions[?client_id=<id>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Session>>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  Ok(Json(state.store.list_sessions(params.client_id).await?))
}

/// `POST /sessions`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewSession>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let session = state.store.add_session(body).await?;
  Ok((StatusCode::CREATED, Json(session)))
}

async fn fetch<S>(store: &S, id: Uuid) -> Result<Session, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  store
    .get_session(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))
}

/// `GET /sessions/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Session>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  Ok(Json(fetch(state.store.as_ref(), id).await?))
}

/// `DELETE /sessions/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  state.store.delete_session(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /sessions/:id/balance`
pub async fn balance<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionBalance>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let session = fetch(state.store.as_ref(), id).await?;
  let payments = state.store.list_payments(Some(id)).await?;
  Ok(Json(SessionBalance::for_session(&session, &payments)))
}
