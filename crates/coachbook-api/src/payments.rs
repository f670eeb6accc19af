//! Handlers for `/payments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/payments` | Optional `?session_id`; most recent first |
//! | `POST`   | `/payments` | Body: [`NewPayment`]; 404 if the session is missing |
//! | `DELETE` | `/payments/:id` | 204 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use coachbook_core::{
  payment::{NewPayment, Payment},
  store::PracticeStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub session_id: Option<Uuid>,
}

/// `GET /payments[?session_id=<id>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Payment>>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  Ok(Json(state.store.list_payments(params.session_id).await?))
}

/// `POST /payments`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewPayment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let payment = state.store.add_payment(body).await?;
  Ok((StatusCode::CREATED, Json(payment)))
}

/// `DELETE /payments/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  state.store.delete_payment(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
