//! Handlers for `/clients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/clients` | Newest first |
//! | `POST`   | `/clients` | Body: [`NewClient`]; returns 201 + stored client |
//! | `GET`    | `/clients/:id` | 404 if not found |
//! | `DELETE` | `/clients/:id` | 204; also removes the client's sessions and payments |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use coachbook_core::{
  client::{Client, NewClient},
  store::PracticeStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /clients`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<Client>>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  Ok(Json(state.store.list_clients().await?))
}

/// `POST /clients`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let client = state.store.add_client(body).await?;
  Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /clients/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let client = state
    .store
    .get_client(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  Ok(Json(client))
}

/// `DELETE /clients/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  state.store.delete_client(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
