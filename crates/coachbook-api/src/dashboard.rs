//! Handler for `GET /dashboard`.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use coachbook_core::{dashboard::DashboardStats, store::PracticeStore};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct DashboardParams {
  /// Evaluate the dashboard at this instant instead of the current time.
  pub as_of: Option<DateTime<Utc>>,
}

/// `GET /dashboard[?as_of=<rfc3339>]`
///
/// The clock is read once per request and shifted into the configured UTC
/// offset, so both date windows agree on the same instant.
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardStats>, ApiError>
where
  S: PracticeStore<Error = coachbook_core::Error>,
{
  let snapshot = state.store.snapshot().await?;
  let now = params
    .as_of
    .unwrap_or_else(Utc::now)
    .with_timezone(&state.utc_offset);

  Ok(Json(DashboardStats::compute(snapshot.as_snapshot(), &now)))
}
