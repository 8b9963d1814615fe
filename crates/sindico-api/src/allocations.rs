//! Handlers for `/allocations` endpoints — the daily roster.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/allocations[?date=YYYY-MM-DD]` | The roster for one date, or every allocation |
//! | `POST` | `/allocations` | Body: [`NewAllocation`]; 409 on double booking |
//! | `GET`  | `/allocations/:id` | |
//! | `POST` | `/allocations/:id/absence` | Scheduled allocations only |
//! | `POST` | `/allocations/:id/replace` | Body: the replacement [`NewAllocation`] |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sindico_core::{
  allocation::{Allocation, NewAllocation},
  roster,
  store::AdminStore,
};
use uuid::Uuid;

use crate::{ApiState, emit, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub date: Option<NaiveDate>,
}

/// `GET /allocations[?date=...]` — the roster for one date, or the
/// tenant's full allocation history. Replacements included either way.
pub async fn list<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Allocation>>, ApiError> {
  let ctx = state.scope(&headers)?;
  let allocations = match params.date {
    Some(date) => state.store.list_allocations_on(&ctx, date).await?,
    None => state.store.list_allocations(&ctx).await?,
  };
  Ok(Json(allocations))
}

/// `GET /allocations/:id`
pub async fn get_one<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Allocation>, ApiError> {
  let ctx = state.scope(&headers)?;
  let allocation = state
    .store
    .get_allocation(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("allocation {id} not found")))?;
  Ok(Json(allocation))
}

/// `POST /allocations` — schedule an employee onto a work post for a date.
pub async fn schedule<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewAllocation>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  let (allocation, events) =
    roster::schedule_allocation(state.store.as_ref(), &ctx, body).await?;
  emit(&ctx, &events);
  Ok((StatusCode::CREATED, Json(allocation)))
}

/// `POST /allocations/:id/absence`
pub async fn record_absence<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Allocation>, ApiError> {
  let ctx = state.scope(&headers)?;
  let (allocation, events) =
    roster::record_absence(state.store.as_ref(), &ctx, id).await?;
  emit(&ctx, &events);
  Ok(Json(allocation))
}

/// `POST /allocations/:id/replace` — the correction flow. The old row stays
/// as audit history with status `replaced`; returns 201 + the replacement.
pub async fn replace<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(body): Json<NewAllocation>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  let (replacement, events) =
    roster::replace_allocation(state.store.as_ref(), &ctx, id, body).await?;
  emit(&ctx, &events);
  Ok((StatusCode::CREATED, Json(replacement)))
}
