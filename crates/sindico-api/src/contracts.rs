//! Handlers for `/contracts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contracts` | All of the tenant's contracts |
//! | `POST` | `/contracts` | Body: [`NewContract`]; 409 if the condominium already has an active contract |
//! | `GET`  | `/contracts/:id` | |
//! | `PUT`  | `/contracts/:id` | Body: [`ContractTerms`]; status is untouched |
//! | `POST` | `/contracts/:id/status` | Body: `{"status":"paid"}` |
//! | `GET`  | `/contracts/:id/invoice` | Derived monthly billable amount |

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sindico_core::{
  changeset::ChangeSet,
  contract::{self, Contract, ContractStatus, ContractTerms, NewContract},
  store::AdminStore,
};
use uuid::Uuid;

use crate::{ApiState, emit, error::ApiError};

/// `GET /contracts` — every contract under the tenant, any status.
pub async fn list<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Json<Vec<Contract>>, ApiError> {
  let ctx = state.scope(&headers)?;
  Ok(Json(state.store.list_contracts(&ctx).await?))
}

/// `POST /contracts` — open a pending contract for an existing condominium.
pub async fn create<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewContract>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  let (created, events) =
    contract::open_contract(state.store.as_ref(), &ctx, body).await?;
  emit(&ctx, &events);
  Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /contracts/:id`
pub async fn get_one<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Contract>, ApiError> {
  let ctx = state.scope(&headers)?;
  let found = state
    .store
    .get_contract(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("contract {id} not found")))?;
  Ok(Json(found))
}

/// `PUT /contracts/:id` — renegotiate the terms of an existing contract.
pub async fn update_terms<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(terms): Json<ContractTerms>,
) -> Result<Json<Contract>, ApiError> {
  let ctx = state.scope(&headers)?;
  terms.validate()?;
  let mut existing = state
    .store
    .get_contract(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("contract {id} not found")))?;
  existing.terms = terms;

  let mut changes = ChangeSet::new();
  changes.update_contract(existing.clone());
  state.store.commit(&ctx, changes).await?;
  Ok(Json(existing))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: ContractStatus,
}

/// `POST /contracts/:id/status` — drive the lifecycle state machine.
/// Illegal transitions are 400; a second active contract is 409.
pub async fn change_status<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Contract>, ApiError> {
  let ctx = state.scope(&headers)?;
  let (updated, events) = contract::change_contract_status(
    state.store.as_ref(),
    &ctx,
    id,
    body.status,
  )
  .await?;
  emit(&ctx, &events);
  Ok(Json(updated))
}

#[derive(Debug, Serialize)]
pub struct Invoice {
  pub contract_id:   Uuid,
  /// Whole centavos.
  pub monthly_total: i64,
}

/// `GET /contracts/:id/invoice`
pub async fn invoice<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ApiError> {
  let ctx = state.scope(&headers)?;
  let found = state
    .store
    .get_contract(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("contract {id} not found")))?;
  Ok(Json(Invoice {
    contract_id:   id,
    monthly_total: found.monthly_invoice_total(),
  }))
}
