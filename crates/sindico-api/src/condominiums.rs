//! Handlers for `/condominiums` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/condominiums` | Optional `?registration=` exact-match finder |
//! | `POST`   | `/condominiums` | Body: [`NewCondominium`]; returns 201 |
//! | `POST`   | `/condominiums/full` | Cascading create: [`CondominiumBundleInput`]; returns 201 + bundle |
//! | `POST`   | `/condominiums/full/validate` | Pre-flight; returns `{"valid":...}` |
//! | `GET`    | `/condominiums/:id` | |
//! | `PUT`    | `/condominiums/:id` | Body: [`NewCondominium`] |
//! | `DELETE` | `/condominiums/:id` | 409 while contracts or work posts remain |
//! | `GET`    | `/condominiums/:id/contracts` | |
//! | `GET`    | `/condominiums/:id/work-posts` | |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use sindico_core::{
  cascade::{self, CondominiumBundleInput},
  changeset::ChangeSet,
  condominium::{Condominium, NewCondominium},
  contract::Contract,
  entity::TenantScoped as _,
  event::DomainEvent,
  store::AdminStore,
  work_post::WorkPost,
  Error,
};
use uuid::Uuid;

use crate::{ApiState, emit, error::ApiError};

// ─── List / find ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact registration-number lookup within the tenant.
  pub registration: Option<String>,
}

/// `GET /condominiums[?registration=...]`
pub async fn list<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Condominium>>, ApiError> {
  let ctx = state.scope(&headers)?;
  let condominiums = match params.registration {
    Some(reg) => state
      .store
      .find_condominium_by_registration(&ctx, &reg)
      .await?
      .into_iter()
      .collect(),
    None => state.store.list_condominiums(&ctx).await?,
  };
  Ok(Json(condominiums))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /condominiums/:id`
pub async fn get_one<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Condominium>, ApiError> {
  let ctx = state.scope(&headers)?;
  let condominium = state
    .store
    .get_condominium(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("condominium {id} not found")))?;
  Ok(Json(condominium))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /condominiums` — a bare condominium, no contract attached.
pub async fn create<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewCondominium>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  if state
    .store
    .find_condominium_by_registration(&ctx, &body.registration_number)
    .await?
    .is_some()
  {
    return Err(
      Error::conflict(format!(
        "registration number {:?} is already in use",
        body.registration_number
      ))
      .into(),
    );
  }

  let condominium = Condominium::new(&ctx, body)?;
  let mut changes = ChangeSet::new();
  changes.add_condominium(condominium.clone());
  state.store.commit(&ctx, changes).await?;

  emit(&ctx, &[DomainEvent::CondominiumRegistered {
    condominium_id: condominium.id(),
  }]);
  Ok((StatusCode::CREATED, Json(condominium)))
}

// ─── Cascading create ─────────────────────────────────────────────────────────

/// `POST /condominiums/full` — condominium + contract + work posts in one
/// transaction. Returns 201 + the whole persisted bundle.
pub async fn create_full<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<CondominiumBundleInput>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  let (bundle, events) =
    cascade::create_full_condominium(state.store.as_ref(), &ctx, body).await?;
  emit(&ctx, &events);
  Ok((StatusCode::CREATED, Json(bundle)))
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
  pub valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// `POST /condominiums/full/validate` — dry-run of the cascade's validation
/// phase. Always 200; the body says whether the bundle would be accepted.
pub async fn validate_full<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<CondominiumBundleInput>,
) -> Result<Json<ValidationReport>, ApiError> {
  let ctx = state.scope(&headers)?;
  let report =
    match cascade::validate_bundle(state.store.as_ref(), &ctx, &body).await {
      Ok(()) => ValidationReport { valid: true, error: None },
      Err(e @ (Error::Validation(_) | Error::Conflict(_))) => {
        ValidationReport { valid: false, error: Some(e.to_string()) }
      }
      Err(e) => return Err(e.into()),
    };
  Ok(Json(report))
}

// ─── Update / delete ──────────────────────────────────────────────────────────

/// `PUT /condominiums/:id` — full replacement of the mutable profile.
pub async fn update<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(body): Json<NewCondominium>,
) -> Result<Json<Condominium>, ApiError> {
  let ctx = state.scope(&headers)?;
  body.validate()?;
  let mut condominium = state
    .store
    .get_condominium(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("condominium {id} not found")))?;

  condominium.registration_number = body.registration_number;
  condominium.name = body.name;
  condominium.address = body.address;

  let mut changes = ChangeSet::new();
  changes.update_condominium(condominium.clone());
  state.store.commit(&ctx, changes).await?;
  Ok(Json(condominium))
}

/// `DELETE /condominiums/:id` — refused while dependents remain.
pub async fn delete<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  let ctx = state.scope(&headers)?;
  let mut changes = ChangeSet::new();
  changes.remove_condominium(id);
  state.store.commit(&ctx, changes).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Children ─────────────────────────────────────────────────────────────────

/// `GET /condominiums/:id/contracts`
pub async fn list_contracts<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Contract>>, ApiError> {
  let ctx = state.scope(&headers)?;
  Ok(Json(state.store.list_contracts_for(&ctx, id).await?))
}

/// `GET /condominiums/:id/work-posts`
pub async fn list_work_posts<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<WorkPost>>, ApiError> {
  let ctx = state.scope(&headers)?;
  Ok(Json(state.store.list_work_posts_for(&ctx, id).await?))
}
