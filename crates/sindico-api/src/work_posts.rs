//! Handlers for `/work-posts` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use sindico_core::{
  changeset::ChangeSet,
  entity::TenantScoped as _,
  event::DomainEvent,
  store::AdminStore,
  work_post::{NewWorkPost, WorkPost, WorkPostSpec},
  Error,
};
use uuid::Uuid;

use crate::{ApiState, emit, error::ApiError};

/// `GET /work-posts` — every work post under the tenant, across
/// condominiums.
pub async fn list<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
) -> Result<Json<Vec<WorkPost>>, ApiError> {
  let ctx = state.scope(&headers)?;
  Ok(Json(state.store.list_work_posts(&ctx).await?))
}

/// `POST /work-posts` — add a post to an existing condominium.
pub async fn create<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewWorkPost>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  let condominium = state
    .store
    .get_condominium(&ctx, body.condominium_id)
    .await?
    .ok_or_else(|| Error::not_found("condominium", body.condominium_id))?;

  let post = WorkPost::new(&ctx, condominium.id(), body.spec)?;
  let mut changes = ChangeSet::new();
  changes.add_work_post(post.clone());
  state.store.commit(&ctx, changes).await?;

  emit(&ctx, &[DomainEvent::WorkPostOpened {
    work_post_id:   post.id(),
    condominium_id: condominium.id(),
  }]);
  Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /work-posts/:id`
pub async fn get_one<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<WorkPost>, ApiError> {
  let ctx = state.scope(&headers)?;
  let post = state
    .store
    .get_work_post(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("work post {id} not found")))?;
  Ok(Json(post))
}

/// `PUT /work-posts/:id` — replace the post's spec; its condominium is fixed.
pub async fn update<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(spec): Json<WorkPostSpec>,
) -> Result<Json<WorkPost>, ApiError> {
  let ctx = state.scope(&headers)?;
  spec.validate()?;
  let mut post = state
    .store
    .get_work_post(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("work post {id} not found")))?;

  post.name = spec.name;
  post.shift = spec.shift;
  post.schedule = spec.schedule;
  post.staff_count = spec.staff_count;

  let mut changes = ChangeSet::new();
  changes.update_work_post(post.clone());
  state.store.commit(&ctx, changes).await?;
  Ok(Json(post))
}

/// `DELETE /work-posts/:id` — refused while allocations reference the post.
pub async fn delete<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  let ctx = state.scope(&headers)?;
  let mut changes = ChangeSet::new();
  changes.remove_work_post(id);
  state.store.commit(&ctx, changes).await?;
  Ok(StatusCode::NO_CONTENT)
}
