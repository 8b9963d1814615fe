//! Handlers for `/employees` endpoints.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use serde::Deserialize;
use sindico_core::{
  changeset::ChangeSet,
  employee::{Employee, NewEmployee},
  entity::TenantScoped as _,
  event::DomainEvent,
  store::AdminStore,
  Error,
};
use uuid::Uuid;

use crate::{ApiState, emit, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact civil-id lookup within the tenant.
  pub civil_id: Option<String>,
}

/// `GET /employees[?civil_id=...]`
pub async fn list<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let ctx = state.scope(&headers)?;
  let employees = match params.civil_id {
    Some(civil_id) => state
      .store
      .find_employee_by_civil_id(&ctx, &civil_id)
      .await?
      .into_iter()
      .collect(),
    None => state.store.list_employees(&ctx).await?,
  };
  Ok(Json(employees))
}

/// `GET /employees/:id`
pub async fn get_one<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
  let ctx = state.scope(&headers)?;
  let employee = state
    .store
    .get_employee(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;
  Ok(Json(employee))
}

/// `POST /employees`
pub async fn create<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Json(body): Json<NewEmployee>,
) -> Result<impl IntoResponse, ApiError> {
  let ctx = state.scope(&headers)?;
  if state
    .store
    .find_employee_by_civil_id(&ctx, &body.civil_id)
    .await?
    .is_some()
  {
    return Err(
      Error::conflict(format!(
        "civil id {:?} is already registered",
        body.civil_id
      ))
      .into(),
    );
  }

  let employee = Employee::new(&ctx, body)?;
  let mut changes = ChangeSet::new();
  changes.add_employee(employee.clone());
  state.store.commit(&ctx, changes).await?;

  emit(&ctx, &[DomainEvent::EmployeeRegistered {
    employee_id: employee.id(),
  }]);
  Ok((StatusCode::CREATED, Json(employee)))
}

/// `PUT /employees/:id`
pub async fn update<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
  Json(body): Json<NewEmployee>,
) -> Result<Json<Employee>, ApiError> {
  let ctx = state.scope(&headers)?;
  body.validate()?;
  let mut employee = state
    .store
    .get_employee(&ctx, id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))?;

  employee.name = body.name;
  employee.civil_id = body.civil_id;
  employee.hired_on = body.hired_on;

  let mut changes = ChangeSet::new();
  changes.update_employee(employee.clone());
  state.store.commit(&ctx, changes).await?;
  Ok(Json(employee))
}

/// `DELETE /employees/:id` — refused while allocations reference the
/// employee.
pub async fn delete<S: AdminStore>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  let ctx = state.scope(&headers)?;
  let mut changes = ChangeSet::new();
  changes.remove_employee(id);
  state.store.commit(&ctx, changes).await?;
  Ok(StatusCode::NO_CONTENT)
}
