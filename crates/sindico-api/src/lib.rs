//! JSON REST API for Síndico.
//!
//! Exposes an axum [`Router`] backed by any [`sindico_core::store::AdminStore`].
//! Every request is scoped to a tenant before any handler logic runs; auth,
//! TLS, and transport concerns are the caller's responsibility.
//!
//! # Tenant scoping
//!
//! The tenant is taken from the `x-tenant-id` header, falling back to the
//! deployment-level tenant configured on [`ApiState`]. Requests that resolve
//! to no tenant still reach the handlers — reads come back empty and writes
//! are rejected by the store, so an unscoped request can never touch another
//! tenant's data. `x-acting-user` optionally attributes the change.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sindico_api::api_router(state))
//! ```

pub mod allocations;
pub mod condominiums;
pub mod contracts;
pub mod employees;
pub mod error;
pub mod work_posts;

use std::sync::Arc;

use axum::{
  Router,
  http::HeaderMap,
  routing::{get, post},
};
use sindico_core::{
  event::DomainEvent,
  store::AdminStore,
  tenant::{TenantContext, TenantId},
};
use uuid::Uuid;

pub use error::ApiError;

/// Header carrying the caller's tenant id.
pub const TENANT_HEADER: &str = "x-tenant-id";
/// Header attributing the request to a user within the tenant.
pub const ACTING_USER_HEADER: &str = "x-acting-user";

/// Shared state for all API handlers.
pub struct ApiState<S> {
  pub store:           Arc<S>,
  /// Tenant applied when a request carries no `x-tenant-id` header, for
  /// single-tenant deployments. `None` means headerless requests stay
  /// unscoped.
  pub fallback_tenant: Option<TenantId>,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:           Arc::clone(&self.store),
      fallback_tenant: self.fallback_tenant,
    }
  }
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, fallback_tenant: Option<TenantId>) -> Self {
    Self { store, fallback_tenant }
  }

  /// Resolve the request's tenant scope from its headers.
  ///
  /// A present-but-malformed header is a client error, never a silent
  /// fallback to another tenant.
  pub fn scope(&self, headers: &HeaderMap) -> Result<TenantContext, ApiError> {
    let explicit = match header_uuid(headers, TENANT_HEADER)? {
      Some(id) => Some(TenantId(id)),
      None => None,
    };
    let ctx = TenantContext::resolve(explicit, self.fallback_tenant);
    match header_uuid(headers, ACTING_USER_HEADER)? {
      Some(user) => Ok(ctx.with_acting_user(user)),
      None => Ok(ctx),
    }
  }
}

fn header_uuid(
  headers: &HeaderMap,
  name: &str,
) -> Result<Option<Uuid>, ApiError> {
  let Some(value) = headers.get(name) else {
    return Ok(None);
  };
  let text = value
    .to_str()
    .map_err(|_| ApiError::BadRequest(format!("{name} is not valid UTF-8")))?;
  let id = Uuid::parse_str(text).map_err(|_| {
    ApiError::BadRequest(format!("{name} is not a valid UUID: {text:?}"))
  })?;
  Ok(Some(id))
}

/// Log the domain events raised by a successful write.
pub(crate) fn emit(ctx: &TenantContext, events: &[DomainEvent]) {
  for event in events {
    tracing::info!(
      tenant = ?ctx.tenant(),
      acting_user = ?ctx.acting_user,
      ?event,
      "domain event"
    );
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: AdminStore + 'static,
{
  Router::new()
    // Condominiums
    .route(
      "/condominiums",
      get(condominiums::list::<S>).post(condominiums::create::<S>),
    )
    .route("/condominiums/full", post(condominiums::create_full::<S>))
    .route(
      "/condominiums/full/validate",
      post(condominiums::validate_full::<S>),
    )
    .route(
      "/condominiums/{id}",
      get(condominiums::get_one::<S>)
        .put(condominiums::update::<S>)
        .delete(condominiums::delete::<S>),
    )
    .route(
      "/condominiums/{id}/contracts",
      get(condominiums::list_contracts::<S>),
    )
    .route(
      "/condominiums/{id}/work-posts",
      get(condominiums::list_work_posts::<S>),
    )
    // Contracts
    .route(
      "/contracts",
      get(contracts::list::<S>).post(contracts::create::<S>),
    )
    .route(
      "/contracts/{id}",
      get(contracts::get_one::<S>).put(contracts::update_terms::<S>),
    )
    .route("/contracts/{id}/status", post(contracts::change_status::<S>))
    .route("/contracts/{id}/invoice", get(contracts::invoice::<S>))
    // Work posts
    .route(
      "/work-posts",
      get(work_posts::list::<S>).post(work_posts::create::<S>),
    )
    .route(
      "/work-posts/{id}",
      get(work_posts::get_one::<S>)
        .put(work_posts::update::<S>)
        .delete(work_posts::delete::<S>),
    )
    // Employees
    .route(
      "/employees",
      get(employees::list::<S>).post(employees::create::<S>),
    )
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update::<S>)
        .delete(employees::delete::<S>),
    )
    // Allocations
    .route(
      "/allocations",
      get(allocations::list::<S>).post(allocations::schedule::<S>),
    )
    .route("/allocations/{id}", get(allocations::get_one::<S>))
    .route(
      "/allocations/{id}/absence",
      post(allocations::record_absence::<S>),
    )
    .route(
      "/allocations/{id}/replace",
      post(allocations::replace::<S>),
    )
    .with_state(state)
}
