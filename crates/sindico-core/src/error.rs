//! Error types for `sindico-core`.
//!
//! One taxonomy for the whole core: validation and not-found conditions are
//! expected, recoverable-by-caller outcomes; conflicts signal a unique key or
//! invariant violation; persistence failures are fatal for the operation and
//! are never retried here.

use thiserror::Error;
use uuid::Uuid;

use crate::contract::ContractStatus;

#[derive(Debug, Error)]
pub enum Error {
  /// Structurally invalid or business-rule-violating input.
  #[error("validation failed: {0}")]
  Validation(String),

  /// The target id does not exist under the current tenant's view. A row
  /// owned by another tenant produces the same error as a missing row.
  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: Uuid },

  /// Duplicate unique key or invariant violation detected at commit time.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("invalid contract status transition: {from} -> {to}")]
  InvalidTransition {
    from: ContractStatus,
    to:   ContractStatus,
  },

  /// A write was attempted with an anonymous tenant context.
  #[error("no tenant resolved for this operation")]
  TenantUnresolved,

  /// A staged entity carries a tenant id that differs from the caller's.
  #[error("entity is owned by another tenant")]
  ForeignTenant,

  /// The underlying store failed. Surfaced as fatal; the caller decides
  /// whether to retry.
  #[error("persistence failure: {0}")]
  Persistence(String),
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  pub fn conflict(msg: impl Into<String>) -> Self { Self::Conflict(msg.into()) }

  pub fn not_found(kind: &'static str, id: Uuid) -> Self {
    Self::NotFound { kind, id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
