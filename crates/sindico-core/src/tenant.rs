//! Tenant identity and the per-operation [`TenantContext`].
//!
//! The context is resolved once at the edge of an operation and passed
//! explicitly as an argument into every store and orchestrator call — there
//! is no ambient request-scoped state. A context with no tenant is
//! *anonymous*: all tenant-scoped reads under it return empty, and all
//! writes are rejected (fail closed, never open).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── TenantId ────────────────────────────────────────────────────────────────

/// The owning tenant of a record. Set once at creation, immutable thereafter.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  /// The unset tenant id. Only meaningful on entities built outside a
  /// resolved context; the commit coordinator stamps the caller's tenant
  /// over it.
  pub fn nil() -> Self { Self(Uuid::nil()) }

  pub fn is_nil(self) -> bool { self.0.is_nil() }
}

impl Default for TenantId {
  fn default() -> Self { Self::nil() }
}

impl std::fmt::Display for TenantId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

// ─── TenantContext ───────────────────────────────────────────────────────────

/// The resolved caller identity for the duration of one operation.
///
/// `acting_user` is carried for audit attribution only; it plays no part in
/// authorization decisions inside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
  tenant:          Option<TenantId>,
  pub acting_user: Option<Uuid>,
}

impl TenantContext {
  /// A context with a known tenant.
  pub fn resolved(tenant: TenantId) -> Self {
    Self { tenant: Some(tenant), acting_user: None }
  }

  /// A context with no tenant. Reads return empty; writes fail.
  pub fn anonymous() -> Self { Self { tenant: None, acting_user: None } }

  /// Resolve in order: an explicit tenant id supplied with the call, then a
  /// configured fallback (interactive/non-production use), then anonymous.
  ///
  /// The fallback is a convenience hazard if left enabled in production —
  /// it is off unless the server configuration names one.
  pub fn resolve(
    explicit: Option<TenantId>,
    fallback: Option<TenantId>,
  ) -> Self {
    match explicit.or(fallback) {
      Some(t) => Self::resolved(t),
      None => Self::anonymous(),
    }
  }

  pub fn with_acting_user(mut self, user: Uuid) -> Self {
    self.acting_user = Some(user);
    self
  }

  /// The resolved tenant, if any.
  pub fn tenant(&self) -> Option<TenantId> { self.tenant }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_tenant_wins_over_fallback() {
    let explicit = TenantId::new();
    let fallback = TenantId::new();
    let ctx = TenantContext::resolve(Some(explicit), Some(fallback));
    assert_eq!(ctx.tenant(), Some(explicit));
  }

  #[test]
  fn fallback_applies_when_no_explicit_tenant() {
    let fallback = TenantId::new();
    let ctx = TenantContext::resolve(None, Some(fallback));
    assert_eq!(ctx.tenant(), Some(fallback));
  }

  #[test]
  fn no_signal_resolves_anonymous() {
    let ctx = TenantContext::resolve(None, None);
    assert_eq!(ctx.tenant(), None);
  }

  #[test]
  fn acting_user_is_carried() {
    let user = Uuid::new_v4();
    let ctx = TenantContext::resolved(TenantId::new()).with_acting_user(user);
    assert_eq!(ctx.acting_user, Some(user));
  }
}
