//! The composed identity-and-ownership value shared by all aggregates.
//!
//! Rather than a base-class hierarchy, every aggregate embeds an
//! [`EntityMeta`] and implements [`TenantScoped`]. The generic filter and
//! commit logic works against that capability, so a new aggregate type
//! inherits tenant scoping by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  tenant::{TenantContext, TenantId},
  Error, Result,
};

/// Identity, ownership, and creation time for a tenant-scoped aggregate.
///
/// The id is assigned here, never by the store, so entities are valid and
/// comparable before being persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
  pub id:         Uuid,
  pub tenant_id:  TenantId,
  pub created_at: DateTime<Utc>,
}

impl EntityMeta {
  /// Mint metadata owned by the context's tenant.
  ///
  /// Fails with [`Error::TenantUnresolved`] under an anonymous context —
  /// entities are never constructed without a known owner.
  pub fn new(ctx: &TenantContext) -> Result<Self> {
    let tenant_id = ctx.tenant().ok_or(Error::TenantUnresolved)?;
    Ok(Self {
      id: Uuid::new_v4(),
      tenant_id,
      created_at: Utc::now(),
    })
  }
}

/// Capability marker for tenant-scoped aggregates.
pub trait TenantScoped {
  /// A short lowercase noun used in error messages ("condominium", ...).
  const KIND: &'static str;

  fn meta(&self) -> &EntityMeta;

  fn id(&self) -> Uuid { self.meta().id }

  fn tenant_id(&self) -> TenantId { self.meta().tenant_id }
}
