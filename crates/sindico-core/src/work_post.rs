//! Work posts — staffed slots attached to a condominium.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  entity::{EntityMeta, TenantScoped},
  tenant::TenantContext,
  Error, Result,
};

/// Which part of the day the post covers.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Shift {
  Day,
  Night,
}

/// A staffing slot at a condominium, e.g. "night doorman, 12x36".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPost {
  pub meta:           EntityMeta,
  pub condominium_id: Uuid,
  pub name:           String,
  pub shift:          Shift,
  /// Free-text schedule descriptor, e.g. "12x36" or "mon-fri 08:00-17:00".
  pub schedule:       String,
  pub staff_count:    i32,
}

impl TenantScoped for WorkPost {
  const KIND: &'static str = "work post";

  fn meta(&self) -> &EntityMeta { &self.meta }
}

/// Shape of one work post, without the owning condominium. Used both for
/// standalone creation and inside the cascade bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPostSpec {
  pub name:        String,
  pub shift:       Shift,
  pub schedule:    String,
  pub staff_count: i32,
}

impl WorkPostSpec {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::validation("work post name must not be empty"));
    }
    if self.schedule.trim().is_empty() {
      return Err(Error::validation(format!(
        "work post {:?} is missing a schedule",
        self.name
      )));
    }
    if self.staff_count <= 0 {
      return Err(Error::validation(format!(
        "work post {:?} staff count must be positive, got {}",
        self.name, self.staff_count
      )));
    }
    Ok(())
  }
}

/// Input for creating a work post against an existing condominium.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkPost {
  pub condominium_id: Uuid,
  #[serde(flatten)]
  pub spec:           WorkPostSpec,
}

impl WorkPost {
  pub fn new(
    ctx: &TenantContext,
    condominium_id: Uuid,
    spec: WorkPostSpec,
  ) -> Result<Self> {
    spec.validate()?;
    Ok(Self {
      meta: EntityMeta::new(ctx)?,
      condominium_id,
      name: spec.name,
      shift: spec.shift,
      schedule: spec.schedule,
      staff_count: spec.staff_count,
    })
  }
}
