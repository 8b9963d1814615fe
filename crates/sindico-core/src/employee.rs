//! Employees — tenant-level staff, associated to condominiums only through
//! allocations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  entity::{EntityMeta, TenantScoped},
  tenant::TenantContext,
  Error, Result,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub meta:     EntityMeta,
  pub name:     String,
  /// Civil identifier (e.g. a CPF). Unique per tenant.
  pub civil_id: String,
  pub hired_on: NaiveDate,
}

impl TenantScoped for Employee {
  const KIND: &'static str = "employee";

  fn meta(&self) -> &EntityMeta { &self.meta }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
  pub name:     String,
  pub civil_id: String,
  pub hired_on: NaiveDate,
}

impl NewEmployee {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::validation("employee name must not be empty"));
    }
    if self.civil_id.trim().is_empty() {
      return Err(Error::validation("employee civil id must not be empty"));
    }
    Ok(())
  }
}

impl Employee {
  pub fn new(ctx: &TenantContext, input: NewEmployee) -> Result<Self> {
    input.validate()?;
    Ok(Self {
      meta:     EntityMeta::new(ctx)?,
      name:     input.name,
      civil_id: input.civil_id,
      hired_on: input.hired_on,
    })
  }
}
