//! Allocations — one employee covering one work post on one calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  entity::{EntityMeta, TenantScoped},
  tenant::TenantContext,
  Result,
};

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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AllocationStatus {
  Scheduled,
  AbsenceRecorded,
  /// Superseded by a correction; replaced rows no longer count against the
  /// one-per-employee-per-date and one-per-post-per-date invariants.
  Replaced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
  pub meta:         EntityMeta,
  pub employee_id:  Uuid,
  pub work_post_id: Uuid,
  pub date:         NaiveDate,
  pub status:       AllocationStatus,
}

impl TenantScoped for Allocation {
  const KIND: &'static str = "allocation";

  fn meta(&self) -> &EntityMeta { &self.meta }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAllocation {
  pub employee_id:  Uuid,
  pub work_post_id: Uuid,
  pub date:         NaiveDate,
}

impl Allocation {
  pub fn new(ctx: &TenantContext, input: NewAllocation) -> Result<Self> {
    Ok(Self {
      meta:         EntityMeta::new(ctx)?,
      employee_id:  input.employee_id,
      work_post_id: input.work_post_id,
      date:         input.date,
      status:       AllocationStatus::Scheduled,
    })
  }
}
