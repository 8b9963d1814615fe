//! Daily roster workflows: scheduling, absences, and corrections.
//!
//! An employee holds at most one allocation per calendar date, and a work
//! post is covered by at most one allocation per date. Both rules are
//! pre-checked here and guarded by partial unique indexes at commit time.
//! The only sanctioned way around them is the explicit correction flow
//! ([`replace_allocation`]), which marks the old row replaced and inserts
//! the new one in the same commit.

use uuid::Uuid;

use crate::{
  allocation::{Allocation, AllocationStatus, NewAllocation},
  changeset::ChangeSet,
  entity::TenantScoped as _,
  event::DomainEvent,
  store::AdminStore,
  tenant::TenantContext,
  Error, Result,
};

/// Check that both ends of the allocation exist under this tenant and that
/// neither the employee nor the post is already booked on the date.
/// `exclude` skips one allocation id, for the correction flow.
async fn check_slot_free<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  input: &NewAllocation,
  exclude: Option<Uuid>,
) -> Result<()> {
  store
    .get_employee(ctx, input.employee_id)
    .await?
    .ok_or_else(|| Error::not_found("employee", input.employee_id))?;
  store
    .get_work_post(ctx, input.work_post_id)
    .await?
    .ok_or_else(|| Error::not_found("work post", input.work_post_id))?;

  if let Some(existing) = store
    .allocation_for_employee_on(ctx, input.employee_id, input.date)
    .await?
    && Some(existing.id()) != exclude
  {
    return Err(Error::conflict(format!(
      "employee {} already has an allocation on {}",
      input.employee_id, input.date
    )));
  }

  if let Some(existing) = store
    .allocation_for_post_on(ctx, input.work_post_id, input.date)
    .await?
    && Some(existing.id()) != exclude
  {
    return Err(Error::conflict(format!(
      "work post {} is already covered on {}",
      input.work_post_id, input.date
    )));
  }

  Ok(())
}

/// Schedule an employee onto a work post for one date.
pub async fn schedule_allocation<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  input: NewAllocation,
) -> Result<(Allocation, Vec<DomainEvent>)> {
  check_slot_free(store, ctx, &input, None).await?;

  let allocation = Allocation::new(ctx, input)?;

  let mut changes = ChangeSet::new();
  changes.add_allocation(allocation.clone());
  store.commit(ctx, changes).await?;

  let events = vec![DomainEvent::AllocationScheduled {
    allocation_id: allocation.id(),
    employee_id:   allocation.employee_id,
    work_post_id:  allocation.work_post_id,
    date:          allocation.date,
  }];
  Ok((allocation, events))
}

/// Mark a scheduled allocation as an absence.
pub async fn record_absence<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  allocation_id: Uuid,
) -> Result<(Allocation, Vec<DomainEvent>)> {
  let mut allocation = store
    .get_allocation(ctx, allocation_id)
    .await?
    .ok_or_else(|| Error::not_found("allocation", allocation_id))?;

  if allocation.status != AllocationStatus::Scheduled {
    return Err(Error::conflict(format!(
      "allocation {} is {}, only scheduled allocations can record an absence",
      allocation_id, allocation.status
    )));
  }
  allocation.status = AllocationStatus::AbsenceRecorded;

  let mut changes = ChangeSet::new();
  changes.update_allocation(allocation.clone());
  store.commit(ctx, changes).await?;

  Ok((allocation, vec![DomainEvent::AbsenceRecorded { allocation_id }]))
}

/// Correction flow: supersede an existing allocation with a new one.
///
/// The old row is kept with status `Replaced` (audit trail); the new row is
/// inserted. Both changes land in one commit, so the roster is never
/// half-corrected.
pub async fn replace_allocation<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  old_id: Uuid,
  input: NewAllocation,
) -> Result<(Allocation, Vec<DomainEvent>)> {
  let mut old = store
    .get_allocation(ctx, old_id)
    .await?
    .ok_or_else(|| Error::not_found("allocation", old_id))?;

  if old.status == AllocationStatus::Replaced {
    return Err(Error::conflict(format!(
      "allocation {old_id} was already replaced"
    )));
  }

  check_slot_free(store, ctx, &input, Some(old_id)).await?;

  old.status = AllocationStatus::Replaced;
  let replacement = Allocation::new(ctx, input)?;

  let mut changes = ChangeSet::new();
  changes.update_allocation(old);
  changes.add_allocation(replacement.clone());
  store.commit(ctx, changes).await?;

  let events = vec![DomainEvent::AllocationReplaced {
    old_allocation_id: old_id,
    new_allocation_id: replacement.id(),
  }];
  Ok((replacement, events))
}
