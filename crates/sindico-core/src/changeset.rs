//! The unit-of-work input: staged add/update/remove operations across all
//! aggregate types, committed atomically by the store.
//!
//! The [`Staged`] enum is the explicit, compile-time registry of
//! tenant-scoped aggregates. Adding an aggregate means adding variants
//! here and teaching the store to lower them — there is no runtime type
//! inspection anywhere.

use uuid::Uuid;

use crate::{
  allocation::Allocation, condominium::Condominium, contract::Contract,
  employee::Employee, work_post::WorkPost,
};

/// One staged operation. Inserts and updates carry the full entity;
/// removals carry only the id (scoping to the caller's tenant happens at
/// commit time).
#[derive(Debug, Clone)]
pub enum Staged {
  InsertCondominium(Condominium),
  UpdateCondominium(Condominium),
  DeleteCondominium(Uuid),

  InsertContract(Contract),
  UpdateContract(Contract),
  DeleteContract(Uuid),

  InsertWorkPost(WorkPost),
  UpdateWorkPost(WorkPost),
  DeleteWorkPost(Uuid),

  InsertEmployee(Employee),
  UpdateEmployee(Employee),
  DeleteEmployee(Uuid),

  InsertAllocation(Allocation),
  UpdateAllocation(Allocation),
  DeleteAllocation(Uuid),
}

/// Staged changes from one or more repositories, applied in insertion order
/// as a single atomic commit: either every operation succeeds or none are
/// applied.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
  ops: Vec<Staged>,
}

impl ChangeSet {
  pub fn new() -> Self { Self::default() }

  pub fn is_empty(&self) -> bool { self.ops.is_empty() }

  pub fn len(&self) -> usize { self.ops.len() }

  pub fn into_ops(self) -> Vec<Staged> { self.ops }

  // ── Condominiums ──────────────────────────────────────────────────────

  pub fn add_condominium(&mut self, c: Condominium) {
    self.ops.push(Staged::InsertCondominium(c));
  }

  pub fn update_condominium(&mut self, c: Condominium) {
    self.ops.push(Staged::UpdateCondominium(c));
  }

  pub fn remove_condominium(&mut self, id: Uuid) {
    self.ops.push(Staged::DeleteCondominium(id));
  }

  // ── Contracts ─────────────────────────────────────────────────────────

  pub fn add_contract(&mut self, c: Contract) {
    self.ops.push(Staged::InsertContract(c));
  }

  pub fn update_contract(&mut self, c: Contract) {
    self.ops.push(Staged::UpdateContract(c));
  }

  pub fn remove_contract(&mut self, id: Uuid) {
    self.ops.push(Staged::DeleteContract(id));
  }

  // ── Work posts ────────────────────────────────────────────────────────

  pub fn add_work_post(&mut self, p: WorkPost) {
    self.ops.push(Staged::InsertWorkPost(p));
  }

  pub fn update_work_post(&mut self, p: WorkPost) {
    self.ops.push(Staged::UpdateWorkPost(p));
  }

  pub fn remove_work_post(&mut self, id: Uuid) {
    self.ops.push(Staged::DeleteWorkPost(id));
  }

  // ── Employees ─────────────────────────────────────────────────────────

  pub fn add_employee(&mut self, e: Employee) {
    self.ops.push(Staged::InsertEmployee(e));
  }

  pub fn update_employee(&mut self, e: Employee) {
    self.ops.push(Staged::UpdateEmployee(e));
  }

  pub fn remove_employee(&mut self, id: Uuid) {
    self.ops.push(Staged::DeleteEmployee(id));
  }

  // ── Allocations ───────────────────────────────────────────────────────

  pub fn add_allocation(&mut self, a: Allocation) {
    self.ops.push(Staged::InsertAllocation(a));
  }

  pub fn update_allocation(&mut self, a: Allocation) {
    self.ops.push(Staged::UpdateAllocation(a));
  }

  pub fn remove_allocation(&mut self, id: Uuid) {
    self.ops.push(Staged::DeleteAllocation(id));
  }
}
