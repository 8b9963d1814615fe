//! The `AdminStore` trait — repository reads plus the unit-of-work commit.
//!
//! The trait is implemented by storage backends (e.g.
//! `sindico-store-sqlite`). Higher layers (`sindico-api`, the orchestrators
//! in this crate) depend on this abstraction, not on any concrete backend.
//!
//! Every read takes the caller's [`TenantContext`] and is restricted to
//! rows owned by that tenant. Under an anonymous context reads return
//! `None`/empty — fail closed. `get_*` on an id owned by another tenant is
//! indistinguishable from a missing id; callers never learn whether a
//! foreign row exists.
//!
//! Writes are staged into a [`ChangeSet`] and persisted only through
//! [`AdminStore::commit`], which applies the whole set in one store
//! transaction.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  allocation::Allocation, changeset::ChangeSet, condominium::Condominium,
  contract::Contract, employee::Employee, tenant::TenantContext,
  work_post::WorkPost, Error,
};

pub trait AdminStore: Send + Sync {
  // ── Condominiums ──────────────────────────────────────────────────────

  fn get_condominium<'a>(
    &'a self,
    ctx: &'a TenantContext,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Condominium>, Error>> + Send + 'a;

  fn list_condominiums<'a>(
    &'a self,
    ctx: &'a TenantContext,
  ) -> impl Future<Output = Result<Vec<Condominium>, Error>> + Send + 'a;

  /// Lookup by the unique-per-tenant tax/registration number.
  fn find_condominium_by_registration<'a>(
    &'a self,
    ctx: &'a TenantContext,
    registration: &'a str,
  ) -> impl Future<Output = Result<Option<Condominium>, Error>> + Send + 'a;

  // ── Contracts ─────────────────────────────────────────────────────────

  fn get_contract<'a>(
    &'a self,
    ctx: &'a TenantContext,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contract>, Error>> + Send + 'a;

  fn list_contracts<'a>(
    &'a self,
    ctx: &'a TenantContext,
  ) -> impl Future<Output = Result<Vec<Contract>, Error>> + Send + 'a;

  fn list_contracts_for<'a>(
    &'a self,
    ctx: &'a TenantContext,
    condominium_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contract>, Error>> + Send + 'a;

  /// The contract currently in an active status (pending or paid) for the
  /// condominium, if any. At most one exists by invariant.
  fn active_contract_for<'a>(
    &'a self,
    ctx: &'a TenantContext,
    condominium_id: Uuid,
  ) -> impl Future<Output = Result<Option<Contract>, Error>> + Send + 'a;

  // ── Work posts ────────────────────────────────────────────────────────

  fn get_work_post<'a>(
    &'a self,
    ctx: &'a TenantContext,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<WorkPost>, Error>> + Send + 'a;

  fn list_work_posts<'a>(
    &'a self,
    ctx: &'a TenantContext,
  ) -> impl Future<Output = Result<Vec<WorkPost>, Error>> + Send + 'a;

  fn list_work_posts_for<'a>(
    &'a self,
    ctx: &'a TenantContext,
    condominium_id: Uuid,
  ) -> impl Future<Output = Result<Vec<WorkPost>, Error>> + Send + 'a;

  // ── Employees ─────────────────────────────────────────────────────────

  fn get_employee<'a>(
    &'a self,
    ctx: &'a TenantContext,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Employee>, Error>> + Send + 'a;

  fn list_employees<'a>(
    &'a self,
    ctx: &'a TenantContext,
  ) -> impl Future<Output = Result<Vec<Employee>, Error>> + Send + 'a;

  /// Lookup by the unique-per-tenant civil identifier.
  fn find_employee_by_civil_id<'a>(
    &'a self,
    ctx: &'a TenantContext,
    civil_id: &'a str,
  ) -> impl Future<Output = Result<Option<Employee>, Error>> + Send + 'a;

  // ── Allocations ───────────────────────────────────────────────────────

  fn get_allocation<'a>(
    &'a self,
    ctx: &'a TenantContext,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Allocation>, Error>> + Send + 'a;

  fn list_allocations<'a>(
    &'a self,
    ctx: &'a TenantContext,
  ) -> impl Future<Output = Result<Vec<Allocation>, Error>> + Send + 'a;

  /// The non-replaced allocation held by `employee_id` on `date`, if any.
  fn allocation_for_employee_on<'a>(
    &'a self,
    ctx: &'a TenantContext,
    employee_id: Uuid,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Allocation>, Error>> + Send + 'a;

  /// The non-replaced allocation covering `work_post_id` on `date`, if any.
  fn allocation_for_post_on<'a>(
    &'a self,
    ctx: &'a TenantContext,
    work_post_id: Uuid,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<Allocation>, Error>> + Send + 'a;

  /// All allocations on a calendar date — the daily roster.
  fn list_allocations_on<'a>(
    &'a self,
    ctx: &'a TenantContext,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Allocation>, Error>> + Send + 'a;

  // ── Unit of work ──────────────────────────────────────────────────────

  /// Apply all staged changes as one atomic store transaction.
  ///
  /// Tenant rules enforced here, per staged entity:
  /// - insert: an unset tenant id is stamped with the caller's tenant; a
  ///   set-but-different tenant id is rejected with [`Error::ForeignTenant`];
  /// - update: the persisted tenant id is never changed, regardless of what
  ///   the updated entity carries;
  /// - update/delete matching zero rows (missing or foreign id) fails with
  ///   [`Error::NotFound`] and rolls back the whole set.
  ///
  /// Returns the number of rows affected.
  fn commit<'a>(
    &'a self,
    ctx: &'a TenantContext,
    changes: ChangeSet,
  ) -> impl Future<Output = Result<usize, Error>> + Send + 'a;
}
