//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use sindico_core::{
  allocation::{AllocationStatus, NewAllocation},
  cascade::{self, CondominiumBundleInput},
  changeset::ChangeSet,
  condominium::{Condominium, NewCondominium},
  contract::{self, ContractStatus, ContractTerms, NewContract},
  employee::{Employee, NewEmployee},
  entity::TenantScoped as _,
  roster,
  store::AdminStore,
  tenant::{TenantContext, TenantId},
  work_post::{Shift, WorkPostSpec},
  Error,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ctx() -> TenantContext { TenantContext::resolved(TenantId::new()) }

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn terms() -> ContractTerms {
  ContractTerms {
    monthly_total:      2_000_000,
    daily_rate:         30_000,
    night_premium_pct:  20.0,
    monthly_benefits:   50_000,
    tax_pct:            11.0,
    staff_count:        6,
    profit_margin_pct:  12.0,
    absence_margin_pct: 4.0,
    starts_on:          date(2025, 1, 1),
    ends_on:            date(2025, 12, 31),
  }
}

fn day_post(name: &str) -> WorkPostSpec {
  WorkPostSpec {
    name:        name.into(),
    shift:       Shift::Day,
    schedule:    "12x36".into(),
    staff_count: 2,
  }
}

fn bundle_input(registration: &str) -> CondominiumBundleInput {
  CondominiumBundleInput {
    condominium: NewCondominium {
      registration_number: registration.into(),
      name:                "Edifício Sol".into(),
      address:             Default::default(),
    },
    contract:    terms(),
    work_posts:  vec![day_post("Portaria diurna"), WorkPostSpec {
      name:        "Portaria noturna".into(),
      shift:       Shift::Night,
      schedule:    "12x36".into(),
      staff_count: 2,
    }],
  }
}

async fn seed_condominium(
  s: &SqliteStore,
  ctx: &TenantContext,
  registration: &str,
) -> Condominium {
  let condo = Condominium::new(ctx, NewCondominium {
    registration_number: registration.into(),
    name:                "Edifício Teste".into(),
    address:             Default::default(),
  })
  .unwrap();
  let mut changes = ChangeSet::new();
  changes.add_condominium(condo.clone());
  s.commit(ctx, changes).await.unwrap();
  condo
}

async fn seed_employee(
  s: &SqliteStore,
  ctx: &TenantContext,
  civil_id: &str,
) -> Employee {
  let employee = Employee::new(ctx, NewEmployee {
    name:     "Maria Souza".into(),
    civil_id: civil_id.into(),
    hired_on: date(2024, 6, 1),
  })
  .unwrap();
  let mut changes = ChangeSet::new();
  changes.add_employee(employee.clone());
  s.commit(ctx, changes).await.unwrap();
  employee
}

// ─── Tenant isolation ────────────────────────────────────────────────────────

#[tokio::test]
async fn entity_created_under_one_tenant_is_invisible_to_another() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();

  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;

  // B cannot see A's row by id, by list, or by business key.
  assert!(s.get_condominium(&ctx_b, condo.id()).await.unwrap().is_none());
  assert!(s.list_condominiums(&ctx_b).await.unwrap().is_empty());
  assert!(s
    .find_condominium_by_registration(&ctx_b, "11.111.111/0001-11")
    .await
    .unwrap()
    .is_none());

  // A still sees it.
  assert!(s.get_condominium(&ctx_a, condo.id()).await.unwrap().is_some());
  assert_eq!(s.list_condominiums(&ctx_a).await.unwrap().len(), 1);
}

#[tokio::test]
async fn tenant_wide_lists_cover_every_aggregate() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();

  let (bundle, _) = cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();
  let employee = seed_employee(&s, &ctx_a, "123.456.789-00").await;
  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: bundle.work_posts[0].id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  // A enumerates everything it owns.
  assert_eq!(s.list_contracts(&ctx_a).await.unwrap().len(), 1);
  assert_eq!(s.list_work_posts(&ctx_a).await.unwrap().len(), 2);
  assert_eq!(s.list_allocations(&ctx_a).await.unwrap().len(), 1);

  // B sees none of it.
  assert!(s.list_contracts(&ctx_b).await.unwrap().is_empty());
  assert!(s.list_work_posts(&ctx_b).await.unwrap().is_empty());
  assert!(s.list_allocations(&ctx_b).await.unwrap().is_empty());

  // Anonymous sees nothing either.
  let anon = TenantContext::anonymous();
  assert!(s.list_contracts(&anon).await.unwrap().is_empty());
  assert!(s.list_work_posts(&anon).await.unwrap().is_empty());
  assert!(s.list_allocations(&anon).await.unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_context_reads_nothing() {
  let s = store().await;
  let ctx_a = ctx();
  seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;

  let anon = TenantContext::anonymous();
  assert!(s.list_condominiums(&anon).await.unwrap().is_empty());
  assert!(s.list_employees(&anon).await.unwrap().is_empty());
  assert!(s
    .find_condominium_by_registration(&anon, "11.111.111/0001-11")
    .await
    .unwrap()
    .is_none());
}

#[tokio::test]
async fn anonymous_context_cannot_commit() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = Condominium::new(&ctx_a, NewCondominium {
    registration_number: "22.222.222/0001-22".into(),
    name:                "Edifício Lua".into(),
    address:             Default::default(),
  })
  .unwrap();

  let mut changes = ChangeSet::new();
  changes.add_condominium(condo);
  let err = s
    .commit(&TenantContext::anonymous(), changes)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TenantUnresolved));
}

#[tokio::test]
async fn insert_with_foreign_tenant_id_is_rejected() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();

  // Built under A, committed under B.
  let condo = Condominium::new(&ctx_a, NewCondominium {
    registration_number: "33.333.333/0001-33".into(),
    name:                "Edifício Vento".into(),
    address:             Default::default(),
  })
  .unwrap();

  let mut changes = ChangeSet::new();
  changes.add_condominium(condo);
  let err = s.commit(&ctx_b, changes).await.unwrap_err();
  assert!(matches!(err, Error::ForeignTenant));
}

#[tokio::test]
async fn update_never_moves_a_row_between_tenants() {
  let s = store().await;
  let ctx_a = ctx();
  let mut condo = seed_condominium(&s, &ctx_a, "44.444.444/0001-44").await;

  // Tamper with the in-memory tenant id; the persisted owner must not move.
  condo.meta.tenant_id = TenantId::new();
  condo.name = "Renamed".into();

  let mut changes = ChangeSet::new();
  changes.update_condominium(condo.clone());
  s.commit(&ctx_a, changes).await.unwrap();

  let fetched = s
    .get_condominium(&ctx_a, condo.id())
    .await
    .unwrap()
    .expect("still owned by tenant A");
  assert_eq!(fetched.meta.tenant_id, ctx_a.tenant().unwrap());
  assert_eq!(fetched.name, "Renamed");
}

#[tokio::test]
async fn update_under_foreign_tenant_rolls_back() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();
  let mut condo = seed_condominium(&s, &ctx_a, "55.555.555/0001-55").await;
  condo.name = "Hijacked".into();

  let mut changes = ChangeSet::new();
  changes.update_condominium(condo.clone());
  let err = s.commit(&ctx_b, changes).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));

  let fetched = s
    .get_condominium(&ctx_a, condo.id())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.name, "Edifício Teste");
}

// ─── Cascade ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_condominium_cascade_persists_all_three_levels() {
  let s = store().await;
  let ctx_a = ctx();

  let (bundle, events) = cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();

  assert_eq!(bundle.work_posts.len(), 2);
  assert_eq!(events.len(), 4); // condominium + contract + 2 posts

  // Everything persisted, all owned by the caller's tenant.
  let tenant = ctx_a.tenant().unwrap();
  let condo = s
    .get_condominium(&ctx_a, bundle.condominium.id())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(condo.meta.tenant_id, tenant);

  let contract = s
    .get_contract(&ctx_a, bundle.contract.id())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(contract.meta.tenant_id, tenant);
  assert_eq!(contract.status, ContractStatus::Pending);

  let posts = s.list_work_posts_for(&ctx_a, condo.id()).await.unwrap();
  assert_eq!(posts.len(), 2);
  assert!(posts.iter().all(|p| p.meta.tenant_id == tenant));
}

#[tokio::test]
async fn cascade_with_invalid_work_post_leaves_zero_rows() {
  let s = store().await;
  let ctx_a = ctx();

  let mut input = bundle_input("12.345.678/0001-90");
  input.work_posts.push(WorkPostSpec {
    name:        "Zelador".into(),
    shift:       Shift::Day,
    schedule:    "8h-17h".into(),
    staff_count: -3,
  });

  let err = cascade::create_full_condominium(&s, &ctx_a, input)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  // No condominium, no contract, no posts.
  assert!(s.list_condominiums(&ctx_a).await.unwrap().is_empty());
  assert!(s
    .find_condominium_by_registration(&ctx_a, "12.345.678/0001-90")
    .await
    .unwrap()
    .is_none());
}

#[tokio::test]
async fn cascade_rejects_duplicate_registration_number() {
  let s = store().await;
  let ctx_a = ctx();

  cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();

  let err = cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
  assert_eq!(s.list_condominiums(&ctx_a).await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_registration_number_is_fine_across_tenants() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();

  cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();
  cascade::create_full_condominium(
    &s,
    &ctx_b,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();

  assert_eq!(s.list_condominiums(&ctx_a).await.unwrap().len(), 1);
  assert_eq!(s.list_condominiums(&ctx_b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn validate_bundle_is_a_pure_preflight() {
  let s = store().await;
  let ctx_a = ctx();

  cascade::validate_bundle(&s, &ctx_a, &bundle_input("99.999.999/0001-99"))
    .await
    .unwrap();

  // Valid input writes nothing.
  assert!(s.list_condominiums(&ctx_a).await.unwrap().is_empty());

  let mut bad = bundle_input("99.999.999/0001-99");
  bad.contract.ends_on = date(2024, 1, 1);
  let err = cascade::validate_bundle(&s, &ctx_a, &bad).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
}

// ─── Contracts ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn second_active_contract_for_condominium_is_rejected() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;

  let (first, _) = contract::open_contract(&s, &ctx_a, NewContract {
    condominium_id: condo.id(),
    terms:          terms(),
  })
  .await
  .unwrap();

  let err = contract::open_contract(&s, &ctx_a, NewContract {
    condominium_id: condo.id(),
    terms:          terms(),
  })
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // The original is untouched.
  let still = s
    .active_contract_for(&ctx_a, condo.id())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(still.id(), first.id());
}

#[tokio::test]
async fn commit_time_guard_catches_racing_active_contract() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;

  contract::open_contract(&s, &ctx_a, NewContract {
    condominium_id: condo.id(),
    terms:          terms(),
  })
  .await
  .unwrap();

  // Bypass the orchestrator pre-check and stage a second pending contract
  // directly: the partial unique index must refuse it at commit.
  let second =
    sindico_core::contract::Contract::new(&ctx_a, condo.id(), terms())
      .unwrap();
  let mut changes = ChangeSet::new();
  changes.add_contract(second);
  let err = s.commit(&ctx_a, changes).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn contract_status_walks_the_state_machine() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let (opened, _) = contract::open_contract(&s, &ctx_a, NewContract {
    condominium_id: condo.id(),
    terms:          terms(),
  })
  .await
  .unwrap();

  let (paid, events) =
    contract::change_contract_status(&s, &ctx_a, opened.id(), ContractStatus::Paid)
      .await
      .unwrap();
  assert_eq!(paid.status, ContractStatus::Paid);
  assert_eq!(events.len(), 1);

  // Paid -> Pending is illegal.
  let err =
    contract::change_contract_status(&s, &ctx_a, opened.id(), ContractStatus::Pending)
      .await
      .unwrap_err();
  assert!(matches!(err, Error::InvalidTransition { .. }));

  // Closing frees the condominium for a new contract.
  contract::change_contract_status(&s, &ctx_a, opened.id(), ContractStatus::Closed)
    .await
    .unwrap();
  assert!(s
    .active_contract_for(&ctx_a, condo.id())
    .await
    .unwrap()
    .is_none());
  contract::open_contract(&s, &ctx_a, NewContract {
    condominium_id: condo.id(),
    terms:          terms(),
  })
  .await
  .unwrap();
}

#[tokio::test]
async fn deleting_condominium_with_contracts_is_a_conflict() {
  let s = store().await;
  let ctx_a = ctx();
  let (bundle, _) = cascade::create_full_condominium(
    &s,
    &ctx_a,
    bundle_input("12.345.678/0001-90"),
  )
  .await
  .unwrap();

  let mut changes = ChangeSet::new();
  changes.remove_condominium(bundle.condominium.id());
  let err = s.commit(&ctx_a, changes).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // Still there.
  assert!(s
    .get_condominium(&ctx_a, bundle.condominium.id())
    .await
    .unwrap()
    .is_some());
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_civil_id_within_tenant_is_a_conflict() {
  let s = store().await;
  let ctx_a = ctx();
  seed_employee(&s, &ctx_a, "123.456.789-00").await;

  let dup = Employee::new(&ctx_a, NewEmployee {
    name:     "Outro Nome".into(),
    civil_id: "123.456.789-00".into(),
    hired_on: date(2024, 7, 1),
  })
  .unwrap();
  let mut changes = ChangeSet::new();
  changes.add_employee(dup);
  let err = s.commit(&ctx_a, changes).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // The same civil id under another tenant is fine.
  let ctx_b = ctx();
  seed_employee(&s, &ctx_b, "123.456.789-00").await;
  assert_eq!(s.list_employees(&ctx_b).await.unwrap().len(), 1);
}

#[tokio::test]
async fn find_employee_by_civil_id_is_tenant_scoped() {
  let s = store().await;
  let ctx_a = ctx();
  let employee = seed_employee(&s, &ctx_a, "123.456.789-00").await;

  let found = s
    .find_employee_by_civil_id(&ctx_a, "123.456.789-00")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.id(), employee.id());

  let ctx_b = ctx();
  assert!(s
    .find_employee_by_civil_id(&ctx_b, "123.456.789-00")
    .await
    .unwrap()
    .is_none());
}

// ─── Allocations ─────────────────────────────────────────────────────────────

async fn seed_post(
  s: &SqliteStore,
  ctx: &TenantContext,
  condo: &Condominium,
  name: &str,
) -> sindico_core::work_post::WorkPost {
  let post =
    sindico_core::work_post::WorkPost::new(ctx, condo.id(), day_post(name))
      .unwrap();
  let mut changes = ChangeSet::new();
  changes.add_work_post(post.clone());
  s.commit(ctx, changes).await.unwrap();
  post
}

#[tokio::test]
async fn employee_cannot_hold_two_allocations_on_one_date() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post_a = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let post_b = seed_post(&s, &ctx_a, &condo, "Portaria B").await;
  let employee = seed_employee(&s, &ctx_a, "123.456.789-00").await;

  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post_a.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  let err = roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post_b.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));

  // A different date is fine.
  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post_b.id(),
    date:         date(2025, 3, 11),
  })
  .await
  .unwrap();
}

#[tokio::test]
async fn work_post_is_covered_by_at_most_one_allocation_per_date() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let first = seed_employee(&s, &ctx_a, "111.111.111-11").await;
  let second = seed_employee(&s, &ctx_a, "222.222.222-22").await;

  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  first.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  let err = roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  second.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn replacement_flow_supersedes_the_old_allocation() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let sick = seed_employee(&s, &ctx_a, "111.111.111-11").await;
  let cover = seed_employee(&s, &ctx_a, "222.222.222-22").await;

  let (original, _) = roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  sick.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  let (replacement, events) = roster::replace_allocation(
    &s,
    &ctx_a,
    original.id(),
    NewAllocation {
      employee_id:  cover.id(),
      work_post_id: post.id(),
      date:         date(2025, 3, 10),
    },
  )
  .await
  .unwrap();
  assert_eq!(events.len(), 1);

  // The old row is audit history; the live allocation is the replacement.
  let old = s
    .get_allocation(&ctx_a, original.id())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(old.status, AllocationStatus::Replaced);

  let live = s
    .allocation_for_post_on(&ctx_a, post.id(), date(2025, 3, 10))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(live.id(), replacement.id());
  assert_eq!(live.employee_id, cover.id());
}

#[tokio::test]
async fn absence_is_recorded_on_scheduled_allocations_only() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let employee = seed_employee(&s, &ctx_a, "111.111.111-11").await;

  let (allocation, _) = roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  let (updated, _) =
    roster::record_absence(&s, &ctx_a, allocation.id()).await.unwrap();
  assert_eq!(updated.status, AllocationStatus::AbsenceRecorded);

  // Recording twice is a conflict.
  let err =
    roster::record_absence(&s, &ctx_a, allocation.id()).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn deleting_employee_with_allocations_is_a_conflict() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let employee = seed_employee(&s, &ctx_a, "111.111.111-11").await;

  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  let mut changes = ChangeSet::new();
  changes.remove_employee(employee.id());
  let err = s.commit(&ctx_a, changes).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn daily_roster_lists_only_the_callers_tenant() {
  let s = store().await;
  let ctx_a = ctx();
  let ctx_b = ctx();

  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;
  let post = seed_post(&s, &ctx_a, &condo, "Portaria A").await;
  let employee = seed_employee(&s, &ctx_a, "111.111.111-11").await;
  roster::schedule_allocation(&s, &ctx_a, NewAllocation {
    employee_id:  employee.id(),
    work_post_id: post.id(),
    date:         date(2025, 3, 10),
  })
  .await
  .unwrap();

  assert_eq!(
    s.list_allocations_on(&ctx_a, date(2025, 3, 10)).await.unwrap().len(),
    1
  );
  assert!(s
    .list_allocations_on(&ctx_b, date(2025, 3, 10))
    .await
    .unwrap()
    .is_empty());
}

// ─── Unit of work ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_changeset_commits_zero_rows() {
  let s = store().await;
  let rows = s.commit(&ctx(), ChangeSet::new()).await.unwrap();
  assert_eq!(rows, 0);
}

#[tokio::test]
async fn failed_operation_rolls_back_the_whole_changeset() {
  let s = store().await;
  let ctx_a = ctx();

  // One valid insert batched with an update of a nonexistent row: neither
  // may survive.
  let condo = Condominium::new(&ctx_a, NewCondominium {
    registration_number: "66.666.666/0001-66".into(),
    name:                "Edifício Mar".into(),
    address:             Default::default(),
  })
  .unwrap();
  let mut ghost = condo.clone();
  ghost.meta.id = Uuid::new_v4();

  let mut changes = ChangeSet::new();
  changes.add_condominium(condo.clone());
  changes.update_condominium(ghost);

  let err = s.commit(&ctx_a, changes).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
  assert!(s.get_condominium(&ctx_a, condo.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn commit_reports_rows_affected() {
  let s = store().await;
  let ctx_a = ctx();
  let condo = seed_condominium(&s, &ctx_a, "11.111.111/0001-11").await;

  let mut renamed = condo.clone();
  renamed.name = "Edifício Renomeado".into();
  let mut changes = ChangeSet::new();
  changes.update_condominium(renamed);
  let rows = s.commit(&ctx_a, changes).await.unwrap();
  assert_eq!(rows, 1);
}
