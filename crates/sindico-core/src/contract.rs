//! Service contracts: monetary terms, validity window, and the status
//! state machine.
//!
//! A condominium may hold at most one contract in an *active* status
//! (pending or paid) at any time. The orchestrator pre-checks the rule for
//! friendly errors; the store's partial unique index re-checks it inside
//! the commit transaction, so a race between validation and commit still
//! surfaces as a conflict rather than a second active contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  changeset::ChangeSet,
  entity::{EntityMeta, TenantScoped},
  event::DomainEvent,
  store::AdminStore,
  tenant::TenantContext,
  Error, Result,
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Contract lifecycle. `Pending` and `Paid` are the *active* statuses.
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
pub enum ContractStatus {
  Pending,
  Paid,
  Renewal,
  Closed,
}

impl ContractStatus {
  /// Active contracts count against the one-per-condominium invariant.
  pub fn is_active(self) -> bool {
    matches!(self, Self::Pending | Self::Paid)
  }

  /// Legal transitions. Everything else is rejected.
  pub fn can_transition_to(self, next: Self) -> bool {
    matches!(
      (self, next),
      (Self::Pending, Self::Paid)
        | (Self::Pending, Self::Closed)
        | (Self::Paid, Self::Renewal)
        | (Self::Paid, Self::Closed)
        | (Self::Renewal, Self::Closed)
    )
  }
}

// ─── Terms ───────────────────────────────────────────────────────────────────

/// Monetary terms and validity window for one contract.
///
/// Money values are integer centavos; percentages are `f64` in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
  pub monthly_total:      i64,
  pub daily_rate:         i64,
  pub night_premium_pct:  f64,
  pub monthly_benefits:   i64,
  pub tax_pct:            f64,
  pub staff_count:        i32,
  pub profit_margin_pct:  f64,
  pub absence_margin_pct: f64,
  pub starts_on:          NaiveDate,
  pub ends_on:            NaiveDate,
}

fn check_pct(name: &str, value: f64) -> Result<()> {
  if !(0.0..=100.0).contains(&value) {
    return Err(Error::validation(format!(
      "{name} must be between 0 and 100, got {value}"
    )));
  }
  Ok(())
}

impl ContractTerms {
  pub fn validate(&self) -> Result<()> {
    if self.monthly_total <= 0 {
      return Err(Error::validation("monthly total must be positive"));
    }
    if self.daily_rate <= 0 {
      return Err(Error::validation("daily rate must be positive"));
    }
    if self.monthly_benefits < 0 {
      return Err(Error::validation("monthly benefits must not be negative"));
    }
    if self.staff_count <= 0 {
      return Err(Error::validation("staff count must be positive"));
    }
    check_pct("night premium", self.night_premium_pct)?;
    check_pct("tax", self.tax_pct)?;
    check_pct("profit margin", self.profit_margin_pct)?;
    check_pct("absence margin", self.absence_margin_pct)?;
    if self.starts_on > self.ends_on {
      return Err(Error::validation(format!(
        "contract start {} is after end {}",
        self.starts_on, self.ends_on
      )));
    }
    Ok(())
  }
}

// ─── Contract ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
  pub meta:           EntityMeta,
  pub condominium_id: Uuid,
  pub terms:          ContractTerms,
  pub status:         ContractStatus,
}

impl TenantScoped for Contract {
  const KIND: &'static str = "contract";

  fn meta(&self) -> &EntityMeta { &self.meta }
}

impl Contract {
  /// Build a new pending contract for `condominium_id`.
  pub fn new(
    ctx: &TenantContext,
    condominium_id: Uuid,
    terms: ContractTerms,
  ) -> Result<Self> {
    terms.validate()?;
    Ok(Self {
      meta: EntityMeta::new(ctx)?,
      condominium_id,
      terms,
      status: ContractStatus::Pending,
    })
  }

  /// Move to `next`, enforcing the state machine. Returns the raised event.
  pub fn transition(&mut self, next: ContractStatus) -> Result<DomainEvent> {
    if !self.status.can_transition_to(next) {
      return Err(Error::InvalidTransition { from: self.status, to: next });
    }
    let from = self.status;
    self.status = next;
    Ok(DomainEvent::ContractStatusChanged {
      contract_id: self.meta.id,
      from,
      to: next,
    })
  }

  /// The monthly billable amount derived from the terms: contracted total
  /// plus benefits, marked up by profit and absence-coverage margins, then
  /// taxed. Rounded to whole centavos.
  pub fn monthly_invoice_total(&self) -> i64 {
    let t = &self.terms;
    let base = (t.monthly_total + t.monthly_benefits) as f64;
    let margined = base
      * (1.0 + t.profit_margin_pct / 100.0)
      * (1.0 + t.absence_margin_pct / 100.0);
    let taxed = margined * (1.0 + t.tax_pct / 100.0);
    taxed.round() as i64
  }
}

/// Input for opening a contract against an existing condominium.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContract {
  pub condominium_id: Uuid,
  pub terms:          ContractTerms,
}

// ─── Store operations ────────────────────────────────────────────────────────

/// Open a pending contract for an existing condominium.
///
/// Pre-checks the single-active-contract invariant for a precise error; the
/// store's unique index is the authoritative guard at commit time.
pub async fn open_contract<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  input: NewContract,
) -> Result<(Contract, Vec<DomainEvent>)> {
  let condominium = store
    .get_condominium(ctx, input.condominium_id)
    .await?
    .ok_or_else(|| Error::not_found("condominium", input.condominium_id))?;

  if let Some(active) = store.active_contract_for(ctx, condominium.id()).await?
  {
    return Err(Error::conflict(format!(
      "condominium {} already has an active contract ({})",
      condominium.id(),
      active.id(),
    )));
  }

  let contract = Contract::new(ctx, condominium.id(), input.terms)?;

  let mut changes = ChangeSet::new();
  changes.add_contract(contract.clone());
  store.commit(ctx, changes).await?;

  let events = vec![DomainEvent::ContractOpened {
    contract_id:    contract.id(),
    condominium_id: contract.condominium_id,
  }];
  Ok((contract, events))
}

/// Change a contract's status, re-checking the one-active invariant whenever
/// the target status is active.
pub async fn change_contract_status<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  contract_id: Uuid,
  next: ContractStatus,
) -> Result<(Contract, Vec<DomainEvent>)> {
  let mut contract = store
    .get_contract(ctx, contract_id)
    .await?
    .ok_or_else(|| Error::not_found("contract", contract_id))?;

  if next.is_active()
    && let Some(active) =
      store.active_contract_for(ctx, contract.condominium_id).await?
    && active.id() != contract.id()
  {
    return Err(Error::conflict(format!(
      "condominium {} already has an active contract ({})",
      contract.condominium_id,
      active.id(),
    )));
  }

  let event = contract.transition(next)?;

  let mut changes = ChangeSet::new();
  changes.update_contract(contract.clone());
  store.commit(ctx, changes).await?;

  Ok((contract, vec![event]))
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::tenant::{TenantContext, TenantId};

  fn terms() -> ContractTerms {
    ContractTerms {
      monthly_total:      1_500_000,
      daily_rate:         25_000,
      night_premium_pct:  20.0,
      monthly_benefits:   80_000,
      tax_pct:            11.0,
      staff_count:        4,
      profit_margin_pct:  10.0,
      absence_margin_pct: 5.0,
      starts_on:          NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
      ends_on:            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    }
  }

  #[test]
  fn new_contract_starts_pending() {
    let ctx = TenantContext::resolved(TenantId::new());
    let c = Contract::new(&ctx, Uuid::new_v4(), terms()).unwrap();
    assert_eq!(c.status, ContractStatus::Pending);
    assert!(c.status.is_active());
  }

  #[test]
  fn terms_reject_inverted_date_range() {
    let mut t = terms();
    t.ends_on = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert!(matches!(t.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn terms_reject_out_of_range_percentage() {
    let mut t = terms();
    t.tax_pct = 140.0;
    assert!(matches!(t.validate(), Err(Error::Validation(_))));

    let mut t = terms();
    t.profit_margin_pct = -1.0;
    assert!(matches!(t.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn terms_reject_nonpositive_totals() {
    let mut t = terms();
    t.monthly_total = 0;
    assert!(t.validate().is_err());

    let mut t = terms();
    t.staff_count = -2;
    assert!(t.validate().is_err());
  }

  #[test]
  fn pending_to_paid_is_legal() {
    let ctx = TenantContext::resolved(TenantId::new());
    let mut c = Contract::new(&ctx, Uuid::new_v4(), terms()).unwrap();
    let event = c.transition(ContractStatus::Paid).unwrap();
    assert_eq!(c.status, ContractStatus::Paid);
    assert!(matches!(
      event,
      DomainEvent::ContractStatusChanged {
        from: ContractStatus::Pending,
        to: ContractStatus::Paid,
        ..
      }
    ));
  }

  #[test]
  fn closed_is_terminal() {
    let ctx = TenantContext::resolved(TenantId::new());
    let mut c = Contract::new(&ctx, Uuid::new_v4(), terms()).unwrap();
    c.transition(ContractStatus::Closed).unwrap();
    for next in [
      ContractStatus::Pending,
      ContractStatus::Paid,
      ContractStatus::Renewal,
      ContractStatus::Closed,
    ] {
      assert!(matches!(
        c.clone().transition(next),
        Err(Error::InvalidTransition { .. })
      ));
    }
  }

  #[test]
  fn paid_cannot_regress_to_pending() {
    let ctx = TenantContext::resolved(TenantId::new());
    let mut c = Contract::new(&ctx, Uuid::new_v4(), terms()).unwrap();
    c.transition(ContractStatus::Paid).unwrap();
    assert!(matches!(
      c.transition(ContractStatus::Pending),
      Err(Error::InvalidTransition { .. })
    ));
  }

  #[test]
  fn renewal_is_not_active() {
    assert!(!ContractStatus::Renewal.is_active());
    assert!(!ContractStatus::Closed.is_active());
  }

  #[test]
  fn invoice_total_applies_margins_and_tax() {
    let ctx = TenantContext::resolved(TenantId::new());
    let c = Contract::new(&ctx, Uuid::new_v4(), terms()).unwrap();
    // (1_500_000 + 80_000) * 1.10 * 1.05 * 1.11
    assert_eq!(c.monthly_invoice_total(), 2_025_639);
  }
}
