//! The cascading creation orchestrator.
//!
//! Creates a condominium, its initial contract, and its initial work posts
//! as one indivisible unit: every business rule is validated before anything
//! is staged, and all rows go through a single [`AdminStore::commit`]. A
//! validation failure leaves nothing written; a commit failure rolls the
//! whole bundle back. Partial bundles are never observable.

use crate::{
  changeset::ChangeSet,
  condominium::{Condominium, NewCondominium},
  contract::{Contract, ContractTerms},
  entity::TenantScoped as _,
  event::DomainEvent,
  store::AdminStore,
  tenant::TenantContext,
  work_post::{WorkPost, WorkPostSpec},
  Error, Result,
};

// ─── Input / output ──────────────────────────────────────────────────────────

/// Input to [`create_full_condominium`]: one condominium, one contract's
/// terms, and zero or more initial work posts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CondominiumBundleInput {
  pub condominium: NewCondominium,
  pub contract:    ContractTerms,
  #[serde(default)]
  pub work_posts:  Vec<WorkPostSpec>,
}

/// Everything created by one successful cascade.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CondominiumBundle {
  pub condominium: Condominium,
  pub contract:    Contract,
  pub work_posts:  Vec<WorkPost>,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Steps 1–2 of the cascade: structural validation of every part of the
/// input, then cross-entity business rules against the store. Performs no
/// staging and no writes, so callers can use it as a pre-flight check.
pub async fn validate_bundle<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  input: &CondominiumBundleInput,
) -> Result<()> {
  input.condominium.validate()?;
  input.contract.validate()?;
  for spec in &input.work_posts {
    spec.validate()?;
  }

  // This path always creates a fresh condominium; a registration number
  // already taken under this tenant is a conflict, not an attach.
  if store
    .find_condominium_by_registration(
      ctx,
      &input.condominium.registration_number,
    )
    .await?
    .is_some()
  {
    return Err(Error::conflict(format!(
      "registration number {:?} is already in use",
      input.condominium.registration_number
    )));
  }

  Ok(())
}

// ─── Creation ────────────────────────────────────────────────────────────────

/// Validate, construct, and commit the full bundle.
///
/// The condominium is fresh, so its pending contract cannot collide with an
/// existing active one; the store's partial unique index still guards the
/// invariant inside the transaction against anything racing this call.
pub async fn create_full_condominium<S: AdminStore>(
  store: &S,
  ctx: &TenantContext,
  input: CondominiumBundleInput,
) -> Result<(CondominiumBundle, Vec<DomainEvent>)> {
  validate_bundle(store, ctx, &input).await?;

  let condominium = Condominium::new(ctx, input.condominium)?;
  let contract = Contract::new(ctx, condominium.id(), input.contract)?;
  let work_posts = input
    .work_posts
    .into_iter()
    .map(|spec| WorkPost::new(ctx, condominium.id(), spec))
    .collect::<Result<Vec<_>>>()?;

  let mut changes = ChangeSet::new();
  changes.add_condominium(condominium.clone());
  changes.add_contract(contract.clone());
  for post in &work_posts {
    changes.add_work_post(post.clone());
  }
  store.commit(ctx, changes).await?;

  let mut events = vec![
    DomainEvent::CondominiumRegistered { condominium_id: condominium.id() },
    DomainEvent::ContractOpened {
      contract_id:    contract.id(),
      condominium_id: condominium.id(),
    },
  ];
  events.extend(work_posts.iter().map(|post| DomainEvent::WorkPostOpened {
    work_post_id:   post.id(),
    condominium_id: condominium.id(),
  }));

  Ok((CondominiumBundle { condominium, contract, work_posts }, events))
}
