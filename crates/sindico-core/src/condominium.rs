//! Condominium — the root aggregate of the creation cascade.

use serde::{Deserialize, Serialize};

use crate::{
  entity::{EntityMeta, TenantScoped},
  tenant::TenantContext,
  Error, Result,
};

/// Street-level profile of a condominium.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub state:       Option<String>,
  pub postal_code: Option<String>,
}

/// A managed condominium. Owns its contracts and work posts by reference;
/// neither is deleted implicitly when the condominium goes away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condominium {
  pub meta:                EntityMeta,
  /// Tax/registration number (e.g. a CNPJ). Unique per tenant.
  pub registration_number: String,
  pub name:                String,
  pub address:             Address,
}

impl TenantScoped for Condominium {
  const KIND: &'static str = "condominium";

  fn meta(&self) -> &EntityMeta { &self.meta }
}

/// Input for creating a condominium.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCondominium {
  pub registration_number: String,
  pub name:                String,
  #[serde(default)]
  pub address:             Address,
}

impl NewCondominium {
  /// Structural validation: required fields must be present and non-blank.
  pub fn validate(&self) -> Result<()> {
    if self.registration_number.trim().is_empty() {
      return Err(Error::validation("registration number must not be empty"));
    }
    if self.name.trim().is_empty() {
      return Err(Error::validation("condominium name must not be empty"));
    }
    Ok(())
  }
}

impl Condominium {
  /// Build a new condominium owned by the context's tenant.
  pub fn new(ctx: &TenantContext, input: NewCondominium) -> Result<Self> {
    input.validate()?;
    Ok(Self {
      meta:                EntityMeta::new(ctx)?,
      registration_number: input.registration_number,
      name:                input.name,
      address:             input.address,
    })
  }
}
