//! Mapping from SQLite-level failures to the core error taxonomy.
//!
//! The store surfaces `sindico_core::Error` directly: infrastructure
//! failures become `Persistence`, unique-constraint violations become
//! `Conflict` with a message derived from the violated index.

use sindico_core::Error;

/// An async-wrapper or connection failure.
pub(crate) fn db_err(e: tokio_rusqlite::Error) -> Error {
  Error::Persistence(e.to_string())
}

/// A row that cannot be decoded back into a domain value.
pub(crate) fn decode_err(
  what: &'static str,
  e: impl std::fmt::Display,
) -> Error {
  Error::Persistence(format!("corrupt {what} row: {e}"))
}

/// Translate an execution error: unique/foreign-key constraint violations
/// are domain conflicts (the commit-time leg of invariant enforcement);
/// anything else is a persistence failure.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> Error {
  match &e {
    rusqlite::Error::SqliteFailure(ffi, message)
      if ffi.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      let raw = message.as_deref().unwrap_or("constraint violation");
      Error::Conflict(friendly_constraint(raw).to_owned())
    }
    _ => Error::Persistence(e.to_string()),
  }
}

/// Map a violated index name to the business rule it guards.
fn friendly_constraint(raw: &str) -> &str {
  if raw.contains("condominiums_registration_idx") {
    "registration number already in use for this tenant"
  } else if raw.contains("contracts_one_active_idx") {
    "condominium already has an active contract"
  } else if raw.contains("employees_civil_id_idx") {
    "employee civil id already in use for this tenant"
  } else if raw.contains("allocations_employee_date_idx") {
    "employee already has an allocation on this date"
  } else if raw.contains("allocations_post_date_idx") {
    "work post is already covered on this date"
  } else {
    raw
  }
}
