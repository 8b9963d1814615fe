//! SQLite implementation of [`sindico_core::store::AdminStore`].
//!
//! One database file per deployment; all tenants share the tables and every
//! row carries a `tenant_id` column. Reads are scoped to the caller's
//! tenant in SQL; writes go through a single transactional commit.

mod encode;
mod error;
mod schema;
mod store;

#[cfg(test)]
mod tests;

pub use store::SqliteStore;
