//! Core types and trait definitions for the Síndico condominium-admin
//! backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod allocation;
pub mod cascade;
pub mod changeset;
pub mod condominium;
pub mod contract;
pub mod employee;
pub mod entity;
pub mod error;
pub mod event;
pub mod roster;
pub mod store;
pub mod tenant;
pub mod work_post;

pub use error::{Error, Result};
