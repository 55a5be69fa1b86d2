//! Repository implementations for database access
//!
//! Read-only: each call issues one query on one pooled connection, with no
//! transaction.

pub mod dropoffs;

pub use dropoffs::{DropoffRepo, ProximityQuery};
