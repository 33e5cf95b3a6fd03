//! dbseeder core - domain types for the seeded e-commerce schema.
//!
//! These types are shared by the seeding library and the CLI:
//! - `dbseeder` - generators, schema and storage boundary
//! - `dbseeder-cli` - the `dbseeder` binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. Database
//! encoding is available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, ratings and order enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
