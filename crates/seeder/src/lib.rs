//! dbseeder - synthetic data for the e-commerce schema.
//!
//! Populates users, addresses, categories, products, product images, orders,
//! order items and reviews in `PostgreSQL`, wiring every foreign key to rows
//! generated earlier in the same run.
//!
//! # Modules
//!
//! - [`config`] - Connection settings, seed plan and YAML profiles
//! - [`store`] - The [`SeedStore`] boundary, schema DDL and [`PgStore`]
//! - [`faker`] - Random field values
//! - [`generators`] - One generator per entity
//! - [`Seeder`] - Runs the generators in foreign-key order

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod faker;
pub mod generators;
pub mod progress;
mod seeder;
pub mod store;

pub use config::{DatabaseConfig, SeedPlan, SeedProfile};
pub use error::{ConfigError, SeedError, StoreError};
pub use seeder::{SeedReport, Seeder};
pub use store::{PgStore, SeedStore};
