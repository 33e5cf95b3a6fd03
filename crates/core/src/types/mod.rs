//! Core types for the seeded schema.
//!
//! This module provides type-safe wrappers for the values the generators
//! produce and insert.

pub mod id;
pub mod price;
pub mod rating;
pub mod status;

pub use id::*;
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
pub use status::*;
