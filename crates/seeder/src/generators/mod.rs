//! One generator per entity, run in foreign-key order by the
//! [`Seeder`](crate::Seeder).
//!
//! Generators that reference other tables sample existing parent ids from the
//! store first. If fewer parents exist than rows requested, the sample is
//! cycled; if none exist, the generator fails with
//! [`SeedError::MissingParents`](crate::SeedError::MissingParents).

mod addresses;
mod categories;
mod orders;
mod products;
mod reviews;
mod users;

pub use addresses::{AddressStats, generate_addresses};
pub use categories::{CategoryStats, generate_categories};
pub use orders::{OrderStats, PRODUCT_POOL_SIZE, generate_orders};
pub use products::{ProductStats, generate_products};
pub use reviews::{ReviewStats, generate_reviews};
pub use users::{MAX_EMAIL_RETRIES, UserStats, generate_users};

use crate::error::SeedError;

/// Repeat `ids` in order until there are `count` of them.
fn cycle_to_count<T: Copy>(ids: &[T], count: usize) -> Vec<T> {
    ids.iter().copied().cycle().take(count).collect()
}

/// Fail when rows are requested but no parent exists to attach them to.
const fn require_parents<T>(
    parents: &[T],
    requested: usize,
    entity: &'static str,
    parent: &'static str,
) -> Result<(), SeedError> {
    if requested > 0 && parents.is_empty() {
        return Err(SeedError::MissingParents { entity, parent });
    }
    Ok(())
}
