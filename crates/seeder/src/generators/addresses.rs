use indicatif::ProgressBar;
use rand::Rng;
use tracing::{info, instrument};

use dbseeder_core::UserId;

use super::require_parents;
use crate::error::SeedError;
use crate::faker;
use crate::store::{NewAddress, SeedStore};

const ENTITY: &str = "addresses";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressStats {
    /// Users that received addresses.
    pub users: usize,
    pub inserted: usize,
}

fn random_address<R: Rng + ?Sized>(rng: &mut R, user_id: UserId, is_default: bool) -> NewAddress {
    NewAddress {
        user_id,
        line1: faker::street_line(rng),
        line2: faker::boolean(rng).then(|| faker::apartment(rng)),
        city: faker::city(rng).to_owned(),
        state: faker::state(rng).to_owned(),
        postal_code: faker::zip(rng),
        country: faker::country_abbr(rng).to_owned(),
        is_default,
    }
}

/// Give up to `user_count` random users `per_user` addresses each.
///
/// Users are not cycled, so each sampled user gets exactly one set and
/// exactly one default address (the first).
///
/// # Errors
///
/// Returns [`SeedError::MissingParents`] if addresses are requested but no
/// users exist, or [`SeedError::Store`] if an insert fails.
#[instrument(skip(store, rng, progress))]
pub async fn generate_addresses<S, R>(
    store: &S,
    rng: &mut R,
    user_count: usize,
    per_user: usize,
    progress: &ProgressBar,
) -> Result<AddressStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let users = store
        .sample_user_ids(user_count)
        .await
        .map_err(SeedError::store(ENTITY))?;
    require_parents(&users, user_count.saturating_mul(per_user), ENTITY, "users")?;
    progress.set_length(u64::try_from(users.len().saturating_mul(per_user)).unwrap_or(u64::MAX));

    let mut stats = AddressStats::default();
    for user_id in users {
        for slot in 0..per_user {
            let address = random_address(rng, user_id, slot == 0);
            store
                .insert_address(&address)
                .await
                .map_err(SeedError::store(ENTITY))?;
            stats.inserted += 1;
            progress.inc(1);
        }
        if per_user > 0 {
            stats.users += 1;
        }
    }

    info!(
        users = stats.users,
        inserted = stats.inserted,
        "Generated addresses"
    );
    Ok(stats)
}
