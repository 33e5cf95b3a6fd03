use indicatif::ProgressBar;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::error::SeedError;
use crate::faker;
use crate::store::schema::USERS_EMAIL_KEY;
use crate::store::{NewUser, SeedStore};

const ENTITY: &str = "users";

/// Consecutive duplicate-email collisions tolerated for a single user.
pub const MAX_EMAIL_RETRIES: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub inserted: usize,
    /// Rows re-drawn after an email collision.
    pub retries: usize,
}

fn random_user<R: Rng + ?Sized>(rng: &mut R) -> NewUser {
    NewUser {
        email: faker::email(rng),
        password_hash: faker::password(rng),
        first_name: faker::first_name(rng),
        last_name: faker::last_name(rng),
        phone: faker::phone(rng),
    }
}

/// Insert `count` users with unique emails.
///
/// A duplicate email re-draws the whole user.
///
/// # Errors
///
/// Returns [`SeedError::RetriesExhausted`] after [`MAX_EMAIL_RETRIES`]
/// collisions for one user, or [`SeedError::Store`] for any other failure.
#[instrument(skip(store, rng, progress))]
pub async fn generate_users<S, R>(
    store: &S,
    rng: &mut R,
    count: usize,
    progress: &ProgressBar,
) -> Result<UserStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let mut stats = UserStats::default();
    for _ in 0..count {
        let mut collisions = 0;
        loop {
            let user = random_user(rng);
            match store.insert_user(&user).await {
                Ok(_) => break,
                Err(e) if e.is_unique_violation_of(USERS_EMAIL_KEY) => {
                    collisions += 1;
                    stats.retries += 1;
                    debug!(collisions, "Duplicate email, retrying");
                    if collisions >= MAX_EMAIL_RETRIES {
                        return Err(SeedError::RetriesExhausted {
                            entity: ENTITY,
                            attempts: collisions,
                        });
                    }
                }
                Err(e) => return Err(SeedError::store(ENTITY)(e)),
            }
        }
        stats.inserted += 1;
        progress.inc(1);
    }

    info!(
        inserted = stats.inserted,
        retries = stats.retries,
        "Generated users"
    );
    Ok(stats)
}
