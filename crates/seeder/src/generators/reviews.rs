use indicatif::ProgressBar;
use rand::Rng;
use tracing::{debug, info, instrument};

use super::{cycle_to_count, require_parents};
use crate::error::SeedError;
use crate::faker;
use crate::store::schema::REVIEWS_PRODUCT_USER_KEY;
use crate::store::{NewReview, SeedStore};

const ENTITY: &str = "reviews";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
    pub inserted: usize,
    /// Pairs dropped because that user already reviewed that product.
    pub skipped: usize,
}

/// Insert up to `count` reviews, pairing random users with random products.
///
/// A user reviews a product at most once; repeated pairs are skipped, so
/// fewer than `count` reviews may be stored.
///
/// # Errors
///
/// Returns [`SeedError::MissingParents`] if there are no users or no
/// products, or [`SeedError::Store`] for any failure other than a repeated
/// pair.
#[instrument(skip(store, rng, progress))]
pub async fn generate_reviews<S, R>(
    store: &S,
    rng: &mut R,
    count: usize,
    progress: &ProgressBar,
) -> Result<ReviewStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let users = store
        .sample_user_ids(count)
        .await
        .map_err(SeedError::store(ENTITY))?;
    require_parents(&users, count, ENTITY, "users")?;
    let products = store
        .sample_product_ids(count)
        .await
        .map_err(SeedError::store(ENTITY))?;
    require_parents(&products, count, ENTITY, "products")?;
    progress.set_length(u64::try_from(count).unwrap_or(u64::MAX));

    let pairs = cycle_to_count(&products, count)
        .into_iter()
        .zip(cycle_to_count(&users, count));

    let mut stats = ReviewStats::default();
    for (product_id, user_id) in pairs {
        let review = NewReview {
            product_id,
            user_id,
            rating: faker::rating(rng),
            title: faker::review_title(rng).to_owned(),
            content: faker::review_content(rng).to_owned(),
        };
        match store.insert_review(&review).await {
            Ok(_) => stats.inserted += 1,
            Err(e) if e.is_unique_violation_of(REVIEWS_PRODUCT_USER_KEY) => {
                debug!(%product_id, %user_id, "User already reviewed product, skipping");
                stats.skipped += 1;
            }
            Err(e) => return Err(SeedError::store(ENTITY)(e)),
        }
        progress.inc(1);
    }

    info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "Generated reviews"
    );
    Ok(stats)
}
