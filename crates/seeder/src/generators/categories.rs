use indicatif::ProgressBar;
use rand::Rng;
use tracing::{debug, info, instrument};

use dbseeder_core::CategoryId;

use crate::error::{ConfigError, SeedError};
use crate::faker;
use crate::store::{NewCategory, SeedStore};

const ENTITY: &str = "categories";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats {
    /// Categories created at each tier, top level first.
    pub per_tier: Vec<usize>,
}

impl CategoryStats {
    #[must_use]
    pub fn total(&self) -> usize {
        self.per_tier.iter().sum()
    }
}

async fn insert_category<S, R>(
    store: &S,
    rng: &mut R,
    parent_id: Option<CategoryId>,
) -> Result<CategoryId, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let category = NewCategory {
        name: faker::category_name(rng).to_owned(),
        description: faker::category_description(rng).to_owned(),
        parent_id,
    };
    store
        .insert_category(&category)
        .await
        .map_err(SeedError::store(ENTITY))
}

/// Build a category tree of exactly `count` nodes, at most `max_depth` tiers deep.
///
/// A third of the categories (at least one) are top level, unless
/// `max_depth` is 1 and all of them are. Each lower tier spreads what is left
/// evenly over the tier above, filling parents in order. The deepest allowed
/// tier takes everything still remaining.
///
/// # Errors
///
/// Returns [`SeedError::Config`] if `max_depth` is zero and
/// [`SeedError::Store`] if an insert fails.
#[instrument(skip(store, rng, progress))]
pub async fn generate_categories<S, R>(
    store: &S,
    rng: &mut R,
    count: usize,
    max_depth: usize,
    progress: &ProgressBar,
) -> Result<CategoryStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let mut stats = CategoryStats::default();
    if count == 0 {
        return Ok(stats);
    }
    if max_depth == 0 {
        return Err(ConfigError::InvalidPlan("category-depth must be at least 1".to_owned()).into());
    }
    progress.set_length(u64::try_from(count).unwrap_or(u64::MAX));

    let top_level = if max_depth == 1 {
        count
    } else {
        (count / 3).max(1)
    };
    let mut parents = Vec::with_capacity(top_level);
    for _ in 0..top_level {
        parents.push(insert_category(store, rng, None).await?);
        progress.inc(1);
    }
    stats.per_tier.push(top_level);

    let mut remaining = count - top_level;
    let mut tier = 2;
    while remaining > 0 && tier <= max_depth && !parents.is_empty() {
        let per_parent = if tier == max_depth {
            remaining.div_ceil(parents.len())
        } else {
            (remaining / parents.len()).max(1)
        };
        debug!(tier, parents = parents.len(), per_parent, "Filling category tier");

        let mut children = Vec::with_capacity(remaining.min(per_parent * parents.len()));
        'parents: for &parent in &parents {
            for _ in 0..per_parent {
                if remaining == 0 {
                    break 'parents;
                }
                children.push(insert_category(store, rng, Some(parent)).await?);
                remaining -= 1;
                progress.inc(1);
            }
        }
        stats.per_tier.push(children.len());
        parents = children;
        tier += 1;
    }

    info!(
        total = stats.total(),
        tiers = stats.per_tier.len(),
        "Generated categories"
    );
    Ok(stats)
}
