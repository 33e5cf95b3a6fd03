//! Runs the generators in foreign-key order.

use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use rand::Rng;
use tracing::{info, instrument};

use crate::config::SeedPlan;
use crate::error::SeedError;
use crate::generators::{
    AddressStats, CategoryStats, OrderStats, ProductStats, ReviewStats, UserStats,
    generate_addresses, generate_categories, generate_orders, generate_products,
    generate_reviews, generate_users,
};
use crate::progress;
use crate::store::SeedStore;

/// What a run produced. A step that did not run is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: Option<UserStats>,
    pub addresses: Option<AddressStats>,
    pub categories: Option<CategoryStats>,
    pub products: Option<ProductStats>,
    pub orders: Option<OrderStats>,
    pub reviews: Option<ReviewStats>,
    pub elapsed: Duration,
}

/// Seeding driver.
///
/// Owns the RNG for the whole run so that one seed reproduces every
/// generated value.
///
/// ## Examples
///
/// ```no_run
/// # async fn demo(store: dbseeder::PgStore) -> Result<(), dbseeder::SeedError> {
/// use dbseeder::{SeedPlan, Seeder};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut seeder = Seeder::new(&store, StdRng::seed_from_u64(42));
/// let report = seeder.run(&SeedPlan::default()).await?;
/// println!("seeded in {:?}", report.elapsed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Seeder<'s, S, R> {
    store: &'s S,
    rng: R,
    show_progress: bool,
}

/// Close out a step's bar: finished on success, left as-is on failure.
fn settle<T>(bar: &ProgressBar, result: Result<T, SeedError>) -> Result<T, SeedError> {
    if result.is_ok() {
        bar.finish();
    } else {
        bar.abandon();
    }
    result
}

impl<'s, S, R> Seeder<'s, S, R>
where
    S: SeedStore,
    R: Rng,
{
    /// Progress bars are off until [`show_progress`](Self::show_progress) is called.
    pub const fn new(store: &'s S, rng: R) -> Self {
        Self {
            store,
            rng,
            show_progress: false,
        }
    }

    /// Draw a progress bar per step on stderr, when it is a terminal.
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run every step the plan enables, in order: users, addresses,
    /// categories, products, orders, reviews.
    ///
    /// Stops at the first failing step. Rows inserted before the failure are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Config`] for an invalid plan, checked before
    /// anything is inserted, or the error of the step that failed.
    #[instrument(skip_all)]
    pub async fn run(&mut self, plan: &SeedPlan) -> Result<SeedReport, SeedError> {
        plan.validate()?;
        let started = Instant::now();
        let mut report = SeedReport::default();
        let store = self.store;
        let rng = &mut self.rng;
        let visible = self.show_progress;

        if plan.runs_users() {
            let bar = progress::bar(plan.users, "users", visible);
            let stats = generate_users(store, rng, plan.users, &bar).await;
            report.users = Some(settle(&bar, stats)?);
        }

        if plan.runs_addresses() {
            let total = plan.users.saturating_mul(plan.addresses_per_user);
            let bar = progress::bar(total, "addresses", visible);
            let stats =
                generate_addresses(store, rng, plan.users, plan.addresses_per_user, &bar).await;
            report.addresses = Some(settle(&bar, stats)?);
        }

        if plan.runs_categories() {
            let bar = progress::bar(plan.categories, "categories", visible);
            let stats =
                generate_categories(store, rng, plan.categories, plan.category_depth, &bar).await;
            report.categories = Some(settle(&bar, stats)?);
        }

        if plan.runs_products() {
            let bar = progress::bar(plan.products, "products", visible);
            let stats =
                generate_products(store, rng, plan.products, plan.images_per_product, &bar).await;
            report.products = Some(settle(&bar, stats)?);
        }

        if plan.runs_orders() {
            let bar = progress::bar(plan.orders, "orders", visible);
            let stats =
                generate_orders(store, rng, plan.orders, plan.max_items_per_order, &bar).await;
            report.orders = Some(settle(&bar, stats)?);
        }

        if plan.runs_reviews() {
            let bar = progress::bar(plan.reviews, "reviews", visible);
            let stats = generate_reviews(store, rng, plan.reviews, &bar).await;
            report.reviews = Some(settle(&bar, stats)?);
        }

        report.elapsed = started.elapsed();
        info!(elapsed = ?report.elapsed, "Seeding run finished");
        Ok(report)
    }
}
