use indicatif::ProgressBar;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{info, instrument, warn};

use dbseeder_core::{Price, ProductId};

use super::{cycle_to_count, require_parents};
use crate::error::{ConfigError, SeedError};
use crate::faker;
use crate::store::{NewOrder, NewOrderItem, SeedStore};

const ENTITY: &str = "orders";

/// Products sampled once and shared by every generated order.
pub const PRODUCT_POOL_SIZE: usize = 100;

const MAX_QUANTITY: u16 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub orders: usize,
    pub items: usize,
    /// Orders dropped because the user has no address.
    pub skipped: usize,
}

struct Line {
    product_id: ProductId,
    quantity: u16,
    unit_price: Price,
}

fn random_lines<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[(ProductId, Price)],
    max_items: usize,
) -> Vec<Line> {
    let count = rng.random_range(1..=max_items);
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&(product_id, unit_price)) = pool.choose(rng) else {
            break;
        };
        lines.push(Line {
            product_id,
            quantity: rng.random_range(1..=MAX_QUANTITY),
            unit_price,
        });
    }
    lines
}

/// Insert `count` orders for random users, each with 1 to `max_items` lines.
///
/// Lines are drawn from a pool of up to [`PRODUCT_POOL_SIZE`] products and
/// priced at the product's current price. The order total is the exact sum
/// of its lines. Users without an address get no order; that is logged and
/// counted as skipped.
///
/// # Errors
///
/// Returns [`SeedError::Config`] if `max_items` is zero,
/// [`SeedError::MissingParents`] if there are no users or no products, or
/// [`SeedError::Store`] if a query fails.
#[instrument(skip(store, rng, progress))]
pub async fn generate_orders<S, R>(
    store: &S,
    rng: &mut R,
    count: usize,
    max_items: usize,
    progress: &ProgressBar,
) -> Result<OrderStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let mut stats = OrderStats::default();
    if count == 0 {
        return Ok(stats);
    }
    if max_items == 0 {
        return Err(
            ConfigError::InvalidPlan("max-items-per-order must be at least 1".to_owned()).into(),
        );
    }

    let sampled = store
        .sample_user_ids(count)
        .await
        .map_err(SeedError::store(ENTITY))?;
    require_parents(&sampled, count, ENTITY, "users")?;

    let pool_ids = store
        .sample_product_ids(PRODUCT_POOL_SIZE)
        .await
        .map_err(SeedError::store(ENTITY))?;
    let prices = store
        .product_prices(&pool_ids)
        .await
        .map_err(SeedError::store(ENTITY))?;
    let pool: Vec<(ProductId, Price)> = pool_ids
        .iter()
        .filter_map(|id| prices.get(id).map(|price| (*id, *price)))
        .collect();
    require_parents(&pool, count, ENTITY, "products")?;

    let addresses = store
        .address_per_user(&sampled)
        .await
        .map_err(SeedError::store(ENTITY))?;
    progress.set_length(u64::try_from(count).unwrap_or(u64::MAX));

    for user_id in cycle_to_count(&sampled, count) {
        let Some(&address_id) = addresses.get(&user_id) else {
            warn!(%user_id, "No address found for user, skipping order");
            stats.skipped += 1;
            progress.inc(1);
            continue;
        };

        let status = faker::order_status(rng);
        let payment_method = faker::payment_method(rng);
        let shipping_method = faker::shipping_method(rng);
        let tracking_number = (status.may_have_tracking() && rng.random_bool(0.7))
            .then(|| faker::tracking_number(rng));
        let notes = rng
            .random_bool(0.3)
            .then(|| faker::order_note().to_owned());

        let lines = random_lines(rng, &pool, max_items);
        let total_amount = lines
            .iter()
            .map(|line| line.unit_price.times(u32::from(line.quantity)))
            .sum();

        let order = NewOrder {
            user_id,
            status,
            total_amount,
            shipping_address_id: address_id,
            billing_address_id: address_id,
            payment_method,
            shipping_method,
            tracking_number,
            notes,
        };
        let order_id = store
            .insert_order(&order)
            .await
            .map_err(SeedError::store(ENTITY))?;

        for line in &lines {
            let item = NewOrderItem {
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                price_per_unit: line.unit_price,
            };
            store
                .insert_order_item(&item)
                .await
                .map_err(SeedError::store("order_items"))?;
        }

        stats.orders += 1;
        stats.items += lines.len();
        progress.inc(1);
    }

    info!(
        orders = stats.orders,
        items = stats.items,
        skipped = stats.skipped,
        "Generated orders"
    );
    Ok(stats)
}
