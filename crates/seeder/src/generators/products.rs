use indicatif::ProgressBar;
use rand::Rng;
use tracing::{info, instrument};

use dbseeder_core::{CategoryId, ProductId};

use super::{cycle_to_count, require_parents};
use crate::error::SeedError;
use crate::faker;
use crate::store::{NewProduct, NewProductImage, SeedStore};

const ENTITY: &str = "products";

const MIN_PRICE: f64 = 9.99;
const MAX_PRICE: f64 = 999.99;
const MIN_WEIGHT: f64 = 0.1;
const MAX_WEIGHT: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub products: usize,
    pub images: usize,
}

fn random_product<R: Rng + ?Sized>(rng: &mut R, category_id: CategoryId) -> NewProduct {
    NewProduct {
        name: faker::product_name(rng),
        description: faker::product_description(rng).to_owned(),
        price: faker::price(rng, MIN_PRICE, MAX_PRICE),
        stock_quantity: rng.random_range(1..=1000),
        category_id,
        sku: faker::sku(rng),
        weight: rng
            .random_bool(0.8)
            .then(|| faker::weight(rng, MIN_WEIGHT, MAX_WEIGHT)),
        dimensions: rng.random_bool(0.7).then(|| faker::dimensions(rng)),
    }
}

async fn insert_images<S, R>(
    store: &S,
    rng: &mut R,
    product_id: ProductId,
    count: usize,
) -> Result<(), SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    for slot in 0..count {
        let image = NewProductImage {
            product_id,
            image_url: faker::image_url(rng, product_id),
            is_primary: slot == 0,
        };
        store
            .insert_product_image(&image)
            .await
            .map_err(SeedError::store("product_images"))?;
    }
    Ok(())
}

/// Insert `count` products spread over random categories, each with
/// `images_per_product` images of which the first is primary.
///
/// # Errors
///
/// Returns [`SeedError::MissingParents`] if no categories exist, or
/// [`SeedError::Store`] if an insert fails. A duplicate SKU is not retried.
#[instrument(skip(store, rng, progress))]
pub async fn generate_products<S, R>(
    store: &S,
    rng: &mut R,
    count: usize,
    images_per_product: usize,
    progress: &ProgressBar,
) -> Result<ProductStats, SeedError>
where
    S: SeedStore,
    R: Rng + ?Sized,
{
    let sampled = store
        .sample_category_ids(count)
        .await
        .map_err(SeedError::store(ENTITY))?;
    require_parents(&sampled, count, ENTITY, "categories")?;
    let categories = cycle_to_count(&sampled, count);
    progress.set_length(u64::try_from(count).unwrap_or(u64::MAX));

    let mut stats = ProductStats::default();
    for category_id in categories {
        let product = random_product(rng, category_id);
        let product_id = store
            .insert_product(&product)
            .await
            .map_err(SeedError::store(ENTITY))?;
        insert_images(store, rng, product_id, images_per_product).await?;
        stats.products += 1;
        stats.images += images_per_product;
        progress.inc(1);
    }

    info!(
        products = stats.products,
        images = stats.images,
        "Generated products"
    );
    Ok(stats)
}
