//! In-memory [`SeedStore`] for generator tests.
//!
//! Enforces the same unique constraints as the real schema and can be told to
//! fail after a number of inserts.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::significant_drop_tightening
)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use dbseeder_core::{
    AddressId, CategoryId, OrderId, OrderItemId, Price, ProductId, ProductImageId, ReviewId,
    UserId,
};

use super::schema::{REVIEWS_PRODUCT_USER_KEY, USERS_EMAIL_KEY};
use super::{
    NewAddress, NewCategory, NewOrder, NewOrderItem, NewProduct, NewProductImage, NewReview,
    NewUser, SeedStore,
};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Vec<NewUser>,
    pub addresses: Vec<NewAddress>,
    pub categories: Vec<NewCategory>,
    pub products: Vec<NewProduct>,
    pub product_images: Vec<NewProductImage>,
    pub orders: Vec<NewOrder>,
    pub order_items: Vec<NewOrderItem>,
    pub reviews: Vec<NewReview>,
    emails: HashSet<String>,
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    rng: Mutex<StdRng>,
    /// Inserts left before every insert fails.
    budget: Mutex<Option<usize>>,
    /// Users whose inserts are rejected as duplicates regardless of email.
    reject_user_emails: Mutex<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids are 1-based positions, like a fresh `SERIAL`.
fn next_id(len: usize) -> i32 {
    i32::try_from(len + 1).unwrap()
}

fn index_of(id: i32) -> usize {
    usize::try_from(id - 1).unwrap()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            rng: Mutex::new(StdRng::seed_from_u64(0)),
            budget: Mutex::new(None),
            reject_user_emails: Mutex::new(0),
        }
    }

    /// Fail every insert after `inserts` more have succeeded.
    pub fn fail_after(&self, inserts: usize) {
        *self.budget.lock().unwrap() = Some(inserts);
    }

    /// Reject the next `count` user inserts as duplicate emails.
    pub fn reject_next_users(&self, count: usize) {
        *self.reject_user_emails.lock().unwrap() = count;
    }

    pub fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Depth of a category, counting top-level categories as 1.
    pub fn category_depth(&self, id: CategoryId) -> usize {
        let tables = self.tables();
        let mut depth = 1;
        let mut current = tables.categories[index_of(id.get())].parent_id;
        while let Some(parent) = current {
            depth += 1;
            current = tables.categories[index_of(parent.get())].parent_id;
        }
        depth
    }

    fn charge(&self) -> Result<(), StoreError> {
        let mut budget = self.budget.lock().unwrap();
        match budget.as_mut() {
            Some(0) => Err(StoreError::Database(sqlx::Error::PoolClosed)),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn sample(&self, len: usize, limit: usize) -> Vec<i32> {
        let mut ids: Vec<i32> = (1..=len).map(|i| i32::try_from(i).unwrap()).collect();
        ids.shuffle(&mut *self.rng.lock().unwrap());
        ids.truncate(limit);
        ids
    }
}

fn unique_violation(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: Some(constraint.to_owned()),
    }
}

impl SeedStore for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        self.charge()?;
        {
            let mut rejections = self.reject_user_emails.lock().unwrap();
            if *rejections > 0 {
                *rejections -= 1;
                return Err(unique_violation(USERS_EMAIL_KEY));
            }
        }
        let mut tables = self.tables();
        if !tables.emails.insert(user.email.clone()) {
            return Err(unique_violation(USERS_EMAIL_KEY));
        }
        let id = next_id(tables.users.len());
        tables.users.push(user.clone());
        Ok(UserId::new(id))
    }

    async fn insert_address(&self, address: &NewAddress) -> Result<AddressId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        let id = next_id(tables.addresses.len());
        tables.addresses.push(address.clone());
        Ok(AddressId::new(id))
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<CategoryId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        let id = next_id(tables.categories.len());
        tables.categories.push(category.clone());
        Ok(CategoryId::new(id))
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<ProductId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        if tables.products.iter().any(|p| p.sku == product.sku) {
            return Err(unique_violation("products_sku_key"));
        }
        let id = next_id(tables.products.len());
        tables.products.push(product.clone());
        Ok(ProductId::new(id))
    }

    async fn insert_product_image(
        &self,
        image: &NewProductImage,
    ) -> Result<ProductImageId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        let id = next_id(tables.product_images.len());
        tables.product_images.push(image.clone());
        Ok(ProductImageId::new(id))
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        let id = next_id(tables.orders.len());
        tables.orders.push(order.clone());
        Ok(OrderId::new(id))
    }

    async fn insert_order_item(&self, item: &NewOrderItem) -> Result<OrderItemId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        let id = next_id(tables.order_items.len());
        tables.order_items.push(item.clone());
        Ok(OrderItemId::new(id))
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewId, StoreError> {
        self.charge()?;
        let mut tables = self.tables();
        if tables
            .reviews
            .iter()
            .any(|r| r.product_id == review.product_id && r.user_id == review.user_id)
        {
            return Err(unique_violation(REVIEWS_PRODUCT_USER_KEY));
        }
        let id = next_id(tables.reviews.len());
        tables.reviews.push(review.clone());
        Ok(ReviewId::new(id))
    }

    async fn sample_user_ids(&self, limit: usize) -> Result<Vec<UserId>, StoreError> {
        let len = self.tables().users.len();
        Ok(self.sample(len, limit).into_iter().map(UserId::new).collect())
    }

    async fn sample_category_ids(&self, limit: usize) -> Result<Vec<CategoryId>, StoreError> {
        let len = self.tables().categories.len();
        Ok(self
            .sample(len, limit)
            .into_iter()
            .map(CategoryId::new)
            .collect())
    }

    async fn sample_product_ids(&self, limit: usize) -> Result<Vec<ProductId>, StoreError> {
        let len = self.tables().products.len();
        Ok(self
            .sample(len, limit)
            .into_iter()
            .map(ProductId::new)
            .collect())
    }

    async fn address_per_user(
        &self,
        users: &[UserId],
    ) -> Result<HashMap<UserId, AddressId>, StoreError> {
        let tables = self.tables();
        let mut found = HashMap::new();
        for user in users {
            if let Some(index) = tables.addresses.iter().position(|a| a.user_id == *user) {
                found.insert(*user, AddressId::new(next_id(index)));
            }
        }
        Ok(found)
    }

    async fn product_prices(
        &self,
        products: &[ProductId],
    ) -> Result<HashMap<ProductId, Price>, StoreError> {
        let tables = self.tables();
        Ok(products
            .iter()
            .filter_map(|id| {
                tables
                    .products
                    .get(index_of(id.get()))
                    .map(|p| (*id, p.price))
            })
            .collect())
    }
}
