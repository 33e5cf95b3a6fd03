//! Connection settings and the seed plan.
//!
//! # Seed profiles
//!
//! A profile is a YAML file holding any subset of the plan, keyed like the
//! `seed` flags:
//!
//! ```yaml
//! users: 50
//! addresses-per-user: 1
//! categories: 12
//! category-depth: 2
//! ```
//!
//! Values resolve as flag > profile > built-in default.

use std::path::Path;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::ConfigError;

/// `PostgreSQL` connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Role password.
    pub password: SecretString,
    /// Database name.
    pub dbname: String,
    /// TLS negotiation mode.
    pub ssl_mode: PgSslMode,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("dbname", &self.dbname)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

impl DatabaseConfig {
    /// Parse an `sslmode` value (`disable`, `require`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSslMode`] for unknown modes.
    pub fn parse_ssl_mode(value: &str) -> Result<PgSslMode, ConfigError> {
        PgSslMode::from_str(value).map_err(|_| ConfigError::InvalidSslMode(value.to_owned()))
    }

    /// sqlx connect options for these settings.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.dbname)
            .ssl_mode(self.ssl_mode)
    }
}

/// How many rows of each entity to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub users: usize,
    pub addresses_per_user: usize,
    pub categories: usize,
    /// Maximum number of tiers in the category tree.
    pub category_depth: usize,
    pub products: usize,
    pub images_per_product: usize,
    pub orders: usize,
    pub max_items_per_order: usize,
    pub reviews: usize,
    /// Run every generator, even those whose count is zero.
    pub all: bool,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: 100,
            addresses_per_user: 2,
            categories: 30,
            category_depth: 3,
            products: 1000,
            images_per_product: 3,
            orders: 500,
            max_items_per_order: 5,
            reviews: 300,
            all: false,
        }
    }
}

impl SeedPlan {
    /// Reject plans that a generator cannot carry out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPlan`] when categories run with a depth
    /// of zero or orders run with at most zero items.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories > 0 && self.category_depth == 0 {
            return Err(ConfigError::InvalidPlan(
                "category-depth must be at least 1".to_owned(),
            ));
        }
        if self.orders > 0 && self.max_items_per_order == 0 {
            return Err(ConfigError::InvalidPlan(
                "max-items-per-order must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn runs_users(&self) -> bool {
        self.all || self.users > 0
    }

    #[must_use]
    pub const fn runs_addresses(&self) -> bool {
        self.all || (self.users > 0 && self.addresses_per_user > 0)
    }

    #[must_use]
    pub const fn runs_categories(&self) -> bool {
        self.all || self.categories > 0
    }

    #[must_use]
    pub const fn runs_products(&self) -> bool {
        self.all || self.products > 0
    }

    #[must_use]
    pub const fn runs_orders(&self) -> bool {
        self.all || self.orders > 0
    }

    #[must_use]
    pub const fn runs_reviews(&self) -> bool {
        self.all || self.reviews > 0
    }
}

/// A partial [`SeedPlan`], as given on the command line or in a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SeedProfile {
    pub users: Option<usize>,
    pub addresses_per_user: Option<usize>,
    pub categories: Option<usize>,
    pub category_depth: Option<usize>,
    pub products: Option<usize>,
    pub images_per_product: Option<usize>,
    pub orders: Option<usize>,
    pub max_items_per_order: Option<usize>,
    pub reviews: Option<usize>,
    pub all: Option<bool>,
}

impl SeedProfile {
    /// Parse a profile from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfileParse`] for malformed YAML or unknown keys.
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::ProfileParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Read and parse a profile file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfileRead`] if the file cannot be read and
    /// [`ConfigError::ProfileParse`] if it is not a valid profile.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::ProfileRead {
                path: path.to_owned(),
                source,
            })?;
        Self::from_yaml(path, &content)
    }

    /// Fill every unset value from `lower`.
    #[must_use]
    pub const fn fallback_to(self, lower: Self) -> Self {
        Self {
            users: first_set(self.users, lower.users),
            addresses_per_user: first_set(self.addresses_per_user, lower.addresses_per_user),
            categories: first_set(self.categories, lower.categories),
            category_depth: first_set(self.category_depth, lower.category_depth),
            products: first_set(self.products, lower.products),
            images_per_product: first_set(self.images_per_product, lower.images_per_product),
            orders: first_set(self.orders, lower.orders),
            max_items_per_order: first_set(self.max_items_per_order, lower.max_items_per_order),
            reviews: first_set(self.reviews, lower.reviews),
            all: match self.all {
                Some(all) => Some(all),
                None => lower.all,
            },
        }
    }

    /// Resolve into a full plan, using defaults for anything still unset.
    #[must_use]
    pub fn into_plan(self) -> SeedPlan {
        let defaults = SeedPlan::default();
        SeedPlan {
            users: self.users.unwrap_or(defaults.users),
            addresses_per_user: self
                .addresses_per_user
                .unwrap_or(defaults.addresses_per_user),
            categories: self.categories.unwrap_or(defaults.categories),
            category_depth: self.category_depth.unwrap_or(defaults.category_depth),
            products: self.products.unwrap_or(defaults.products),
            images_per_product: self
                .images_per_product
                .unwrap_or(defaults.images_per_product),
            orders: self.orders.unwrap_or(defaults.orders),
            max_items_per_order: self
                .max_items_per_order
                .unwrap_or(defaults.max_items_per_order),
            reviews: self.reviews.unwrap_or(defaults.reviews),
            all: self.all.unwrap_or(defaults.all),
        }
    }
}

const fn first_set(value: Option<usize>, fallback: Option<usize>) -> Option<usize> {
    match value {
        Some(v) => Some(v),
        None => fallback,
    }
}
