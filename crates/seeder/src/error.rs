//! Error types for configuration, storage and seeding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling connection settings or a seed plan.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--sslmode` value that `PostgreSQL` does not know.
    #[error(
        "invalid sslmode {0:?}: expected one of disable, allow, prefer, require, verify-ca, verify-full"
    )]
    InvalidSslMode(String),

    /// Seed profile could not be read.
    #[error("failed to read profile {}: {source}", .path.display())]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed profile is not valid YAML for a plan.
    #[error("invalid profile {}: {source}", .path.display())]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Plan values that no generator can honour.
    #[error("invalid seed plan: {0}")]
    InvalidPlan(String),
}

/// Errors returned by a [`SeedStore`](crate::store::SeedStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the row.
    #[error("unique constraint {} violated", .constraint.as_deref().unwrap_or("<unnamed>"))]
    UniqueViolation {
        /// Name of the violated constraint, when the server reports one.
        constraint: Option<String>,
    },

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether this is a unique violation of the named constraint.
    #[must_use]
    pub fn is_unique_violation_of(&self, constraint_name: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint_name
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::UniqueViolation {
                constraint: db_err.constraint().map(str::to_owned),
            };
        }
        Self::Database(e)
    }
}

/// Errors that stop a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Invalid configuration or plan.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be reached.
    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A `CREATE TABLE` statement failed.
    #[error("failed to create table {table}: {source}")]
    Schema {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Unrecoverable storage error inside a generator.
    #[error("failed to seed {entity}: {source}")]
    Store {
        entity: &'static str,
        #[source]
        source: StoreError,
    },

    /// A generator needs parent rows that do not exist.
    #[error("cannot seed {entity}: no {parent} found")]
    MissingParents {
        entity: &'static str,
        parent: &'static str,
    },

    /// Duplicate-key retries ran out for a single row.
    #[error("gave up seeding {entity} after {attempts} duplicate-key collisions")]
    RetriesExhausted { entity: &'static str, attempts: u32 },
}

impl SeedError {
    /// Adapter for `map_err` that tags a store error with the entity being seeded.
    pub fn store(entity: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { entity, source }
    }
}
