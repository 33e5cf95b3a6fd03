//! Create the schema without seeding.

use tracing::info;

use dbseeder::{DatabaseConfig, PgStore};

/// Connect and create any missing table.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a `CREATE TABLE` fails.
pub async fn run(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(host = %config.host, port = config.port, dbname = %config.dbname, "Connecting to database");
    let store = PgStore::connect(config).await?;
    store.create_tables().await?;
    info!("Schema ready");
    Ok(())
}
