//! Seed the database with generated rows.
//!
//! Resolves the plan (flags over `--profile` over defaults), connects,
//! creates any missing table, runs the generators and logs a per-table
//! summary.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use dbseeder::{DatabaseConfig, PgStore, SeedPlan, SeedProfile, Seeder};

use crate::SeedArgs;

/// Seed derived from the wall clock, for runs without `--seed`.
fn time_seed() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_micros()).unwrap_or_default()
}

async fn resolve_plan(args: &SeedArgs) -> Result<SeedPlan, Box<dyn std::error::Error>> {
    let profile = match &args.profile {
        Some(path) => {
            info!(path = %path.display(), "Loading seed profile");
            SeedProfile::load(path).await?
        }
        None => SeedProfile::default(),
    };
    let plan = args.overrides().fallback_to(profile).into_plan();
    plan.validate()?;
    Ok(plan)
}

/// Run the `seed` command.
///
/// # Errors
///
/// Returns an error if the plan is invalid, the database is unreachable,
/// schema creation fails, or a generator fails.
pub async fn run(
    config: &DatabaseConfig,
    args: &SeedArgs,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate the plan before connecting
    let plan = resolve_plan(args).await?;
    let seed = args.seed.unwrap_or_else(time_seed);
    info!(seed, ?plan, "Seeding plan resolved");

    info!(host = %config.host, port = config.port, dbname = %config.dbname, "Connecting to database");
    let store = PgStore::connect(config).await?;
    store.create_tables().await?;
    store.seed_sampling(seed).await?;

    let mut seeder = Seeder::new(&store, StdRng::seed_from_u64(seed)).show_progress(show_progress);
    let report = seeder.run(&plan).await?;

    info!("Seeding completed successfully");
    for (table, rows) in store.row_counts().await? {
        info!(table, rows, "Table summary");
    }
    if let Some(users) = report.users {
        info!(retries = users.retries, "Duplicate emails re-drawn");
    }
    if let Some(orders) = report.orders.filter(|o| o.skipped > 0) {
        info!(skipped = orders.skipped, "Orders skipped for users without an address");
    }
    if let Some(reviews) = report.reviews.filter(|r| r.skipped > 0) {
        info!(skipped = reviews.skipped, "Duplicate reviews skipped");
    }
    info!(elapsed = ?report.elapsed, "Total time");

    Ok(())
}
