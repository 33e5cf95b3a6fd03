//! dbseeder - seed a `PostgreSQL` e-commerce schema with synthetic data.
//!
//! # Usage
//!
//! ```bash
//! # Create the eight tables without inserting anything
//! dbseeder init
//!
//! # Seed with the default plan
//! dbseeder seed
//!
//! # Small, reproducible run against another database
//! dbseeder --host db.local --port 5432 seed --users 10 --products 50 --seed 42
//!
//! # Counts from a profile, overridden by flags
//! dbseeder seed --profile demo.yaml --reviews 0
//! ```
//!
//! # Environment Variables
//!
//! Every connection flag can also be set through the environment, or a `.env`
//! file: `DBSEEDER_HOST`, `DBSEEDER_PORT`, `DBSEEDER_USER`,
//! `DBSEEDER_PASSWORD`, `DBSEEDER_DBNAME`, `DBSEEDER_SSLMODE`. `RUST_LOG`
//! controls log filtering.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use sqlx::postgres::PgSslMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbseeder::{DatabaseConfig, SeedProfile};

mod commands;

#[derive(Parser)]
#[command(name = "dbseeder")]
#[command(author, version, about = "Seed a PostgreSQL e-commerce schema with synthetic data")]
struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Database host
    #[arg(long, global = true, env = "DBSEEDER_HOST", default_value = "localhost")]
    host: String,

    /// Database port
    #[arg(long, global = true, env = "DBSEEDER_PORT", default_value_t = 5433)]
    port: u16,

    /// Database user
    #[arg(long, global = true, env = "DBSEEDER_USER", default_value = "shared_user")]
    user: String,

    /// Database password
    #[arg(
        long,
        global = true,
        env = "DBSEEDER_PASSWORD",
        default_value = "shared_password",
        hide_env_values = true,
        hide_default_value = true
    )]
    password: String,

    /// Database name
    #[arg(long, global = true, env = "DBSEEDER_DBNAME", default_value = "shared_db")]
    dbname: String,

    /// SSL mode (disable, allow, prefer, require, verify-ca, verify-full)
    #[arg(
        long,
        global = true,
        env = "DBSEEDER_SSLMODE",
        default_value = "disable",
        value_parser = DatabaseConfig::parse_ssl_mode
    )]
    sslmode: PgSslMode,
}

impl DatabaseArgs {
    fn into_config(self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.host,
            port: self.port,
            user: self.user,
            password: SecretString::from(self.password),
            dbname: self.dbname,
            ssl_mode: self.sslmode,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema and fill it with generated rows
    Seed(SeedArgs),
    /// Create the schema only
    Init,
}

/// Row counts for `seed`. Unset values come from `--profile`, then the
/// built-in defaults.
#[derive(Args)]
struct SeedArgs {
    /// Number of users
    #[arg(long)]
    users: Option<usize>,

    /// Addresses per user
    #[arg(long)]
    addresses_per_user: Option<usize>,

    /// Number of categories
    #[arg(long)]
    categories: Option<usize>,

    /// Maximum depth of the category tree
    #[arg(long)]
    category_depth: Option<usize>,

    /// Number of products
    #[arg(long)]
    products: Option<usize>,

    /// Images per product
    #[arg(long)]
    images_per_product: Option<usize>,

    /// Number of orders
    #[arg(long)]
    orders: Option<usize>,

    /// Maximum line items per order
    #[arg(long)]
    max_items_per_order: Option<usize>,

    /// Number of reviews
    #[arg(long)]
    reviews: Option<usize>,

    /// Run every generator, even those with a count of zero
    #[arg(long)]
    all: bool,

    /// Seed for the random generator; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// YAML file with default counts
    #[arg(long)]
    profile: Option<PathBuf>,
}

impl SeedArgs {
    /// The counts given on the command line, as a partial plan.
    const fn overrides(&self) -> SeedProfile {
        SeedProfile {
            users: self.users,
            addresses_per_user: self.addresses_per_user,
            categories: self.categories,
            category_depth: self.category_depth,
            products: self.products,
            images_per_product: self.images_per_product,
            orders: self.orders,
            max_items_per_order: self.max_items_per_order,
            reviews: self.reviews,
            all: if self.all { Some(true) } else { None },
        }
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dbseeder=info,dbseeder_cli=info".into());

    let json = matches!(format, LogFormat::Json);
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.database.into_config();
    match cli.command {
        Commands::Seed(args) => commands::seed::run(&config, &args, !cli.quiet).await?,
        Commands::Init => commands::init::run(&config).await?,
    }
    Ok(())
}
