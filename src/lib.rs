pub mod model;
pub mod notify;
pub mod services;
pub mod store;
pub mod utils;

use dotenv::dotenv;
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

///
/// Initialise tracing for an embedding binary or a test run.
///
pub fn init_tracing() {
    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    utils::config::default_env("RUST_LOG", "INFO");

    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}
