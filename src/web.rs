#![cfg(not(tarpaulin_include))]

use alumni::app;
use alumni::config::AppConfig;
use std::env;

/// Main entry point for the web application
///
/// Starts the alumni registry server.
///
/// # Arguments
/// * `[data_path] [sheet_name] [bind_addr]` - optional positional overrides
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_args(env::args().skip(1))?;

    app::run(config).await
}
