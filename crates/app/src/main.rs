//! Infinite Hotel - interactive console
//!
//! Queue guest groups, assign them rooms in batches, and inspect or
//! export the registry from a numbered menu.

use std::io;
use std::path::PathBuf;

use hilbert_core::{HilbertHotel, HotelConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod console;
mod menu;
mod timing;

fn main() {
    let config_path = HotelConfig::resolve_path(std::env::args_os().nth(1).map(PathBuf::from));
    let config_result = match &config_path {
        Some(path) => HotelConfig::load(path),
        None => Ok(HotelConfig::default()),
    };

    // Initialize logging; stdout belongs to the menu
    let log_filter = config_result
        .as_ref()
        .map(|config| config.log_filter.clone())
        .unwrap_or_else(|_| HotelConfig::default().log_filter);
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)))
        .init();

    tracing::info!("Starting Infinite Hotel");

    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let hotel = match HilbertHotel::from_config(&config) {
        Ok(hotel) => hotel,
        Err(e) => {
            tracing::error!("Failed to initialize hotel: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut session = menu::Session::new(hotel, config, stdin.lock(), io::stdout());
    if let Err(e) = session.run() {
        tracing::error!("Console I/O failed: {}", e);
        std::process::exit(1);
    }
}
