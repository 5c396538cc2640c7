pub mod api;
pub mod app;
pub mod components;
pub mod composer;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod pages;
pub mod services;
pub mod session;

#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

/// Browser entry point: install logging, then mount the app.
pub fn run() {
    let config = AppConfig::from_build_env();
    logging::init(&config.log_filter);
    tracing::info!("Starting profile portal against {}", config.api_base_url);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
