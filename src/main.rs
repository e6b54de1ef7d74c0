//! Fare calculator service.
//!
//! Run the server with
//! ```not_rust
//! cargo run
//! ```
//!
//! Then open http://localhost:3000 or ask for a quote directly:
//! ```not_rust
//! curl -d distance=10 -d discount=on http://localhost:3000/calculate_fare
//! ```

mod config;
mod geocoding;
mod handlers;
mod models;

use std::sync::Arc;

use axum::Server;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServiceConfig;
use crate::geocoding::{NominatimGeocoder, DEFAULT_DISPLAY_COORDINATE};
use crate::handlers::router::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "FareService=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::init()?;
    let addr = config.listen_addr()?;

    let geocoder = NominatimGeocoder::new(
        &config.geocoder_url,
        &config.geocoder_user_agent,
        config.geocoder_timeout,
    )?;
    info!("Geocoding with {}", config.geocoder_url);

    let state = AppState::new(
        Arc::new(geocoder),
        &config.display_place,
        DEFAULT_DISPLAY_COORDINATE,
    )?;
    let app = router(state, &config.static_dir);

    info!("listening on {}", addr);
    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
