//! SumVid HTTP Server
//!
//! Actix-web REST API: rate-limited key-point summaries and a health probe

pub mod client_ip;
pub mod rate_governor;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sumvid_common::{AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use rate_governor::{Admission, Clock, RateGovernor, RateLimitInfo, SystemClock};
pub use state::AppState;

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_address = config.server_bind_address();
    let state = web::Data::new(AppState::new(config)?);

    info!(
        "Starting server on {} (rate limit: {} per {}s)",
        bind_address,
        state.config.rate_limit,
        state.config.rate_window_secs
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
