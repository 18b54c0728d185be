use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;
use service::booking::service::BookingPolicyConfig;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn load_booking_policy() -> BookingPolicyConfig {
    match configs::load_default() {
        Ok(cfg) => BookingPolicyConfig {
            enforce_monotonic_transitions: cfg.booking.enforce_monotonic_transitions,
        },
        Err(_) => BookingPolicyConfig::default(),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection
    let db = models::db::connect().await?;

    // Shared secret with the identity provider issuing bearer tokens
    let jwt_secret =
        env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());

    let policy = load_booking_policy();
    info!(
        enforce_monotonic_transitions = policy.enforce_monotonic_transitions,
        "booking policy loaded"
    );

    let state = ServerState { db, auth: ServerAuthConfig { jwt_secret }, policy };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
