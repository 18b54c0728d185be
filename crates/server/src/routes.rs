use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::auth::ServerState;
use crate::openapi::ApiDoc;

pub mod bookings;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, booking endpoints, API docs
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let bookings = Router::new()
        .route("/me/history/", get(bookings::list))
        .route(
            "/me/history/service/:id/",
            get(bookings::retrieve)
                .put(bookings::update)
                .patch(bookings::update)
                .delete(bookings::destroy),
        )
        .route("/me/service/", post(bookings::create));

    Router::new()
        .route("/health", get(health))
        .merge(bookings)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
