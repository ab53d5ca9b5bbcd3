//! Axum server setup and routing.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::config::AllowedOrigins;
use crate::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/execute", post(api::execute::execute))
        .route("/execute-evolution", post(api::execute::execute_evolution))
        .route("/backends", get(api::backends::list_backends));

    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(api::health::health))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS policy for the configured origins.
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    match origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::List(list) => {
            // Config parsing already rejected values that are not valid headers.
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
        }
    }
}
