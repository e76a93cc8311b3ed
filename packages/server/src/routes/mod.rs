use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Multipart bodies are capped well above the cover image limit so an
/// oversized image still reaches domain validation and produces a
/// structured error instead of a transport failure.
fn graphql_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(16 * 1024 * 1024) // 16 MiB
}

pub fn routes(config: &AppConfig) -> Router<AppState> {
    let graphql = Router::new()
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql),
        )
        .layer(graphql_body_limit());

    let blobs = Router::new().route(
        "/blobs/{key}/{filename}",
        get(handlers::blob::download_blob),
    );

    graphql.merge(blobs).layer(cors_layer(config))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.server.cors.max_age))
}
