pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    routes::routes(&state.config).with_state(state)
}
