use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use tracing::instrument;

use crate::graphql::UrlContext;
use crate::state::AppState;

/// Execute a GraphQL request with the request-scoped URL context injected.
#[instrument(skip(state, req))]
pub async fn graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let urls = UrlContext::new(state.config.server.public_url.clone());
    state
        .schema
        .execute(req.into_inner().data(urls))
        .await
        .into()
}

/// Serve the GraphiQL IDE.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
