mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{AddEventPayload, EventObject};

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};
use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::entity::blob;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with its long-lived dependencies.
pub fn build_schema(db: DatabaseConnection, blob_store: Arc<dyn BlobStore>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .data(blob_store)
        .finish()
}

/// Request-scoped context for building blob URLs.
///
/// Injected into each GraphQL request by the transport layer; resolvers
/// never reach into process-wide routing state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlContext {
    base_url: Option<String>,
}

impl UrlContext {
    /// A context producing absolute URLs under `base_url`, or path-only
    /// URLs when `base_url` is `None`.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.map(|b| b.trim_end_matches('/').to_string());
        Self { base_url }
    }

    /// URL under which a stored blob's bytes can be fetched.
    pub fn blob_url(&self, blob: &blob::Model) -> String {
        let path = format!(
            "/blobs/{}/{}",
            blob.key,
            percent_encode_segment(&blob.filename)
        );
        match &self.base_url {
            Some(base) => format!("{base}{path}"),
            None => path,
        }
    }
}

/// Percent-encode a single URL path segment (RFC 3986 unreserved set).
fn percent_encode_segment(segment: &str) -> String {
    segment
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
