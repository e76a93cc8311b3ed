use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::{BlobStore, filesystem::FilesystemBlobStore};
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;

    let blob_store: Arc<dyn BlobStore> = Arc::new(
        FilesystemBlobStore::new(config.storage.root.clone(), config.storage.max_blob_size)
            .await?,
    );

    let schema = server::graphql::build_schema(db.clone(), blob_store.clone());

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState {
        db,
        blob_store,
        config: Arc::new(config),
        schema,
    };

    let app = server::build_router(state);

    info!("GraphQL endpoint at http://{addr}/graphql");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
