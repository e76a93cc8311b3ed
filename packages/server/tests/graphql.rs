mod helpers;

use std::sync::Arc;

use async_graphql::{Request, Variables};
use common::storage::{BlobStore, filesystem::FilesystemBlobStore};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::json;
use uuid::Uuid;

use server::graphql::{AppSchema, UrlContext, build_schema};

use helpers::{BLOB_KEY, blob_model, event_model, stored_blob_count, upload_value};

const ADD_EVENT: &str = r#"
    mutation AddEvent($name: String!, $startDate: DateTime!, $image: Upload!) {
        addEvent(name: $name, startDate: $startDate, coverImage: $image) {
            event {
                id
                name
                coverImageUrl
            }
            errors
        }
    }
"#;

const EVENTS: &str = r#"
    query Events {
        events {
            id
            name
            coverImageUrl
        }
    }
"#;

struct TestApp {
    schema: AppSchema,
    storage_root: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

impl TestApp {
    async fn new(db: DatabaseConnection) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage_root = dir.path().join("blobs");
        let blob_store: Arc<dyn BlobStore> = Arc::new(
            FilesystemBlobStore::new(storage_root.clone(), 10 * 1024 * 1024)
                .await
                .unwrap(),
        );

        Self {
            schema: build_schema(db, blob_store),
            storage_root,
            _dir: dir,
        }
    }

    async fn add_event(
        &self,
        name: &str,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> serde_json::Value {
        let mut request = Request::new(ADD_EVENT).variables(Variables::from_json(json!({
            "name": name,
            "startDate": "2024-01-01T10:00:00Z",
            "image": null,
        })));
        request.set_upload("variables.image", upload_value(filename, content_type, data));

        let response = self
            .schema
            .execute(request.data(UrlContext::new(None)))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }
}

mod add_event {
    use super::*;

    #[tokio::test]
    async fn persists_valid_input() {
        let blob_row = blob_model(BLOB_KEY, "party.jpg", "image/jpeg", 500 * 1024);
        let event_row = event_model(1, "Launch", Some(blob_row.id));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![blob_row.clone()]])
            .append_query_results([vec![event_row]])
            .append_query_results([vec![blob_row]])
            .into_connection();
        let app = TestApp::new(db).await;

        let data = app
            .add_event("Launch", "party.jpg", Some("image/jpeg"), &[7u8; 500 * 1024])
            .await;

        let payload = &data["addEvent"];
        assert_eq!(payload["errors"], json!(null));
        assert_eq!(payload["event"]["id"], "1");
        assert_eq!(payload["event"]["name"], "Launch");
        assert_eq!(
            payload["event"]["coverImageUrl"],
            format!("/blobs/{BLOB_KEY}/party.jpg")
        );

        // The upload landed in the store.
        assert_eq!(stored_blob_count(&app.storage_root), 1);
    }

    #[tokio::test]
    async fn rejects_blank_name_without_storing_the_image() {
        // No query results appended: a valid run would panic the mock
        // connection, proving rejected inputs never reach the database.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::new(db).await;

        let data = app
            .add_event("", "party.png", Some("image/png"), &[7u8; 10 * 1024])
            .await;

        let payload = &data["addEvent"];
        assert_eq!(payload["event"], json!(null));
        assert_eq!(payload["errors"], json!(["Name can't be blank"]));
        assert_eq!(stored_blob_count(&app.storage_root), 0);
    }

    #[tokio::test]
    async fn rejects_oversized_image() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::new(db).await;

        let data = app
            .add_event("Big", "huge.jpg", Some("image/jpeg"), &[7u8; 2 * 1024 * 1024])
            .await;

        let payload = &data["addEvent"];
        assert_eq!(payload["event"], json!(null));
        assert_eq!(payload["errors"], json!(["Cover image is too big"]));
        assert_eq!(stored_blob_count(&app.storage_root), 0);
    }

    #[tokio::test]
    async fn rejects_unsupported_content_type() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::new(db).await;

        let data = app
            .add_event("Gif party", "clip.gif", Some("image/gif"), &[7u8; 10 * 1024])
            .await;

        let payload = &data["addEvent"];
        assert_eq!(payload["event"], json!(null));
        assert_eq!(
            payload["errors"],
            json!(["Cover image must be a JPEG or PNG"])
        );
    }

    #[tokio::test]
    async fn reports_every_violation_at_once() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = TestApp::new(db).await;

        let data = app
            .add_event("", "clip.gif", Some("image/gif"), &[7u8; 2 * 1024 * 1024])
            .await;

        let payload = &data["addEvent"];
        assert_eq!(payload["event"], json!(null));
        assert_eq!(
            payload["errors"],
            json!([
                "Name can't be blank",
                "Cover image is too big",
                "Cover image must be a JPEG or PNG",
            ])
        );
    }
}

mod events_query {
    use super::*;

    async fn execute(schema: &AppSchema, urls: UrlContext) -> serde_json::Value {
        let response = schema.execute(Request::new(EVENTS).data(urls)).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn projects_cover_image_url() {
        let blob_row = blob_model(BLOB_KEY, "party.png", "image/png", 1024);
        let event_row = event_model(1, "Launch", Some(blob_row.id));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_row]])
            .append_query_results([vec![blob_row]])
            .into_connection();
        let app = TestApp::new(db).await;

        let data = execute(
            &app.schema,
            UrlContext::new(Some("https://marquee.example".to_string())),
        )
        .await;

        assert_eq!(
            data["events"][0]["coverImageUrl"],
            format!("https://marquee.example/blobs/{BLOB_KEY}/party.png")
        );
    }

    #[tokio::test]
    async fn cover_image_url_is_null_without_an_image() {
        let event_row = event_model(1, "No image", None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_row]])
            .into_connection();
        let app = TestApp::new(db).await;

        let data = execute(&app.schema, UrlContext::new(None)).await;

        assert_eq!(data["events"][0]["name"], "No image");
        assert_eq!(data["events"][0]["coverImageUrl"], json!(null));
    }

    #[tokio::test]
    async fn dangling_blob_reference_fails_open_to_null() {
        let event_row = event_model(1, "Dangling", Some(Uuid::now_v7()));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_row]])
            .append_query_results([Vec::<server::entity::blob::Model>::new()])
            .into_connection();
        let app = TestApp::new(db).await;

        let data = execute(&app.schema, UrlContext::new(None)).await;

        // The row is still served; only the URL degrades.
        assert_eq!(data["events"][0]["name"], "Dangling");
        assert_eq!(data["events"][0]["coverImageUrl"], json!(null));
    }

    #[tokio::test]
    async fn repeated_reads_yield_identical_urls() {
        let blob_row = blob_model(BLOB_KEY, "party.png", "image/png", 1024);
        let event_row = event_model(1, "Launch", Some(blob_row.id));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![event_row.clone()]])
            .append_query_results([vec![blob_row.clone()]])
            .append_query_results([vec![event_row]])
            .append_query_results([vec![blob_row]])
            .into_connection();
        let app = TestApp::new(db).await;

        let urls = UrlContext::new(Some("https://marquee.example".to_string()));
        let first = execute(&app.schema, urls.clone()).await;
        let second = execute(&app.schema, urls).await;

        assert_eq!(
            first["events"][0]["coverImageUrl"],
            second["events"][0]["coverImageUrl"]
        );
    }
}
