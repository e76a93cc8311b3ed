// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use async_graphql::UploadValue;
use chrono::Utc;
use uuid::Uuid;

use server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig};
use server::entity::{blob, event};

pub const BLOB_KEY: &str = "0123456789abcdef0123456789abcdef";

pub fn test_config(root: PathBuf) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_url: None,
            cors: CorsConfig {
                allow_origins: Vec::new(),
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
        },
        storage: StorageConfig {
            root,
            max_blob_size: 10 * 1024 * 1024,
        },
    }
}

pub fn event_model(id: i32, name: &str, cover_image_id: Option<Uuid>) -> event::Model {
    event::Model {
        id,
        name: name.to_string(),
        description: None,
        start_date: "2024-01-01T10:00:00Z".parse().unwrap(),
        cover_image_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn blob_model(key: &str, filename: &str, content_type: &str, byte_size: i64) -> blob::Model {
    blob::Model {
        id: Uuid::now_v7(),
        key: key.to_string(),
        filename: filename.to_string(),
        content_type: Some(content_type.to_string()),
        byte_size,
        created_at: Utc::now(),
    }
}

/// Build an `UploadValue` the way the multipart layer would.
pub fn upload_value(filename: &str, content_type: Option<&str>, data: &[u8]) -> UploadValue {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(data).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    UploadValue {
        filename: filename.to_string(),
        content_type: content_type.map(|s| s.to_string()),
        content: file,
    }
}

/// Count blobs on disk, ignoring the store's temp directory.
pub fn stored_blob_count(root: &Path) -> usize {
    fn walk(dir: &Path, count: &mut usize) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                if path.file_name().is_some_and(|name| name == ".tmp") {
                    continue;
                }
                walk(&path, count);
            } else {
                *count += 1;
            }
        }
    }

    let mut count = 0;
    if root.exists() {
        walk(root, &mut count);
    }
    count
}
