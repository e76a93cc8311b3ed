use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::{BlobKey, BlobStore};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::entity::blob;
use crate::error::AppError;
use crate::state::AppState;

/// Serve the bytes of a stored blob.
///
/// The trailing filename segment only makes generated URLs readable;
/// lookup goes by key alone.
#[instrument(skip(state, headers), fields(key))]
pub async fn download_blob(
    State(state): State<AppState>,
    Path((key, _filename)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key =
        BlobKey::parse(&key).map_err(|_| AppError::Validation("Invalid blob key".into()))?;

    let blob_row = blob::Entity::find()
        .filter(blob::Column::Key.eq(key.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blob not found".into()))?;

    build_blob_response(&blob_row, &key, &headers, &*state.blob_store).await
}

/// Build a streaming blob response from a `blob::Model`.
async fn build_blob_response(
    blob_row: &blob::Model,
    key: &BlobKey,
    headers: &HeaderMap,
    blob_store: &dyn BlobStore,
) -> Result<Response, AppError> {
    // Keys are immutable handles to immutable bytes, so the key doubles
    // as a strong ETag.
    let etag_value = format!("\"{key}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = blob_store.get_stream(key).await?;
    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let content_type = blob_row
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, blob_row.byte_size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&blob_row.filename),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
