use chrono::Utc;
use common::storage::BlobStore;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{blob, event};
use crate::error::AppError;
use crate::models::event::{NewEvent, validate_new_event};

/// Result of attempting to create an event.
pub enum CreateEventOutcome {
    /// Every invariant held; the event was persisted.
    Created(event::Model),
    /// One or more invariants failed; nothing was stored.
    Invalid(Vec<String>),
}

/// Validate, store the cover image, and persist a new event.
///
/// Validation runs before the blob store is touched, so rejected inputs
/// leave no orphaned blobs. If the event insert fails after the image
/// was stored, the blob row and bytes are cleaned up again.
#[instrument(skip(db, blob_store, input), fields(name = %input.name))]
pub async fn create_event<C: ConnectionTrait>(
    db: &C,
    blob_store: &dyn BlobStore,
    input: NewEvent,
) -> Result<CreateEventOutcome, AppError> {
    let violations = validate_new_event(&input);
    if !violations.is_empty() {
        return Ok(CreateEventOutcome::Invalid(violations));
    }

    let now = Utc::now();

    let stored_image = match &input.cover_image {
        Some(image) => {
            let key = blob_store.put(&image.data).await?;

            let blob_row = blob::ActiveModel {
                id: Set(Uuid::now_v7()),
                key: Set(key.as_str().to_string()),
                filename: Set(image.filename.clone()),
                content_type: Set(image.effective_content_type()),
                byte_size: Set(image.data.len() as i64),
                created_at: Set(now),
            };

            let row = match blob_row.insert(db).await {
                Ok(row) => row,
                Err(err) => {
                    let _ = blob_store.delete(&key).await;
                    return Err(err.into());
                }
            };

            Some((key, row))
        }
        None => None,
    };

    let new_event = event::ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description.clone()),
        start_date: Set(input.start_date),
        cover_image_id: Set(stored_image.as_ref().map(|(_, row)| row.id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_event.insert(db).await {
        Ok(model) => Ok(CreateEventOutcome::Created(model)),
        Err(err) => {
            if let Some((key, row)) = stored_image {
                let _ = blob::Entity::delete_by_id(row.id).exec(db).await;
                let _ = blob_store.delete(&key).await;
            }
            Err(err.into())
        }
    }
}
