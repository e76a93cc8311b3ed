use std::io::Read;
use std::sync::Arc;

use async_graphql::{Context, Object, Result, Upload};
use chrono::{DateTime, Utc};
use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::handlers::event::{CreateEventOutcome, create_event};
use crate::models::event::{CoverImageUpload, NewEvent};

use super::types::{AddEventPayload, EventObject};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an event with an uploaded cover image.
    ///
    /// Validation failures come back in `errors`; the event is only
    /// persisted, and the image only stored, when every check passes.
    async fn add_event(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
        start_date: DateTime<Utc>,
        cover_image: Upload,
    ) -> Result<AddEventPayload> {
        let db = ctx.data::<DatabaseConnection>()?;
        let blob_store = ctx.data::<Arc<dyn BlobStore>>()?;

        let upload = cover_image
            .value(ctx)
            .map_err(|e| AppError::Validation(format!("Unreadable upload: {e}")))?;

        let filename = upload.filename.clone();
        let content_type = upload.content_type.clone();
        let mut data = Vec::new();
        upload
            .into_read()
            .read_to_end(&mut data)
            .map_err(|e| AppError::Validation(format!("Unreadable upload: {e}")))?;

        let input = NewEvent {
            name,
            description,
            start_date,
            cover_image: Some(CoverImageUpload {
                filename,
                content_type,
                data,
            }),
        };

        match create_event(db, blob_store.as_ref(), input).await? {
            CreateEventOutcome::Created(model) => Ok(AddEventPayload {
                event: Some(EventObject::new(model)),
                errors: None,
            }),
            CreateEventOutcome::Invalid(messages) => Ok(AddEventPayload {
                event: None,
                errors: Some(messages),
            }),
        }
    }
}
