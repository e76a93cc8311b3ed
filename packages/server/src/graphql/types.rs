use async_graphql::{Context, ID, Object, SimpleObject};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::{blob, event};

use super::UrlContext;

/// Read-side projection of a persisted event.
pub struct EventObject {
    model: event::Model,
}

impl EventObject {
    pub fn new(model: event::Model) -> Self {
        Self { model }
    }
}

#[Object(name = "Event")]
impl EventObject {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    async fn description(&self) -> Option<&str> {
        self.model.description.as_deref()
    }

    async fn start_date(&self) -> DateTime<Utc> {
        self.model.start_date
    }

    /// URL of the attached cover image.
    ///
    /// Null when no image is attached, and also when the referenced
    /// blob row can no longer be loaded: a dangling image reference
    /// must not fail the rest of the response.
    async fn cover_image_url(&self, ctx: &Context<'_>) -> Option<String> {
        let blob_id = self.model.cover_image_id?;

        let db = ctx.data_opt::<DatabaseConnection>()?;
        let blob_row = match blob::Entity::find_by_id(blob_id).one(db).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                tracing::warn!(
                    event_id = self.model.id,
                    %blob_id,
                    "cover image blob row is missing"
                );
                return None;
            }
            Err(err) => {
                tracing::warn!(
                    event_id = self.model.id,
                    %blob_id,
                    "failed to load cover image blob: {err}"
                );
                return None;
            }
        };

        let urls = ctx
            .data_opt::<UrlContext>()
            .cloned()
            .unwrap_or_else(|| UrlContext::new(None));
        Some(urls.blob_url(&blob_row))
    }
}

/// Mutation result: exactly one of `event` / `errors` is populated.
#[derive(SimpleObject)]
pub struct AddEventPayload {
    /// The persisted event, when every invariant held.
    pub event: Option<EventObject>,
    /// Human-readable validation messages, one per violated invariant.
    pub errors: Option<Vec<String>>,
}
