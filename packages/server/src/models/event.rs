use chrono::{DateTime, Utc};

/// Maximum accepted cover image size in bytes (1 MiB).
pub const MAX_COVER_IMAGE_BYTES: u64 = 1024 * 1024;

/// Content types accepted for cover images.
pub const ACCEPTED_COVER_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A cover image uploaded alongside a new event.
pub struct CoverImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl CoverImageUpload {
    /// Declared content type, falling back to a guess from the filename.
    pub fn effective_content_type(&self) -> Option<String> {
        self.content_type.clone().or_else(|| {
            mime_guess::from_path(&self.filename)
                .first()
                .map(|m| m.to_string())
        })
    }
}

/// Input to the create-event operation.
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub cover_image: Option<CoverImageUpload>,
}

/// Check every persistence invariant over an in-memory event.
///
/// All rules are evaluated, never short-circuited, so an input failing
/// several invariants reports all of them at once. Empty means valid.
pub fn validate_new_event(input: &NewEvent) -> Vec<String> {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push("Name can't be blank".to_string());
    }

    if let Some(image) = &input.cover_image {
        if image.data.len() as u64 > MAX_COVER_IMAGE_BYTES {
            errors.push("Cover image is too big".to_string());
        }

        let content_type = image.effective_content_type();
        let accepted = content_type
            .as_deref()
            .is_some_and(|ct| ACCEPTED_COVER_IMAGE_TYPES.contains(&ct));
        if !accepted {
            errors.push("Cover image must be a JPEG or PNG".to_string());
        }
    }

    errors
}
