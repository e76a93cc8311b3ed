use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blob")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Opaque storage key addressing the bytes in the blob store.
    #[sea_orm(unique)]
    pub key: String,

    /// Original upload filename.
    pub filename: String,

    /// Declared MIME content type.
    pub content_type: Option<String>,

    /// Purposefully denormalized so responses never stat the store.
    pub byte_size: i64,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
