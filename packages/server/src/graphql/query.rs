use async_graphql::{Context, ID, Object, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::entity::event;
use crate::error::AppError;

use super::types::EventObject;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All events, oldest first.
    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<EventObject>> {
        let db = ctx.data::<DatabaseConnection>()?;

        let rows = event::Entity::find()
            .order_by_asc(event::Column::Id)
            .all(db)
            .await
            .map_err(AppError::from)?;

        Ok(rows.into_iter().map(EventObject::new).collect())
    }

    /// A single event by id.
    async fn event(&self, ctx: &Context<'_>, id: ID) -> Result<Option<EventObject>> {
        let id: i32 = id
            .parse()
            .map_err(|_| AppError::Validation("Invalid event id".into()))?;

        let db = ctx.data::<DatabaseConnection>()?;
        let row = event::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(EventObject::new))
    }
}
