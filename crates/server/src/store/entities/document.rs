//! Document row entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::{Map, Value};

use crate::store::Document;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub collection: String,
    pub data: Json,
    /// NULL until the store stamps it
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database row to a store document
impl From<Model> for Document {
    fn from(model: Model) -> Self {
        let fields = match model.data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Document {
            id: model.id,
            fields,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
