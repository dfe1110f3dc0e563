//! Postgres-backed document store.
//!
//! All collections share the `documents` table; fields live in a `jsonb`
//! column and equality lookups compare `data -> field` against a jsonb value.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, Statement,
};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult};

use super::document::{Document, DocumentStore};
use super::entities::document::{self, ActiveModel, Entity as DocumentEntity};

pub struct SeaDocumentStore {
    db: DatabaseConnection,
}

impl SeaDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, collection: &str, id: &str) -> AppResult<Option<document::Model>> {
        DocumentEntity::find_by_id(id.to_string())
            .filter(document::Column::Collection.eq(collection))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl DocumentStore for SeaDocumentStore {
    async fn insert(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Document> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            collection: Set(collection.to_string()),
            data: Set(Value::Object(fields)),
            created_at: Set(Some(chrono::Utc::now())),
            updated_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        debug!("Inserted {}/{}", collection, model.id);
        Ok(Document::from(model))
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        Ok(self.find_model(collection, id).await?.map(Document::from))
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let models = DocumentEntity::find()
            .filter(document::Column::Collection.eq(collection))
            .order_by_asc(document::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> AppResult<Vec<Document>> {
        let models = DocumentEntity::find()
            .filter(document::Column::Collection.eq(collection))
            .filter(Expr::cust_with_values(
                "data -> ? = ?::jsonb",
                [
                    sea_orm::Value::from(field.to_string()),
                    sea_orm::Value::from(value.to_string()),
                ],
            ))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> AppResult<Option<Document>> {
        let Some(model) = self.find_model(collection, id).await? else {
            return Ok(None);
        };

        let mut data = match model.data.clone() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        data.extend(patch);

        let mut active: ActiveModel = model.into();
        active.data = Set(Value::Object(data));
        active.updated_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        debug!("Updated {}/{}", collection, id);
        Ok(Some(Document::from(model)))
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<bool> {
        let result = DocumentEntity::delete_many()
            .filter(document::Column::Id.eq(id))
            .filter(document::Column::Collection.eq(collection))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
