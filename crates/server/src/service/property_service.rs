//! Property service - listings, location uniqueness, partial updates.

use async_trait::async_trait;
use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, info};

use common::{AppError, AppResult};
use domain::{
    CreateProperty, Deleted, PaginationParams, Properties, Property, PropertyResponse,
    UpdateProperty, COLLECTION_PROPERTIES,
};

use crate::store::{Collection, DocumentStore};

const LOCATION_TAKEN: &str = "A property with this location";

/// Property service trait for dependency injection.
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Search and paginate properties
    async fn list(&self, params: &PaginationParams) -> AppResult<Properties>;

    async fn get(&self, id: &str) -> AppResult<PropertyResponse>;

    /// Create a property; its location must not be taken
    async fn create(&self, payload: CreateProperty) -> AppResult<PropertyResponse>;

    /// Apply the present fields; a changed location must not be taken
    async fn update(&self, payload: UpdateProperty) -> AppResult<PropertyResponse>;

    async fn delete(&self, id: &str) -> AppResult<Deleted>;

    async fn bulk_delete(&self, ids: &[String]) -> AppResult<Deleted>;
}

/// Concrete implementation of PropertyService over the document store.
pub struct PropertyManager {
    properties: Collection<Property>,
}

impl PropertyManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            properties: Collection::new(store, COLLECTION_PROPERTIES),
        }
    }

    // The lookup and the following write are separate store calls, so two
    // concurrent writers can both pass this check.
    async fn ensure_location_free(&self, location: &str) -> AppResult<()> {
        let existing = self
            .properties
            .find_by("location", &Value::String(location.to_string()))
            .await?;

        if existing.is_empty() {
            Ok(())
        } else {
            debug!("Location already taken: {}", location);
            Err(AppError::conflict(LOCATION_TAKEN))
        }
    }
}

#[async_trait]
impl PropertyService for PropertyManager {
    async fn list(&self, params: &PaginationParams) -> AppResult<Properties> {
        let mut properties = self.properties.all().await?;
        if let Some(needle) = params.needle() {
            properties.retain(|p| p.matches(&needle));
        }

        let (page, pagination) = params.paginate(properties);
        Ok(Properties {
            properties: page.into_iter().map(PropertyResponse::from).collect(),
            pagination: Some(pagination),
        })
    }

    async fn get(&self, id: &str) -> AppResult<PropertyResponse> {
        Ok(self.properties.require(id).await?.into())
    }

    async fn create(&self, payload: CreateProperty) -> AppResult<PropertyResponse> {
        if let Some(location) = payload.location.as_deref() {
            self.ensure_location_free(location).await?;
        }

        let property = self.properties.insert(payload.into_fields()).await?;
        info!("Created property {}", property.id);
        Ok(property.into())
    }

    async fn update(&self, payload: UpdateProperty) -> AppResult<PropertyResponse> {
        let id = payload
            .id
            .clone()
            .ok_or_else(|| AppError::MissingFields(vec!["id"]))?;

        if let Some(location) = payload.location.as_deref() {
            let current = self.properties.require(&id).await?;
            if current.location != location {
                self.ensure_location_free(location).await?;
            }
        }

        let property = self.properties.patch(&id, payload.to_patch()).await?;
        info!("Updated property {}", id);
        Ok(property.into())
    }

    async fn delete(&self, id: &str) -> AppResult<Deleted> {
        self.properties.remove(id).await?;
        info!("Deleted property {}", id);
        Ok(Deleted {
            ids: vec![id.to_string()],
        })
    }

    async fn bulk_delete(&self, ids: &[String]) -> AppResult<Deleted> {
        let ids = self.properties.remove_many(ids).await?;
        info!("Bulk deleted {} properties", ids.len());
        Ok(Deleted { ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::ServerTimestamp;
    use serde_json::{json, Map};

    use crate::store::{Document, MemoryDocumentStore, MockDocumentStore};

    fn property_fields(location: &str) -> Map<String, Value> {
        match json!({
            "category": "House",
            "location": location,
            "status": "available",
            "property_pics": ["a.jpg"],
            "price": "2500000",
            "no_of_bedrooms": 3,
            "no_of_bathrooms": 2,
            "square_meter": 120,
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn stored(id: &str, location: &str) -> Document {
        Document {
            id: id.to_string(),
            fields: property_fields(location),
            created_at: ServerTimestamp::Resolved(Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()),
            updated_at: ServerTimestamp::Pending,
        }
    }

    fn create_payload(location: &str) -> CreateProperty {
        CreateProperty {
            category: Some("House".into()),
            location: Some(location.into()),
            status: Some("available".into()),
            property_pics: Some(vec!["a.jpg".into()]),
            price: Some("2500000".into()),
            no_of_bedrooms: Some(3),
            no_of_bathrooms: Some(2),
            square_meter: Some(120),
            agent: None,
        }
    }

    #[tokio::test]
    async fn test_update_to_taken_location_conflicts_without_writing() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(Some(stored("p1", "Makati"))));
        store
            .expect_find_by_field()
            .times(1)
            .returning(|_, _, _| Ok(vec![stored("p2", "Taguig")]));
        store.expect_update().never();

        let service = PropertyManager::new(Arc::new(store));
        let result = service
            .update(UpdateProperty {
                id: Some("p1".into()),
                location: Some("Taguig".into()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_with_unchanged_location_skips_uniqueness_query() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .returning(|_, _| Ok(Some(stored("p1", "Makati"))));
        store.expect_find_by_field().never();
        store
            .expect_update()
            .times(1)
            .returning(|_, _, _| Ok(Some(stored("p1", "Makati"))));

        let service = PropertyManager::new(Arc::new(store));
        let result = service
            .update(UpdateProperty {
                id: Some("p1".into()),
                location: Some("Makati".into()),
                price: Some("3000000".into()),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_taken_location_never_inserts() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_by_field()
            .returning(|_, _, _| Ok(vec![stored("p2", "Pasig")]));
        store.expect_insert().never();

        let service = PropertyManager::new(Arc::new(store));
        let result = service.create(create_payload("Pasig")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let service = PropertyManager::new(Arc::new(MemoryDocumentStore::new()));
        let result = service
            .update(UpdateProperty {
                id: Some("missing".into()),
                price: Some("1".into()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_then_update_normalizes_timestamps() {
        let service = PropertyManager::new(Arc::new(MemoryDocumentStore::new()));

        let created = service.create(create_payload("Quezon City")).await.unwrap();
        assert!(created.created_at.is_some());
        assert_eq!(created.updated_at, None);
        assert_eq!(created.user, None);
        assert_eq!(created.appointment_id, None);

        let updated = service
            .update(UpdateProperty {
                id: Some(created.id.clone()),
                status: Some("sold".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.status, "sold");
        assert_eq!(updated.location, "Quezon City");
        let stamp = updated.updated_at.expect("updated_at is resolved");
        assert!(stamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_list_searches_case_insensitively_and_paginates() {
        let service = PropertyManager::new(Arc::new(MemoryDocumentStore::new()));
        for location in ["Cebu City", "Davao", "Lapu-Lapu, Cebu"] {
            service.create(create_payload(location)).await.unwrap();
        }

        let page = service
            .list(&PaginationParams::new(1, 1, Some("  CEBU ".into())))
            .await
            .unwrap();

        assert_eq!(page.properties.len(), 1);
        let meta = page.pagination.unwrap();
        assert_eq!(meta.total, 2);
        assert_eq!(meta.total_pages, 2);
    }

    #[tokio::test]
    async fn test_bulk_delete_reports_only_existing_ids() {
        let service = PropertyManager::new(Arc::new(MemoryDocumentStore::new()));
        let created = service.create(create_payload("Iloilo")).await.unwrap();

        let deleted = service
            .bulk_delete(&[created.id.clone(), "ghost".to_string()])
            .await
            .unwrap();

        assert_eq!(deleted.ids, vec![created.id]);
    }
}
