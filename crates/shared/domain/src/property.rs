//! Property listing entity and its request payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::timestamp::ServerTimestamp;
use crate::validation::{filled, missing, RequiredFields};

/// Property as stored in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub category: String,
    /// Unique across all properties
    pub location: String,
    pub status: String,
    #[serde(default)]
    pub property_pics: Vec<String>,
    pub price: String,
    pub no_of_bedrooms: u32,
    pub no_of_bathrooms: u32,
    pub square_meter: u32,
    /// Account the property is assigned to
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub created_at: ServerTimestamp,
    #[serde(default)]
    pub updated_at: ServerTimestamp,
}

impl Property {
    /// Search haystack used by listing filters.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.category, &self.location, &self.status]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Property handed to the view layer, timestamps normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PropertyResponse {
    pub id: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub property_pics: Vec<String>,
    pub price: String,
    pub no_of_bedrooms: u32,
    pub no_of_bathrooms: u32,
    pub square_meter: u32,
    pub user: Option<String>,
    pub appointment_id: Option<String>,
    pub agent: Option<String>,
    /// RFC 3339 date string, null while the server has not assigned it
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            created_at: property.created_at.to_date_string(),
            updated_at: property.updated_at.to_date_string(),
            id: property.id,
            category: property.category,
            location: property.location,
            status: property.status,
            property_pics: property.property_pics,
            price: property.price,
            no_of_bedrooms: property.no_of_bedrooms,
            no_of_bathrooms: property.no_of_bathrooms,
            square_meter: property.square_meter,
            user: property.user,
            appointment_id: property.appointment_id,
            agent: property.agent,
        }
    }
}

/// Create property payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateProperty {
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    pub status: Option<String>,
    #[validate(length(min = 1, message = "At least one property picture is required"))]
    pub property_pics: Option<Vec<String>>,
    #[validate(length(min = 1, message = "Price cannot be empty"))]
    pub price: Option<String>,
    #[validate(range(max = 100, message = "Too many bedrooms"))]
    pub no_of_bedrooms: Option<u32>,
    #[validate(range(max = 100, message = "Too many bathrooms"))]
    pub no_of_bathrooms: Option<u32>,
    #[validate(range(min = 1, message = "Square meter must be positive"))]
    pub square_meter: Option<u32>,
    pub agent: Option<String>,
}

impl RequiredFields for CreateProperty {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[
            ("category", filled(&self.category)),
            ("location", filled(&self.location)),
            ("status", filled(&self.status)),
            ("property_pics", self.property_pics.is_some()),
            ("price", filled(&self.price)),
            ("no_of_bedrooms", self.no_of_bedrooms.is_some()),
            ("no_of_bathrooms", self.no_of_bathrooms.is_some()),
            ("square_meter", self.square_meter.is_some()),
        ])
    }
}

impl CreateProperty {
    /// Field map for a new document; `user` and `appointment_id` start empty.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = to_field_map(&self);
        fields.insert("user".into(), Value::Null);
        fields.insert("appointment_id".into(), Value::Null);
        fields
    }
}

/// Update property payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Status must be 1-50 characters"))]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_pics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Price cannot be empty"))]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100, message = "Too many bedrooms"))]
    pub no_of_bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 100, message = "Too many bathrooms"))]
    pub no_of_bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Square meter must be positive"))]
    pub square_meter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl RequiredFields for UpdateProperty {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("id", filled(&self.id))])
    }
}

impl UpdateProperty {
    /// Partial field map with absent fields and the id stripped.
    pub fn to_patch(&self) -> Map<String, Value> {
        let mut fields = to_field_map(self);
        fields.remove("id");
        fields
    }
}

/// Serialize a payload into a field map, dropping nulls.
pub(crate) fn to_field_map<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_property_lists_every_missing_field() {
        let payload = CreateProperty {
            category: Some("Condo".into()),
            location: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            payload.missing_fields(),
            vec![
                "location",
                "status",
                "property_pics",
                "price",
                "no_of_bedrooms",
                "no_of_bathrooms",
                "square_meter"
            ]
        );
    }

    #[test]
    fn test_update_patch_strips_absent_fields_and_id() {
        let payload = UpdateProperty {
            id: Some("p1".into()),
            price: Some("1,000,000".into()),
            ..Default::default()
        };
        let patch = payload.to_patch();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["price"], Value::String("1,000,000".into()));
    }

    #[test]
    fn test_create_fields_start_unassigned() {
        let fields = CreateProperty {
            category: Some("House".into()),
            ..Default::default()
        }
        .into_fields();
        assert_eq!(fields["user"], Value::Null);
        assert_eq!(fields["appointment_id"], Value::Null);
        assert!(!fields.contains_key("location"));
    }

    #[test]
    fn test_response_normalizes_pending_timestamps() {
        let property = Property {
            id: "p1".into(),
            category: "House".into(),
            location: "Cebu".into(),
            status: "available".into(),
            property_pics: vec![],
            price: "10".into(),
            no_of_bedrooms: 1,
            no_of_bathrooms: 1,
            square_meter: 40,
            user: None,
            appointment_id: None,
            agent: None,
            created_at: ServerTimestamp::Pending,
            updated_at: ServerTimestamp::Pending,
        };
        let response = PropertyResponse::from(property);
        assert_eq!(response.created_at, None);
        assert_eq!(response.updated_at, None);
    }
}
