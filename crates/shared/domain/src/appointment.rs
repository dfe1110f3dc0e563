//! Appointment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::property::to_field_map;
use crate::timestamp::ServerTimestamp;
use crate::validation::{filled, missing, RequiredFields};

/// Appointment as stored in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// Identifier of the account the appointment is booked for
    pub user: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub created_at: ServerTimestamp,
    #[serde(default)]
    pub updated_at: ServerTimestamp,
}

/// Appointment handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentResponse {
    pub id: String,
    pub user: String,
    pub date: DateTime<Utc>,
    /// Never null; a missing description is an empty string
    pub description: String,
    pub property: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            created_at: appointment.created_at.to_date_string(),
            updated_at: appointment.updated_at.to_date_string(),
            id: appointment.id,
            user: appointment.user,
            date: appointment.date,
            description: appointment.description.unwrap_or_default(),
            property: appointment.property,
        }
    }
}

/// Create appointment payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAppointment {
    #[validate(length(min = 1, max = 255, message = "User must be 1-255 characters"))]
    pub user: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<String>,
    pub property: Option<String>,
}

impl RequiredFields for CreateAppointment {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("user", filled(&self.user)), ("date", self.date.is_some())])
    }
}

impl CreateAppointment {
    pub fn into_fields(self) -> Map<String, Value> {
        to_field_map(&self)
    }
}

/// Update appointment payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAppointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "User must be 1-255 characters"))]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl RequiredFields for UpdateAppointment {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("id", filled(&self.id))])
    }
}

impl UpdateAppointment {
    pub fn to_patch(&self) -> Map<String, Value> {
        let mut fields = to_field_map(self);
        fields.remove("id");
        fields
    }
}
