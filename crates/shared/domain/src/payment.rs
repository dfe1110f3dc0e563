//! Payment record entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::property::to_field_map;
use crate::timestamp::ServerTimestamp;
use crate::validation::{filled, missing, RequiredFields};

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Payment as stored in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    /// Property the payment is for
    pub property: String,
    #[serde(default)]
    pub appointment: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    pub amount: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: ServerTimestamp,
    #[serde(default)]
    pub updated_at: ServerTimestamp,
}

/// Payment handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PaymentResponse {
    pub id: String,
    pub property: String,
    pub appointment: Option<String>,
    pub user: Option<String>,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            created_at: payment.created_at.to_date_string(),
            updated_at: payment.updated_at.to_date_string(),
            id: payment.id,
            property: payment.property,
            appointment: payment.appointment,
            user: payment.user,
            amount: payment.amount,
            status: payment.status,
        }
    }
}

/// Create payment payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePayment {
    #[validate(length(min = 1, message = "Property cannot be empty"))]
    pub property: Option<String>,
    pub appointment: Option<String>,
    pub user: Option<String>,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
    pub status: Option<PaymentStatus>,
}

impl RequiredFields for CreatePayment {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[
            ("property", filled(&self.property)),
            ("amount", self.amount.is_some()),
            ("status", self.status.is_some()),
        ])
    }
}

impl CreatePayment {
    pub fn into_fields(self) -> Map<String, Value> {
        to_field_map(&self)
    }
}

/// Update payment payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePayment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
}

impl RequiredFields for UpdatePayment {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("id", filled(&self.id))])
    }
}

impl UpdatePayment {
    pub fn to_patch(&self) -> Map<String, Value> {
        let mut fields = to_field_map(self);
        fields.remove("id");
        fields
    }
}
