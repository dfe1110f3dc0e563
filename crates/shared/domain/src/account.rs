//! Account entity and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::role::Role;
use crate::validation::{filled, missing, RequiredFields};

/// Account as kept in the `accounts` key-value entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl Account {
    /// Apply a partial update, ignoring absent fields.
    pub fn apply(&mut self, update: UpdateAccount) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(contact_number) = update.contact_number {
            self.contact_number = Some(contact_number);
        }
    }

    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Account creation payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAccount {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    #[validate(length(max = 255, message = "Address is too long"))]
    pub address: Option<String>,
    #[validate(length(min = 7, max = 20, message = "Contact number must be 7-20 characters"))]
    pub contact_number: Option<String>,
}

impl RequiredFields for CreateAccount {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[
            ("name", filled(&self.name)),
            ("email", filled(&self.email)),
            ("role", self.role.is_some()),
        ])
    }
}

/// Account update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// Only admins may change roles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "Address is too long"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Contact number must be 7-20 characters"))]
    pub contact_number: Option<String>,
}

impl RequiredFields for UpdateAccount {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("id", filled(&self.id))])
    }
}
