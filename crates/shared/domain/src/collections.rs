//! List envelopes exchanged between server and client.
//!
//! The client query cache stores these envelopes under collection keys, so
//! they expose their items through [`Listing`] for the cache reducers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::account::Account;
use crate::appointment::AppointmentResponse;
use crate::pagination::PaginationMeta;
use crate::payment::PaymentResponse;
use crate::property::PropertyResponse;
use crate::validation::{missing, RequiredFields};

/// Records with a store-assigned identity.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A cached collection of identified records.
pub trait Listing: Default {
    type Item: Identified + Clone;

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    fn from_items(items: Vec<Self::Item>) -> Self {
        let mut listing = Self::default();
        *listing.items_mut() = items;
        listing
    }
}

macro_rules! listing {
    ($envelope:ident, $field:ident, $item:ty) => {
        impl Identified for $item {
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl Listing for $envelope {
            type Item = $item;

            fn items(&self) -> &[$item] {
                &self.$field
            }

            fn items_mut(&mut self) -> &mut Vec<$item> {
                &mut self.$field
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Properties {
    pub properties: Vec<PropertyResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Accounts {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Appointments {
    pub appointments: Vec<AppointmentResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Payments {
    pub payments: Vec<PaymentResponse>,
}

listing!(Properties, properties, PropertyResponse);
listing!(Accounts, accounts, Account);
listing!(Appointments, appointments, AppointmentResponse);
listing!(Payments, payments, PaymentResponse);

/// Bulk delete payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkDelete {
    #[validate(length(min = 1, message = "At least one id is required"))]
    pub ids: Vec<String>,
}

impl RequiredFields for BulkDelete {
    fn missing_fields(&self) -> Vec<&'static str> {
        missing(&[("ids", !self.ids.is_empty())])
    }
}

/// Identifiers removed by a delete endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Deleted {
    pub ids: Vec<String>,
}
