//! Action layer: one typed call per server endpoint.

mod http_api;
mod prefetch;

pub use http_api::HttpApi;
pub use prefetch::{
    accounts_query, appointments_query, payment_query, payments_query, properties_query,
    property_query, QueryOptions,
};

use async_trait::async_trait;

use domain::{
    Account, Accounts, AppointmentResponse, Appointments, CreateAccount, CreateAppointment,
    CreatePayment, CreateProperty, Deleted, PaginationParams, PaymentResponse, Payments,
    Properties, PropertyResponse, UpdateAccount, UpdateAppointment, UpdatePayment,
    UpdateProperty,
};

use crate::error::ClientResult;

#[cfg(test)]
use mockall::automock;

/// Server actions trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Api: Send + Sync {
    // Properties
    async fn get_properties(&self, params: &PaginationParams) -> ClientResult<Properties>;
    async fn get_property(&self, id: &str) -> ClientResult<PropertyResponse>;
    async fn create_property(&self, values: CreateProperty) -> ClientResult<PropertyResponse>;
    async fn update_property(&self, values: UpdateProperty) -> ClientResult<PropertyResponse>;
    async fn delete_property(&self, id: &str) -> ClientResult<Deleted>;
    async fn bulk_delete_properties(&self, ids: Vec<String>) -> ClientResult<Deleted>;

    // Appointments
    async fn get_appointments(&self) -> ClientResult<Appointments>;
    async fn create_appointment(
        &self,
        values: CreateAppointment,
    ) -> ClientResult<AppointmentResponse>;
    async fn update_appointment(
        &self,
        values: UpdateAppointment,
    ) -> ClientResult<AppointmentResponse>;
    async fn delete_appointment(&self, id: &str) -> ClientResult<Deleted>;

    // Payments
    async fn get_payments(&self) -> ClientResult<Payments>;
    async fn get_payment(&self, id: &str) -> ClientResult<PaymentResponse>;
    async fn create_payment(&self, values: CreatePayment) -> ClientResult<PaymentResponse>;
    async fn update_payment(&self, values: UpdatePayment) -> ClientResult<PaymentResponse>;
    async fn delete_payment(&self, id: &str) -> ClientResult<Deleted>;

    // Accounts
    async fn get_accounts(&self) -> ClientResult<Accounts>;
    async fn get_account(&self, id: &str) -> ClientResult<Account>;
    async fn create_account(&self, values: CreateAccount) -> ClientResult<Account>;
    async fn update_account(&self, values: UpdateAccount) -> ClientResult<Account>;
    /// Returns the accounts left after the delete
    async fn delete_account(&self, id: &str) -> ClientResult<Accounts>;
    async fn bulk_delete_accounts(&self, ids: Vec<String>) -> ClientResult<Deleted>;
}
