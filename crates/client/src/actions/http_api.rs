//! [`Api`] over HTTP.

use async_trait::async_trait;
use reqwest::Method;

use domain::{
    Account, Accounts, AppointmentResponse, Appointments, BulkDelete, CreateAccount,
    CreateAppointment, CreatePayment, CreateProperty, Deleted, PaginationParams,
    PaymentResponse, Payments, Properties, PropertyResponse, UpdateAccount, UpdateAppointment,
    UpdatePayment, UpdateProperty,
};

use super::Api;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;

pub struct HttpApi {
    http: HttpClient,
}

impl HttpApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build from configuration with a session token.
    pub fn connect(config: &ClientConfig, session: impl Into<String>) -> ClientResult<Self> {
        Ok(Self::new(HttpClient::new(config)?.with_session(session)))
    }
}

fn id_query(id: &str) -> [(&'static str, String); 1] {
    [("id", id.to_string())]
}

#[async_trait]
impl Api for HttpApi {
    async fn get_properties(&self, params: &PaginationParams) -> ClientResult<Properties> {
        let mut query = vec![
            ("page", params.page.to_string()),
            ("limit", params.limit.to_string()),
        ];
        if let Some(q) = &params.query {
            query.push(("query", q.clone()));
        }
        self.http.get("property/get-all", &query).await
    }

    async fn get_property(&self, id: &str) -> ClientResult<PropertyResponse> {
        self.http.get("property/get", &id_query(id)).await
    }

    async fn create_property(&self, values: CreateProperty) -> ClientResult<PropertyResponse> {
        self.http.send_json(Method::POST, "property/create", &values).await
    }

    async fn update_property(&self, values: UpdateProperty) -> ClientResult<PropertyResponse> {
        self.http.send_json(Method::PATCH, "property/update", &values).await
    }

    async fn delete_property(&self, id: &str) -> ClientResult<Deleted> {
        self.http.delete("property/delete", &id_query(id)).await
    }

    async fn bulk_delete_properties(&self, ids: Vec<String>) -> ClientResult<Deleted> {
        self.http
            .send_json(Method::POST, "property/bulk-delete", &BulkDelete { ids })
            .await
    }

    async fn get_appointments(&self) -> ClientResult<Appointments> {
        self.http.get("appointment/get-all", &[]).await
    }

    async fn create_appointment(
        &self,
        values: CreateAppointment,
    ) -> ClientResult<AppointmentResponse> {
        self.http.send_json(Method::POST, "appointment/create", &values).await
    }

    async fn update_appointment(
        &self,
        values: UpdateAppointment,
    ) -> ClientResult<AppointmentResponse> {
        self.http.send_json(Method::PATCH, "appointment/update", &values).await
    }

    async fn delete_appointment(&self, id: &str) -> ClientResult<Deleted> {
        self.http.delete("appointment/delete", &id_query(id)).await
    }

    async fn get_payments(&self) -> ClientResult<Payments> {
        self.http.get("payment/get-all", &[]).await
    }

    async fn get_payment(&self, id: &str) -> ClientResult<PaymentResponse> {
        self.http.get("payment/get", &id_query(id)).await
    }

    async fn create_payment(&self, values: CreatePayment) -> ClientResult<PaymentResponse> {
        self.http.send_json(Method::POST, "payment/create", &values).await
    }

    async fn update_payment(&self, values: UpdatePayment) -> ClientResult<PaymentResponse> {
        self.http.send_json(Method::PATCH, "payment/update", &values).await
    }

    async fn delete_payment(&self, id: &str) -> ClientResult<Deleted> {
        self.http.delete("payment/delete", &id_query(id)).await
    }

    async fn get_accounts(&self) -> ClientResult<Accounts> {
        self.http.get("auth/get-all", &[]).await
    }

    async fn get_account(&self, id: &str) -> ClientResult<Account> {
        self.http.get("auth/get", &id_query(id)).await
    }

    async fn create_account(&self, values: CreateAccount) -> ClientResult<Account> {
        self.http.send_json(Method::POST, "auth/create", &values).await
    }

    async fn update_account(&self, values: UpdateAccount) -> ClientResult<Account> {
        self.http.send_json(Method::PATCH, "auth/update", &values).await
    }

    async fn delete_account(&self, id: &str) -> ClientResult<Accounts> {
        self.http.delete("auth/delete", &id_query(id)).await
    }

    async fn bulk_delete_accounts(&self, ids: Vec<String>) -> ClientResult<Deleted> {
        self.http
            .send_json(Method::POST, "auth/bulk-delete", &BulkDelete { ids })
            .await
    }
}
