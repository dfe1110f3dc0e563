//! Prefetch descriptors: a query key paired with the fetch that fills it.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use domain::{Accounts, Appointments, PaginationParams, PaymentResponse, Payments, Properties, PropertyResponse};

use super::Api;
use crate::cache::{keys, QueryKey};
use crate::error::ClientResult;

type QueryFn<T> = Arc<dyn Fn() -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;

pub struct QueryOptions<T> {
    pub key: QueryKey,
    /// Disabled descriptors are never fetched
    pub enabled: bool,
    fetch: QueryFn<T>,
}

impl<T> Clone for QueryOptions<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            enabled: self.enabled,
            fetch: self.fetch.clone(),
        }
    }
}

impl<T> QueryOptions<T> {
    pub fn new<F>(key: QueryKey, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, ClientResult<T>> + Send + Sync + 'static,
    {
        Self {
            key,
            enabled: true,
            fetch: Arc::new(fetch),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn fetch(&self) -> BoxFuture<'static, ClientResult<T>> {
        (self.fetch)()
    }
}

pub fn accounts_query(api: Arc<dyn Api>) -> QueryOptions<Accounts> {
    QueryOptions::new(keys::accounts(), move || {
        let api = api.clone();
        async move { api.get_accounts().await }.boxed()
    })
}

pub fn appointments_query(api: Arc<dyn Api>) -> QueryOptions<Appointments> {
    QueryOptions::new(keys::appointments(), move || {
        let api = api.clone();
        async move { api.get_appointments().await }.boxed()
    })
}

pub fn payments_query(api: Arc<dyn Api>) -> QueryOptions<Payments> {
    QueryOptions::new(keys::payments(), move || {
        let api = api.clone();
        async move { api.get_payments().await }.boxed()
    })
}

/// Disabled while `id` is blank.
pub fn payment_query(api: Arc<dyn Api>, id: &str) -> QueryOptions<PaymentResponse> {
    let owned = id.to_string();
    QueryOptions::new(keys::payment(id), move || {
        let api = api.clone();
        let id = owned.clone();
        async move { api.get_payment(&id).await }.boxed()
    })
    .enabled(!id.trim().is_empty())
}

/// Every page shares the `["properties"]` key.
pub fn properties_query(api: Arc<dyn Api>, params: PaginationParams) -> QueryOptions<Properties> {
    QueryOptions::new(keys::properties(), move || {
        let api = api.clone();
        let params = params.clone();
        async move { api.get_properties(&params).await }.boxed()
    })
}

pub fn property_query(api: Arc<dyn Api>, id: &str) -> QueryOptions<PropertyResponse> {
    let owned = id.to_string();
    QueryOptions::new(keys::property(id), move || {
        let api = api.clone();
        let id = owned.clone();
        async move { api.get_property(&id).await }.boxed()
    })
    .enabled(!id.trim().is_empty())
}
