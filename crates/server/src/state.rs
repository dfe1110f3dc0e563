//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::SessionKeys;
use crate::service::{
    AccountManager, AccountService, AppointmentManager, AppointmentService, PaymentManager,
    PaymentService, PropertyManager, PropertyService,
};
use crate::store::{DocumentStore, KeyValueStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub kv: KeyValueStore,
    pub sessions: SessionKeys,
    pub properties: Arc<dyn PropertyService>,
    pub appointments: Arc<dyn AppointmentService>,
    pub payments: Arc<dyn PaymentService>,
    pub accounts: Arc<dyn AccountService>,
    pub config: ServerConfig,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(store: Arc<dyn DocumentStore>, kv: KeyValueStore, config: ServerConfig) -> Self {
        Self {
            sessions: SessionKeys::new(&config.session),
            properties: Arc::new(PropertyManager::new(store.clone())),
            appointments: Arc::new(AppointmentManager::new(store.clone())),
            payments: Arc::new(PaymentManager::new(store.clone())),
            accounts: Arc::new(AccountManager::new(kv.clone())),
            store,
            kv,
            config,
        }
    }
}
