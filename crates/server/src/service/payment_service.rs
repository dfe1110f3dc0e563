//! Payment record service.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    CreatePayment, Deleted, Payment, PaymentResponse, Payments, UpdatePayment,
    COLLECTION_PAYMENTS,
};

use crate::store::{Collection, DocumentStore};

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn list(&self) -> AppResult<Payments>;

    async fn get(&self, id: &str) -> AppResult<PaymentResponse>;

    async fn create(&self, payload: CreatePayment) -> AppResult<PaymentResponse>;

    async fn update(&self, payload: UpdatePayment) -> AppResult<PaymentResponse>;

    async fn delete(&self, id: &str) -> AppResult<Deleted>;
}

/// Concrete implementation of PaymentService over the document store.
pub struct PaymentManager {
    payments: Collection<Payment>,
}

impl PaymentManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            payments: Collection::new(store, COLLECTION_PAYMENTS),
        }
    }
}

#[async_trait]
impl PaymentService for PaymentManager {
    async fn list(&self) -> AppResult<Payments> {
        let payments = self.payments.all().await?;
        Ok(Payments {
            payments: payments.into_iter().map(PaymentResponse::from).collect(),
        })
    }

    async fn get(&self, id: &str) -> AppResult<PaymentResponse> {
        Ok(self.payments.require(id).await?.into())
    }

    async fn create(&self, payload: CreatePayment) -> AppResult<PaymentResponse> {
        let payment = self.payments.insert(payload.into_fields()).await?;
        info!("Created payment {}", payment.id);
        Ok(payment.into())
    }

    async fn update(&self, payload: UpdatePayment) -> AppResult<PaymentResponse> {
        let id = payload
            .id
            .as_deref()
            .ok_or_else(|| AppError::MissingFields(vec!["id"]))?;

        let payment = self.payments.patch(id, payload.to_patch()).await?;
        info!("Updated payment {}", id);
        Ok(payment.into())
    }

    async fn delete(&self, id: &str) -> AppResult<Deleted> {
        self.payments.remove(id).await?;
        info!("Deleted payment {}", id);
        Ok(Deleted {
            ids: vec![id.to_string()],
        })
    }
}
