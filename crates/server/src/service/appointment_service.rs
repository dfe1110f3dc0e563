//! Appointment service.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    Appointment, AppointmentResponse, Appointments, CreateAppointment, Deleted,
    UpdateAppointment, COLLECTION_APPOINTMENTS,
};

use crate::store::{Collection, DocumentStore};

/// Appointment service trait for dependency injection.
#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn list(&self) -> AppResult<Appointments>;

    async fn get(&self, id: &str) -> AppResult<AppointmentResponse>;

    async fn create(&self, payload: CreateAppointment) -> AppResult<AppointmentResponse>;

    async fn update(&self, payload: UpdateAppointment) -> AppResult<AppointmentResponse>;

    async fn delete(&self, id: &str) -> AppResult<Deleted>;
}

/// Concrete implementation of AppointmentService over the document store.
pub struct AppointmentManager {
    appointments: Collection<Appointment>,
}

impl AppointmentManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            appointments: Collection::new(store, COLLECTION_APPOINTMENTS),
        }
    }
}

#[async_trait]
impl AppointmentService for AppointmentManager {
    async fn list(&self) -> AppResult<Appointments> {
        let appointments = self.appointments.all().await?;
        Ok(Appointments {
            appointments: appointments.into_iter().map(AppointmentResponse::from).collect(),
        })
    }

    async fn get(&self, id: &str) -> AppResult<AppointmentResponse> {
        Ok(self.appointments.require(id).await?.into())
    }

    async fn create(&self, payload: CreateAppointment) -> AppResult<AppointmentResponse> {
        let appointment = self.appointments.insert(payload.into_fields()).await?;
        info!("Created appointment {}", appointment.id);
        Ok(appointment.into())
    }

    async fn update(&self, payload: UpdateAppointment) -> AppResult<AppointmentResponse> {
        let id = payload
            .id
            .as_deref()
            .ok_or_else(|| AppError::MissingFields(vec!["id"]))?;

        let appointment = self.appointments.patch(id, payload.to_patch()).await?;
        info!("Updated appointment {}", id);
        Ok(appointment.into())
    }

    async fn delete(&self, id: &str) -> AppResult<Deleted> {
        self.appointments.remove(id).await?;
        info!("Deleted appointment {}", id);
        Ok(Deleted {
            ids: vec![id.to_string()],
        })
    }
}
