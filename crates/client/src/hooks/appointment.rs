use domain::{
    AppointmentResponse, Appointments, CreateAppointment, Deleted, Resource, UpdateAppointment,
};

use super::MutationContext;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::reducers;
use crate::sanitize::{sanitize_id, Sanitize};

/// Appointments are only cached as a collection.
pub struct AppointmentMutations<'a> {
    ctx: &'a MutationContext,
}

impl<'a> AppointmentMutations<'a> {
    pub(super) fn new(ctx: &'a MutationContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, values: CreateAppointment) -> ClientResult<AppointmentResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Appointments, async move {
            let created = ctx.api.create_appointment(values.sanitized()?).await?;

            ctx.cache.cancel_queries(&keys::appointments()).await;
            ctx.cache
                .set_query_data(&keys::appointments(), |old: Option<Appointments>| {
                    reducers::append(old, created.clone())
                })
                .await;
            Ok(created)
        })
        .await
    }

    pub async fn update(&self, values: UpdateAppointment) -> ClientResult<AppointmentResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Appointments, async move {
            let updated = ctx.api.update_appointment(values.sanitized()?).await?;

            ctx.cache.cancel_queries(&keys::appointments()).await;
            ctx.cache
                .set_query_data(&keys::appointments(), |old: Option<Appointments>| {
                    reducers::replace_by_id(old, updated.clone())
                })
                .await;
            Ok(updated)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Deleted> {
        let ctx = self.ctx;
        ctx.run(Resource::Appointments, async move {
            let id = sanitize_id(id)?;
            let deleted = ctx.api.delete_appointment(&id).await?;

            ctx.cache.cancel_queries(&keys::appointments()).await;
            ctx.cache
                .set_query_data(&keys::appointments(), |old: Option<Appointments>| {
                    reducers::remove_by_id(old, &id)
                })
                .await;
            Ok(deleted)
        })
        .await
    }
}
