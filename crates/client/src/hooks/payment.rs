use domain::{CreatePayment, Deleted, PaymentResponse, Payments, Resource, UpdatePayment};

use super::MutationContext;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::reducers;
use crate::sanitize::{sanitize_id, Sanitize};

pub struct PaymentMutations<'a> {
    ctx: &'a MutationContext,
}

impl<'a> PaymentMutations<'a> {
    pub(super) fn new(ctx: &'a MutationContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, values: CreatePayment) -> ClientResult<PaymentResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Payments, async move {
            let created = ctx.api.create_payment(values.sanitized()?).await?;

            ctx.cache.cancel_queries(&keys::payments()).await;
            ctx.cache
                .set_query_data(&keys::payments(), |old: Option<Payments>| {
                    reducers::append(old, created.clone())
                })
                .await;
            Ok(created)
        })
        .await
    }

    pub async fn update(&self, values: UpdatePayment) -> ClientResult<PaymentResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Payments, async move {
            let updated = ctx.api.update_payment(values.sanitized()?).await?;
            let item_key = keys::payment(&updated.id);

            ctx.cache.cancel_queries(&keys::payments()).await;
            ctx.cache.cancel_queries(&item_key).await;

            let merged = ctx
                .cache
                .set_query_data(&item_key, |old: Option<PaymentResponse>| {
                    reducers::merge_item(old, updated.clone())
                })
                .await
                .unwrap_or_else(|| updated.clone());
            ctx.cache
                .set_query_data(&keys::payments(), |old: Option<Payments>| {
                    reducers::replace_by_id(old, merged.clone())
                })
                .await;
            Ok(merged)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Deleted> {
        let ctx = self.ctx;
        ctx.run(Resource::Payments, async move {
            let id = sanitize_id(id)?;
            let deleted = ctx.api.delete_payment(&id).await?;

            ctx.cache.cancel_queries(&keys::payments()).await;
            ctx.cache
                .set_query_data(&keys::payments(), |old: Option<Payments>| {
                    reducers::remove_by_id(old, &id)
                })
                .await;
            Ok(deleted)
        })
        .await
    }
}
