use domain::{
    BulkDelete, CreateProperty, Deleted, Properties, PropertyResponse, Resource, UpdateProperty,
};

use super::MutationContext;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::reducers;
use crate::sanitize::{sanitize_id, Sanitize};

pub struct PropertyMutations<'a> {
    ctx: &'a MutationContext,
}

impl<'a> PropertyMutations<'a> {
    pub(super) fn new(ctx: &'a MutationContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, values: CreateProperty) -> ClientResult<PropertyResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Properties, async move {
            let created = ctx.api.create_property(values.sanitized()?).await?;

            ctx.cache.cancel_queries(&keys::properties()).await;
            ctx.cache
                .set_query_data(&keys::properties(), |old: Option<Properties>| {
                    reducers::append(old, created.clone())
                })
                .await;
            Ok(created)
        })
        .await
    }

    /// Update a property; the item entry and its collection row end up equal.
    pub async fn update(&self, values: UpdateProperty) -> ClientResult<PropertyResponse> {
        let ctx = self.ctx;
        ctx.run(Resource::Properties, async move {
            let updated = ctx.api.update_property(values.sanitized()?).await?;
            let item_key = keys::property(&updated.id);

            ctx.cache.cancel_queries(&keys::properties()).await;
            ctx.cache.cancel_queries(&item_key).await;

            let merged = ctx
                .cache
                .set_query_data(&item_key, |old: Option<PropertyResponse>| {
                    reducers::merge_item(old, updated.clone())
                })
                .await
                .unwrap_or_else(|| updated.clone());
            ctx.cache
                .set_query_data(&keys::properties(), |old: Option<Properties>| {
                    reducers::replace_by_id(old, merged.clone())
                })
                .await;
            Ok(merged)
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Deleted> {
        let ctx = self.ctx;
        ctx.run(Resource::Properties, async move {
            let id = sanitize_id(id)?;
            let deleted = ctx.api.delete_property(&id).await?;

            ctx.cache.cancel_queries(&keys::properties()).await;
            ctx.cache
                .set_query_data(&keys::properties(), |old: Option<Properties>| {
                    reducers::remove_by_id(old, &id)
                })
                .await;
            Ok(deleted)
        })
        .await
    }

    pub async fn bulk_delete(&self, ids: Vec<String>) -> ClientResult<Deleted> {
        let ctx = self.ctx;
        ctx.run(Resource::Properties, async move {
            let payload = BulkDelete { ids }.sanitized()?;
            let deleted = ctx.api.bulk_delete_properties(payload.ids).await?;

            ctx.cache.cancel_queries(&keys::properties()).await;
            ctx.cache
                .set_query_data(&keys::properties(), |old: Option<Properties>| {
                    reducers::remove_many(old, &deleted.ids)
                })
                .await;
            Ok(deleted)
        })
        .await
    }
}
