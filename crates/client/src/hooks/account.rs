use domain::{Account, Accounts, BulkDelete, CreateAccount, Deleted, Resource, UpdateAccount};

use super::MutationContext;
use crate::cache::keys;
use crate::error::ClientResult;
use crate::reducers;
use crate::sanitize::{sanitize_id, Sanitize};

pub struct AccountMutations<'a> {
    ctx: &'a MutationContext,
}

impl<'a> AccountMutations<'a> {
    pub(super) fn new(ctx: &'a MutationContext) -> Self {
        Self { ctx }
    }

    pub async fn create(&self, values: CreateAccount) -> ClientResult<Account> {
        let ctx = self.ctx;
        ctx.run(Resource::Accounts, async move {
            let created = ctx.api.create_account(values.sanitized()?).await?;

            ctx.cache.cancel_queries(&keys::accounts()).await;
            ctx.cache
                .set_query_data(&keys::accounts(), |old: Option<Accounts>| {
                    reducers::append(old, created.clone())
                })
                .await;
            Ok(created)
        })
        .await
    }

    pub async fn update(&self, values: UpdateAccount) -> ClientResult<Account> {
        let ctx = self.ctx;
        ctx.run(Resource::Accounts, async move {
            let updated = ctx.api.update_account(values.sanitized()?).await?;
            let item_key = keys::account(&updated.id);

            ctx.cache.cancel_queries(&keys::accounts()).await;
            ctx.cache.cancel_queries(&item_key).await;

            let merged = ctx
                .cache
                .set_query_data(&item_key, |old: Option<Account>| {
                    reducers::merge_item(old, updated.clone())
                })
                .await
                .unwrap_or_else(|| updated.clone());
            ctx.cache
                .set_query_data(&keys::accounts(), |old: Option<Accounts>| {
                    reducers::replace_by_id(old, merged.clone())
                })
                .await;
            Ok(merged)
        })
        .await
    }

    /// Delete an account; resolves to the accounts the server kept.
    pub async fn delete(&self, id: &str) -> ClientResult<Accounts> {
        let ctx = self.ctx;
        ctx.run(Resource::Accounts, async move {
            let id = sanitize_id(id)?;
            let remaining = ctx.api.delete_account(&id).await?;

            ctx.cache.cancel_queries(&keys::accounts()).await;
            ctx.cache
                .set_query_data(&keys::accounts(), |old: Option<Accounts>| {
                    reducers::remove_by_id(old, &id)
                })
                .await;
            Ok(remaining)
        })
        .await
    }

    pub async fn bulk_delete(&self, ids: Vec<String>) -> ClientResult<Deleted> {
        let ctx = self.ctx;
        ctx.run(Resource::Accounts, async move {
            let payload = BulkDelete { ids }.sanitized()?;
            let deleted = ctx.api.bulk_delete_accounts(payload.ids).await?;

            ctx.cache.cancel_queries(&keys::accounts()).await;
            ctx.cache
                .set_query_data(&keys::accounts(), |old: Option<Accounts>| {
                    reducers::remove_many(old, &deleted.ids)
                })
                .await;
            Ok(deleted)
        })
        .await
    }
}
