//! Account handlers.
//!
//! Creating and deleting accounts needs the `manage_accounts` capability.
//! Anyone may update their own account, but only that capability allows
//! touching other accounts or changing a role.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};

use common::AppResult;
use domain::{Account, Accounts, BulkDelete, CreateAccount, Deleted, UpdateAccount};

use super::{IdQuery, ListQuery};
use crate::extractors::ValidatedJson;
use crate::middleware::{require_capability, CurrentSession};
use crate::state::AppState;

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all", get(list_accounts))
        .route("/get", get(get_account))
        .route("/create", post(create_account))
        .route("/update", patch(update_account))
        .route("/delete", delete(delete_account))
        .route("/bulk-delete", post(bulk_delete_accounts))
}

/// List accounts
#[utoipa::path(
    get,
    path = "/api/auth/get-all",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Accounts", body = Accounts),
        (status = 400, description = "Missing session")
    )
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Accounts>> {
    let needle = query
        .query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    Ok(Json(state.accounts.list(needle.as_deref()).await?))
}

#[utoipa::path(
    get,
    path = "/api/auth/get",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Account", body = Account),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Account>> {
    let id = query.require()?;
    Ok(Json(state.accounts.get(&id).await?))
}

/// Create an account (admin only)
#[utoipa::path(
    post,
    path = "/api/auth/create",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = CreateAccount,
    responses(
        (status = 200, description = "Created account", body = Account),
        (status = 400, description = "Missing session or required fields"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn create_account(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccount>,
) -> AppResult<Json<Account>> {
    require_capability(&session, |c| c.manage_accounts)?;
    Ok(Json(state.accounts.create(payload).await?))
}

/// Update an account (own account, or any account for admins)
#[utoipa::path(
    patch,
    path = "/api/auth/update",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 403, description = "Forbidden - Can only update own profile unless admin"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update_account(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateAccount>,
) -> AppResult<Json<Account>> {
    let own = payload.id.as_deref().is_some_and(|id| session.owns(id));
    if !own || payload.role.is_some() {
        require_capability(&session, |c| c.manage_accounts)?;
    }

    Ok(Json(state.accounts.update(payload).await?))
}

/// Delete an account (admin only)
#[utoipa::path(
    delete,
    path = "/api/auth/delete",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Remaining accounts", body = Accounts),
        (status = 400, description = "No ID provided"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Accounts>> {
    let id = query.require()?;
    require_capability(&session, |c| c.manage_accounts)?;
    Ok(Json(state.accounts.delete(&id).await?))
}

/// Delete several accounts (admin only)
#[utoipa::path(
    post,
    path = "/api/auth/bulk-delete",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = BulkDelete,
    responses(
        (status = 200, description = "Ids actually deleted", body = Deleted),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn bulk_delete_accounts(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkDelete>,
) -> AppResult<Json<Deleted>> {
    require_capability(&session, |c| c.manage_accounts)?;
    Ok(Json(state.accounts.bulk_delete(&payload.ids).await?))
}
