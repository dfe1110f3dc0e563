//! Property handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};

use common::AppResult;
use domain::{
    BulkDelete, CreateProperty, Deleted, PaginationParams, Properties, PropertyResponse,
    UpdateProperty, DEFAULT_PAGE_NUMBER,
};

use super::{IdQuery, ListQuery};
use crate::extractors::ValidatedJson;
use crate::middleware::{require_capability, CurrentSession};
use crate::state::AppState;

/// Create property routes
pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all", get(list_properties))
        .route("/get", get(get_property))
        .route("/create", post(create_property))
        .route("/update", patch(update_property))
        .route("/delete", delete(delete_property))
        .route("/bulk-delete", post(bulk_delete_properties))
}

/// List properties with search and pagination
#[utoipa::path(
    get,
    path = "/api/property/get-all",
    tag = "Properties",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "Page of properties", body = Properties),
        (status = 400, description = "Missing session")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Properties>> {
    let params = PaginationParams::new(
        query.page.unwrap_or(DEFAULT_PAGE_NUMBER),
        query.limit.unwrap_or(state.config.default_page_size),
        query.query,
    );
    Ok(Json(state.properties.list(&params).await?))
}

/// Get a property by id
#[utoipa::path(
    get,
    path = "/api/property/get",
    tag = "Properties",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Property", body = PropertyResponse),
        (status = 400, description = "Missing session or id"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<PropertyResponse>> {
    let id = query.require()?;
    Ok(Json(state.properties.get(&id).await?))
}

/// Create a property
#[utoipa::path(
    post,
    path = "/api/property/create",
    tag = "Properties",
    security(("bearer_auth" = [])),
    request_body = CreateProperty,
    responses(
        (status = 200, description = "Created property", body = PropertyResponse),
        (status = 400, description = "Missing session or required fields"),
        (status = 409, description = "Location already taken"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn create_property(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProperty>,
) -> AppResult<Json<PropertyResponse>> {
    require_capability(&session, |c| c.manage_properties)?;
    Ok(Json(state.properties.create(payload).await?))
}

/// Update the present fields of a property
#[utoipa::path(
    patch,
    path = "/api/property/update",
    tag = "Properties",
    security(("bearer_auth" = [])),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Updated property", body = PropertyResponse),
        (status = 400, description = "Missing session or id"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Location already taken"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn update_property(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProperty>,
) -> AppResult<Json<PropertyResponse>> {
    require_capability(&session, |c| c.manage_properties)?;
    Ok(Json(state.properties.update(payload).await?))
}

/// Delete a property
#[utoipa::path(
    delete,
    path = "/api/property/delete",
    tag = "Properties",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Deleted id", body = Deleted),
        (status = 404, description = "Property not found"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn delete_property(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Deleted>> {
    require_capability(&session, |c| c.manage_properties)?;
    let id = query.require()?;
    Ok(Json(state.properties.delete(&id).await?))
}

/// Delete several properties
#[utoipa::path(
    post,
    path = "/api/property/bulk-delete",
    tag = "Properties",
    security(("bearer_auth" = [])),
    request_body = BulkDelete,
    responses(
        (status = 200, description = "Ids actually deleted", body = Deleted),
        (status = 400, description = "No ids given"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn bulk_delete_properties(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkDelete>,
) -> AppResult<Json<Deleted>> {
    require_capability(&session, |c| c.manage_properties)?;
    Ok(Json(state.properties.bulk_delete(&payload.ids).await?))
}
