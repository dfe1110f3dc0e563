//! Payment record handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};

use common::AppResult;
use domain::{CreatePayment, Deleted, PaymentResponse, Payments, UpdatePayment};

use super::IdQuery;
use crate::extractors::ValidatedJson;
use crate::middleware::{require_capability, CurrentSession};
use crate::state::AppState;

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all", get(list_payments))
        .route("/get", get(get_payment))
        .route("/create", post(create_payment))
        .route("/update", patch(update_payment))
        .route("/delete", delete(delete_payment))
}

/// List every payment record
#[utoipa::path(
    get,
    path = "/api/payment/get-all",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payment records", body = Payments),
        (status = 400, description = "Missing session")
    )
)]
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Payments>> {
    Ok(Json(state.payments.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/payment/get",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Payment", body = PaymentResponse),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<PaymentResponse>> {
    let id = query.require()?;
    Ok(Json(state.payments.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/api/payment/create",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePayment,
    responses(
        (status = 200, description = "Created payment", body = PaymentResponse),
        (status = 400, description = "Missing session or required fields"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn create_payment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePayment>,
) -> AppResult<Json<PaymentResponse>> {
    require_capability(&session, |c| c.manage_payments)?;
    Ok(Json(state.payments.create(payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/payment/update",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = UpdatePayment,
    responses(
        (status = 200, description = "Updated payment", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn update_payment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdatePayment>,
) -> AppResult<Json<PaymentResponse>> {
    require_capability(&session, |c| c.manage_payments)?;
    Ok(Json(state.payments.update(payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/payment/delete",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Deleted id", body = Deleted),
        (status = 404, description = "Payment not found"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn delete_payment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Deleted>> {
    require_capability(&session, |c| c.manage_payments)?;
    let id = query.require()?;
    Ok(Json(state.payments.delete(&id).await?))
}
