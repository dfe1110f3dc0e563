//! Appointment handlers.

use axum::{
    extract::{Extension, Query, State},
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};

use common::AppResult;
use domain::{AppointmentResponse, Appointments, CreateAppointment, Deleted, UpdateAppointment};

use super::IdQuery;
use crate::extractors::ValidatedJson;
use crate::middleware::{require_capability, CurrentSession};
use crate::state::AppState;

/// Create appointment routes
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all", get(list_appointments))
        .route("/get", get(get_appointment))
        .route("/create", post(create_appointment))
        .route("/update", patch(update_appointment))
        .route("/delete", delete(delete_appointment))
}

/// List every appointment
#[utoipa::path(
    get,
    path = "/api/appointment/get-all",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All appointments", body = Appointments),
        (status = 400, description = "Missing session")
    )
)]
pub async fn list_appointments(State(state): State<AppState>) -> AppResult<Json<Appointments>> {
    Ok(Json(state.appointments.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/appointment/get",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Appointment", body = AppointmentResponse),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<AppointmentResponse>> {
    let id = query.require()?;
    Ok(Json(state.appointments.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/api/appointment/create",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = CreateAppointment,
    responses(
        (status = 200, description = "Created appointment", body = AppointmentResponse),
        (status = 400, description = "Missing session or required fields"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn create_appointment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAppointment>,
) -> AppResult<Json<AppointmentResponse>> {
    require_capability(&session, |c| c.manage_appointments)?;
    Ok(Json(state.appointments.create(payload).await?))
}

#[utoipa::path(
    patch,
    path = "/api/appointment/update",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    request_body = UpdateAppointment,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentResponse),
        (status = 404, description = "Appointment not found"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn update_appointment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateAppointment>,
) -> AppResult<Json<AppointmentResponse>> {
    require_capability(&session, |c| c.manage_appointments)?;
    Ok(Json(state.appointments.update(payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/appointment/delete",
    tag = "Appointments",
    security(("bearer_auth" = [])),
    params(IdQuery),
    responses(
        (status = 200, description = "Deleted id", body = Deleted),
        (status = 404, description = "Appointment not found"),
        (status = 403, description = "Role may not manage this resource")
    )
)]
pub async fn delete_appointment(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<Deleted>> {
    require_capability(&session, |c| c.manage_appointments)?;
    let id = query.require()?;
    Ok(Json(state.appointments.delete(&id).await?))
}
