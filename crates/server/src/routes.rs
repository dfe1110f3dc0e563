//! Route configuration.

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    account_routes, appointment_routes, health_routes, payment_routes, property_routes,
};
use crate::middleware::{rate_limit_middleware, session_middleware};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Rate limit first, then session validation.
fn protected(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/property", protected(property_routes(), &state))
        .nest("/appointment", protected(appointment_routes(), &state))
        .nest("/payment", protected(payment_routes(), &state))
        .nest("/auth", protected(account_routes(), &state));

    Router::new()
        // Health check (no session, no rate limit)
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
