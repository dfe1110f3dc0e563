//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{
    Account, AppointmentResponse, Appointments, BulkDelete, CreateAccount, CreateAppointment,
    CreatePayment, CreateProperty, Deleted, PaginationMeta, PaymentResponse, PaymentStatus,
    Payments, Properties, PropertyResponse, Role, UpdateAccount, UpdateAppointment,
    UpdatePayment, UpdateProperty,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::property_handler::list_properties,
        crate::handlers::property_handler::get_property,
        crate::handlers::property_handler::create_property,
        crate::handlers::property_handler::update_property,
        crate::handlers::property_handler::delete_property,
        crate::handlers::property_handler::bulk_delete_properties,
        crate::handlers::appointment_handler::list_appointments,
        crate::handlers::appointment_handler::get_appointment,
        crate::handlers::appointment_handler::create_appointment,
        crate::handlers::appointment_handler::update_appointment,
        crate::handlers::appointment_handler::delete_appointment,
        crate::handlers::payment_handler::list_payments,
        crate::handlers::payment_handler::get_payment,
        crate::handlers::payment_handler::create_payment,
        crate::handlers::payment_handler::update_payment,
        crate::handlers::payment_handler::delete_payment,
        crate::handlers::account_handler::list_accounts,
        crate::handlers::account_handler::get_account,
        crate::handlers::account_handler::create_account,
        crate::handlers::account_handler::update_account,
        crate::handlers::account_handler::delete_account,
        crate::handlers::account_handler::bulk_delete_accounts,
    ),
    components(
        schemas(
            Account,
            AppointmentResponse,
            Appointments,
            BulkDelete,
            CreateAccount,
            CreateAppointment,
            CreatePayment,
            CreateProperty,
            Deleted,
            PaginationMeta,
            PaymentResponse,
            PaymentStatus,
            Payments,
            Properties,
            PropertyResponse,
            Role,
            UpdateAccount,
            UpdateAppointment,
            UpdatePayment,
            UpdateProperty,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Properties", description = "Property listings"),
        (name = "Appointments", description = "Viewing appointments"),
        (name = "Payments", description = "Payment records"),
        (name = "Accounts", description = "Account management"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
