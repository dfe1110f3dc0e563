//! Controller business logic, one service per resource.

mod account_service;
mod appointment_service;
mod payment_service;
mod property_service;

pub use account_service::{AccountManager, AccountService};
pub use appointment_service::{AppointmentManager, AppointmentService};
pub use payment_service::{PaymentManager, PaymentService};
pub use property_service::{PropertyManager, PropertyService};
