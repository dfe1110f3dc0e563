//! Domain layer - Core real-estate entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Request payload types double as the validation schema shared by the
//! server controllers and the client sanitizer.

pub mod account;
pub mod appointment;
pub mod collections;
pub mod constants;
pub mod error;
pub mod message;
pub mod pagination;
pub mod payment;
pub mod property;
pub mod role;
pub mod timestamp;
pub mod validation;

pub use account::{Account, CreateAccount, UpdateAccount};
pub use appointment::{Appointment, AppointmentResponse, CreateAppointment, UpdateAppointment};
pub use collections::{Accounts, Appointments, BulkDelete, Deleted, Identified, Listing, Payments, Properties};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use message::{Conversation, Message};
pub use pagination::{PaginationMeta, PaginationParams};
pub use payment::{CreatePayment, Payment, PaymentResponse, PaymentStatus, UpdatePayment};
pub use property::{CreateProperty, Property, PropertyResponse, UpdateProperty};
pub use role::{listing_route, Capabilities, Resource, Role};
pub use timestamp::ServerTimestamp;
pub use validation::{missing_fields_message, RequiredFields};
