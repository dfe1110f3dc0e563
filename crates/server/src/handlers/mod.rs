//! HTTP request handlers.

pub mod account_handler;
pub mod appointment_handler;
pub mod health_handler;
pub mod payment_handler;
pub mod property_handler;

use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppError, AppResult};

pub use account_handler::account_routes;
pub use appointment_handler::appointment_routes;
pub use health_handler::health_routes;
pub use payment_handler::payment_routes;
pub use property_handler::property_routes;

/// `?id=` query used by get and delete endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IdQuery {
    /// Record identifier
    pub id: Option<String>,
}

impl IdQuery {
    /// The id, or a bad request when absent or blank.
    pub fn require(self) -> AppResult<String> {
        self.id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::bad_request("No ID provided"))
    }
}

/// `?page=&limit=&query=` for list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    pub page: Option<u64>,
    /// Falls back to the configured default page size
    pub limit: Option<u64>,
    /// Case-insensitive search text
    pub query: Option<String>,
}
