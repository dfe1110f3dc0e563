//! Middleware for session validation and rate limiting.

mod auth;
mod rate_limit;

pub use auth::{require_capability, session_middleware, Claims, CurrentSession, SessionKeys};
pub use rate_limit::rate_limit_middleware;
