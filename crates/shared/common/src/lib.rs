//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Centralized error handling and the JSON error formatter
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ErrorBody, ErrorResponse, OptionExt};
