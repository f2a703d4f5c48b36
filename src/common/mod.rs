// Common module - shared types and utilities across all modules

pub mod dev_mode;
pub mod error;
pub mod helpers;
pub mod id_generator;
pub mod migrations;
pub mod query;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types for convenience
pub use error::ApiError;
pub use helpers::{now_timestamp, safe_email_log};
pub use id_generator::*;
pub use query::{AdminListQuery, SqlFilter};
pub use state::{AppState, AuthConfig};
pub use validation::{ValidationError, ValidationResult, Validator};
