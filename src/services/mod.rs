// src/services/mod.rs
//
// Shared services used across the domain modules

pub mod expiration;
pub mod google;
pub mod llm;
pub mod monitoring;
pub mod rate_limit;
pub mod settings;

// Re-export commonly used types for convenience
pub use expiration::{ExpirationConfig, ExpirationReport, ExpirationService};
pub use google::GoogleService;
pub use llm::{GenerationPurpose, LlmError, LlmService};
pub use rate_limit::{RateLimitConfig, RateLimitService};
pub use settings::SettingsService;
