//! LLM-drafted admin content and the public resume check.

pub mod fallbacks;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::ai_routes;
