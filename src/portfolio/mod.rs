//! Shareable portfolio sites rendered from resume data and seeded templates.

pub mod handlers;
pub mod models;
pub mod renderer;
pub mod routes;
pub mod templates;


pub use routes::portfolio_routes;
pub use templates::ensure_default_templates;
