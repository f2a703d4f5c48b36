//! Footer pages (privacy policy, terms and the like) served as stored HTML.

pub mod defaults;
pub mod handlers;
pub mod models;
pub mod routes;


pub use defaults::ensure_default_pages;
pub use routes::pages_routes;
