//! Resume ATS scoring and structured parsing, from text or uploaded files.

pub mod analysis;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod text;


pub use models::*;
pub use routes::resume_routes;
