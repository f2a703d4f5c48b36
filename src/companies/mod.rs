//! Company directory derived from published jobs and internships.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::companies_routes;
