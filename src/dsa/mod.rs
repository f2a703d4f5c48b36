// src/dsa/mod.rs

pub mod handlers;
pub mod judge;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::dsa_routes;
