// src/public/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::public_routes;
