//! # Auth Module
//!
//! Admin accounts (username + bcrypt password) and site users (Google sign-in),
//! both issued HS256 JWTs whose `type` claim keeps the two apart.
//! Handlers take `AuthedAdmin`, `AuthedUser` or `MaybeUser` to declare what they need.

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod tokens;


pub use extractors::{AuthedAdmin, AuthedUser, MaybeUser};
pub use models::User;
pub use routes::auth_routes;
