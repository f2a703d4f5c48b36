// src/dsa/handlers/mod.rs

pub mod admin;
pub mod discussions;
pub mod problems;
pub mod progress;

pub use admin::*;
pub use discussions::*;
pub use problems::*;
pub use progress::*;
