// src/articles/handlers/mod.rs

pub mod admin;
pub mod public;

pub use admin::*;
pub use public::*;
