//! Authentication handlers

pub mod admin;
pub mod google;
pub mod user;
