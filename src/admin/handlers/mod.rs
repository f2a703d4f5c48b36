// src/admin/handlers/mod.rs

pub mod dashboard;
pub mod maintenance;
pub mod settings;
