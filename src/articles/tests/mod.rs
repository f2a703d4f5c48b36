// src/articles/tests/mod.rs
