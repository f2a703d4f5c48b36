// src/dsa/tests/mod.rs

mod handlers_tests;
mod validators_tests;
