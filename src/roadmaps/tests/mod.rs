// src/roadmaps/tests/mod.rs

mod handlers_tests;
