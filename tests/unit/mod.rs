//! Unit tests against the public library API

mod basic_tests;
mod engine_properties;
