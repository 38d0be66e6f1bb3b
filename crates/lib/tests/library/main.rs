//! Integration tests for blueprint-lib.

mod project_tests;
mod property_tests;
