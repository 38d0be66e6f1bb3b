//! CLI integration tests for bp.

mod check_tests;
mod common;
mod order_tests;
mod plan_tests;
