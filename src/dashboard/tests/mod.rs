//! Unit tests for the dashboard module.

mod reorder_tests;
mod store_tests;
mod support;
