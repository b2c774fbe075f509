//! Adapters for user storage.

pub mod memory;
pub mod postgres;
