//! Adapters for board storage.

pub mod memory;
pub mod postgres;
