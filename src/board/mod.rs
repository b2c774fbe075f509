//! Boards and their fixed status columns.
//!
//! A board is created with the three default lanes (`todo`, `in_progress`,
//! `done`) and is never restructured afterwards. Access is granted to the
//! owner and to members.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
