//! Users and session context for Corkboard.
//!
//! Users are the owners, members, assignees and comment authors referenced by
//! boards and tasks. Authentication itself happens outside this crate; callers
//! hand services a resolved [`domain::Session`] and protected operations
//! reject anonymous sessions.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
