//! Tasks, comments and attachments on Kanban boards.
//!
//! Tasks live in exactly one column of one board; their status is the
//! semantic key of that column and the two are kept in step by every
//! mutation in [`services`]. The module follows the same hexagonal split as
//! the rest of the crate:
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
