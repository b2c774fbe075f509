//! Client-side board state and drag-and-drop reconciliation.
//!
//! The dashboard holds the active board's tasks in a [`domain::TaskStore`],
//! turns pointer events into [`domain::MoveCommand`]s and pushes them to the
//! backend through the [`ports::KanbanGateway`] port. Moves are applied
//! optimistically and reverted when persistence fails.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
