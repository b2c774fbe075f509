//! Corkboard: Kanban boards with drag-and-drop reordering.
//!
//! The crate keeps a client-side board in step with a persistent backend.
//! Drops are applied to local state optimistically, persisted through a
//! gateway port, and rolled back to the pre-drag snapshot when persistence
//! fails.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`user`]: User directory and request sessions
//! - [`board`]: Boards, their fixed columns and membership
//! - [`task`]: Tasks, comments, attachments and placement updates
//! - [`dashboard`]: Client-side store, drag tracking, reordering and sync
//! - [`config`]: Layered runtime configuration
//! - [`postgres`]: Connection pool and shared Diesel plumbing

pub mod board;
pub mod config;
pub mod dashboard;
pub mod postgres;
pub mod task;
pub mod user;
