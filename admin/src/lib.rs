//! Administrative client for user records held by a remote REST store.
//!
//! The crate is split along hexagonal boundaries:
//! - [`domain`] owns the record schema, validation, typed field edits, view
//!   state machines and the [`domain::ports::UserDirectory`] port.
//! - [`outbound`] implements the port over HTTP and in memory.
//! - [`inbound`] drives the views from a CLI and serves the REST contract for
//!   local development.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;
