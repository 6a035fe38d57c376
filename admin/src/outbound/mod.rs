//! Outbound adapters implementing the [`UserDirectory`](crate::domain::ports::UserDirectory) port.
//!
//! - **rest**: reqwest client for the user store's REST API
//! - **memory**: process-local store used by the development server and tests
//!
//! Adapters translate between transport payloads and domain types. They hold
//! no validation or view logic.

pub mod memory;
pub mod rest;
