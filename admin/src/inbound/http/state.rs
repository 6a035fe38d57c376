//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the directory port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store the endpoints read and write.
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Bundle `users` for the handlers.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}
