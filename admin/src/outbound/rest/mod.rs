//! REST outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `UserDirectory`
//! port.

mod http_directory;

pub use http_directory::{RestDirectoryBuildError, RestUserDirectory};
