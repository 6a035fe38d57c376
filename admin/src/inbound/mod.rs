//! Inbound adapters: the admin command line and the development store's
//! HTTP surface.

pub mod cli;
pub mod http;
