//! HTTP inbound adapter exposing the user store's REST endpoints.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

pub mod error;
pub mod state;
pub mod users;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;
pub use state::HttpState;

/// Path prefix under which the store serves its API.
pub const API_PREFIX: &str = "/api";

/// Register the store's routes and JSON extractor settings.
///
/// Malformed request bodies are answered with the domain error envelope
/// instead of actix's plain-text default.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _request| {
        Error::invalid_request(format!("invalid JSON payload: {err}")).into()
    }))
    .service(
        web::scope(API_PREFIX)
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
