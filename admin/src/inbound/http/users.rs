//! User record handlers.
//!
//! ```text
//! POST /api/users {"name":"Jane Doe","email":"jane@example.com",...}
//! GET /api/users/3fa85f64-5717-4562-b3fc-2c963f66afa6
//! ```
//!
//! Payloads pass through the same validator the admin uses before they
//! reach the directory, so the store never holds a record the admin would
//! refuse to submit.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, FieldErrors, UserDraft, UserRecord, UserRecordId, ValidatedDraft, validate_draft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn parse_id(raw: String) -> ApiResult<UserRecordId> {
    UserRecordId::new(raw).map_err(|err| {
        Error::invalid_request(format!("invalid user id: {err}"))
            .with_details(json!({ "field": "id" }))
    })
}

fn validation_error(errors: &FieldErrors) -> Error {
    Error::invalid_request(format!("Validation failed: {errors}"))
        .with_details(json!({ "fields": errors }))
}

fn validated(payload: web::Json<UserDraft>) -> ApiResult<ValidatedDraft> {
    validate_draft(payload.into_inner()).map_err(|errors| validation_error(&errors))
}

/// List every user in insertion order.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserRecord>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserRecord>> {
    let id = parse_id(path.into_inner())?;
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(user))
}

/// Create a user; the store assigns the id and timestamps.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraft>,
) -> ApiResult<HttpResponse> {
    let draft = validated(payload)?;
    let user = state.users.create_user(&draft).await?;
    info!(user_id = user.id().as_ref(), "user created");
    Ok(HttpResponse::Created().json(user))
}

/// Replace the editable fields of a user.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserDraft>,
) -> ApiResult<web::Json<UserRecord>> {
    let id = parse_id(path.into_inner())?;
    let draft = validated(payload)?;
    let user = state.users.update_user(&id, &draft).await?;
    info!(user_id = id.as_ref(), "user updated");
    Ok(web::Json(user))
}

/// Remove a user.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    state.users.delete_user(&id).await?;
    info!(user_id = id.as_ref(), "user deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
