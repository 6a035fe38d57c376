//! Handler tests against the in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::{MockUserDirectory, UserDirectoryError};
use crate::domain::validation::{INVALID_EMAIL, INVALID_LATITUDE};
use crate::domain::{UserDraft, UserRecord, UserRecordId};
use crate::inbound::http::{HttpState, configure};
use crate::outbound::memory::InMemoryUserDirectory;

fn seeded_record() -> UserRecord {
    UserRecord::new(
        UserRecordId::new("1").expect("id"),
        UserDraft {
            name: "Leanne Graham".to_owned(),
            email: "sincere@april.biz".to_owned(),
            ..UserDraft::default()
        },
        None,
        None,
    )
}

#[fixture]
fn state() -> HttpState {
    HttpState::new(Arc::new(InMemoryUserDirectory::seeded(
        Arc::new(DefaultClock),
        [seeded_record()],
    )))
}

#[fixture]
fn payload() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "555-123-4567",
        "company": "Acme",
        "address": {
            "street": "1 Main St",
            "city": "NYC",
            "zip": "10001",
            "geo": { "lat": "40.7128", "lng": "-74.0060" }
        }
    })
}

macro_rules! app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn lists_seeded_users(state: HttpState) {
    let app = app!(state);
    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let users: Vec<UserRecord> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(users, [seeded_record()]);
}

#[rstest]
#[actix_web::test]
async fn creates_and_fetches_a_user(state: HttpState, payload: Value) {
    let app = app!(state);
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: UserRecord = actix_test::read_body_json(response).await;
    assert!(created.created_at().is_some());

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/users/{}", created.id()))
        .to_request();
    let fetched: UserRecord = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.draft().address.geo.lng, "-74.0060");
}

#[rstest]
#[actix_web::test]
async fn invalid_payloads_report_field_errors(state: HttpState, mut payload: Value) {
    payload["email"] = json!("not-an-email");
    payload["address"]["geo"]["lat"] = json!("95");
    let app = app!(state);
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["fields"]["email"], json!(INVALID_EMAIL));
    assert_eq!(body["details"]["fields"]["lat"], json!(INVALID_LATITUDE));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_envelope(state: HttpState) {
    let app = app!(state);
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn updates_replace_the_draft(state: HttpState, mut payload: Value) {
    payload["company"] = json!("Romaguera-Crona");
    let app = app!(state);
    let request = actix_test::TestRequest::put()
        .uri("/api/users/1")
        .set_json(&payload)
        .to_request();
    let updated: UserRecord = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(updated.id().as_ref(), "1");
    assert_eq!(updated.draft().company, "Romaguera-Crona");
    assert!(updated.updated_at().is_some());
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn missing_users_are_not_found(state: HttpState, #[case] request: actix_test::TestRequest) {
    let app = app!(state);
    let response =
        actix_test::call_service(&app, request.uri("/api/users/404").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["message"], json!("user 404 was not found"));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_the_user(state: HttpState) {
    let app = app!(state);
    let request = actix_test::TestRequest::delete()
        .uri("/api/users/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = actix_test::TestRequest::get().uri("/api/users/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn store_failures_are_redacted() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_users()
        .return_once(|| Err(UserDirectoryError::transport("lock poisoned")));
    let app = app!(HttpState::new(Arc::new(directory)));

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Internal server error"));
}
