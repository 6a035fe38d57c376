//! Tests for the user record model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn jane() -> UserDraft {
    UserDraft {
        name: "Jane Doe".to_owned(),
        email: "jane@example.com".to_owned(),
        phone: "+1(212)5551234".to_owned(),
        company: "Acme".to_owned(),
        address: Address {
            street: "1 Main St".to_owned(),
            city: "NYC".to_owned(),
            zip: "10001".to_owned(),
            geo: Geo {
                lat: "40.7128".to_owned(),
                lng: "-74.0060".to_owned(),
            },
        },
    }
}

#[rstest]
#[case("", UserRecordIdError::Empty)]
#[case(" 7", UserRecordIdError::SurroundingWhitespace)]
#[case("7\n", UserRecordIdError::SurroundingWhitespace)]
fn id_rejects_malformed_values(#[case] raw: &str, #[case] expected: UserRecordIdError) {
    assert_eq!(UserRecordId::new(raw), Err(expected));
}

#[rstest]
fn random_ids_are_distinct() {
    assert_ne!(UserRecordId::random(), UserRecordId::random());
}

#[rstest]
#[case(json!("abc-1"), "abc-1")]
#[case(json!(42), "42")]
#[case(json!(-3), "-3")]
fn id_accepts_text_and_integer_json(#[case] raw: serde_json::Value, #[case] expected: &str) {
    let id: UserRecordId = serde_json::from_value(raw).expect("id decodes");
    assert_eq!(id.as_ref(), expected);
}

#[rstest]
fn id_rejects_empty_json_string() {
    assert!(serde_json::from_value::<UserRecordId>(json!("")).is_err());
}

#[rstest]
fn empty_draft_has_blank_fields() {
    let draft = UserDraft::default();
    assert_eq!(draft.name, "");
    assert_eq!(draft.address.geo.lng, "");
}

#[rstest]
fn record_decodes_store_payload(jane: UserDraft) {
    let payload = json!({
        "id": 12,
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+1(212)5551234",
        "company": "Acme",
        "address": {
            "street": "1 Main St",
            "city": "NYC",
            "zip": "10001",
            "geo": { "lat": "40.7128", "lng": "-74.0060" }
        },
        "created_at": "2024-03-01T09:30:00Z",
        "updatedAt": "2024-03-02T10:00:00Z"
    });

    let record: UserRecord = serde_json::from_value(payload).expect("record decodes");
    assert_eq!(record.id().as_ref(), "12");
    assert_eq!(record.draft(), &jane);
    assert_eq!(
        record.created_at(),
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single()
    );
    assert_eq!(
        record.updated_at(),
        Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).single()
    );
}

#[rstest]
fn sparse_record_merges_over_empty_form() {
    let payload = json!({
        "id": "u-1",
        "name": "Ada",
        "email": null,
        "address": { "city": "London", "geo": null }
    });

    let record: UserRecord = serde_json::from_value(payload).expect("sparse record decodes");
    let draft = record.draft();
    assert_eq!(draft.name, "Ada");
    assert_eq!(draft.email, "");
    assert_eq!(draft.phone, "");
    assert_eq!(draft.address.city, "London");
    assert_eq!(draft.address.street, "");
    assert_eq!(draft.address.geo, Geo::default());
    assert!(record.created_at().is_none());
}

#[rstest]
fn numeric_coordinates_keep_their_text_form() {
    let payload = json!({ "lat": 40.5, "lng": -74 });
    let geo: Geo = serde_json::from_value(payload).expect("geo decodes");
    assert_eq!(geo.lat, "40.5");
    assert_eq!(geo.lng, "-74");
}

#[rstest]
fn record_serialises_flat_with_snake_case_timestamps(jane: UserDraft) {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .expect("timestamp");
    let record = UserRecord::new(
        UserRecordId::new("u-9").expect("id"),
        jane,
        Some(created),
        None,
    );

    let value = serde_json::to_value(&record).expect("serialise");
    assert_eq!(value.get("id"), Some(&json!("u-9")));
    assert_eq!(value.get("name"), Some(&json!("Jane Doe")));
    assert_eq!(value.pointer("/address/geo/lat"), Some(&json!("40.7128")));
    assert_eq!(value.get("created_at"), Some(&json!("2024-01-02T03:04:05Z")));
    assert!(value.get("updated_at").is_none());
    assert!(value.get("draft").is_none());
}

#[rstest]
fn with_draft_refreshes_only_updated_at(jane: UserDraft) {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp");
    let later = Utc
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .expect("timestamp");
    let id = UserRecordId::new("u-1").expect("id");
    let record = UserRecord::new(id.clone(), UserDraft::default(), Some(created), Some(created));

    let updated = record.with_draft(jane.clone(), later);
    assert_eq!(updated.id(), &id);
    assert_eq!(updated.draft(), &jane);
    assert_eq!(updated.created_at(), Some(created));
    assert_eq!(updated.updated_at(), Some(later));
}

#[rstest]
fn address_helpers_render_dashboard_and_map_values(jane: UserDraft) {
    assert_eq!(jane.address.locality(), "NYC, 10001");
    assert_eq!(
        jane.address.geo.maps_url(),
        "https://www.google.com/maps?q=40.7128,-74.0060"
    );
}
