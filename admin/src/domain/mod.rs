//! Domain primitives, validation rules and view state machines.
//!
//! Purpose: keep every rule about user records transport agnostic. Adapters
//! in `inbound` and `outbound` depend on this module, never the reverse.
//!
//! Public surface:
//! - UserRecord / UserDraft: the stored record and its client-editable part.
//! - validate / validate_draft: field-keyed validation.
//! - FieldPath / apply_edit: typed single-field edits.
//! - views: per-view state objects and their transitions.
//! - FlowController: executes view effects against a `UserDirectory`.

pub mod controller;
pub mod error;
pub mod field_path;
pub mod ports;
pub mod user_record;
pub mod validation;
pub mod views;

pub use self::controller::FlowController;
pub use self::error::{Error, ErrorCode};
pub use self::field_path::{AddressField, FieldPath, FieldPathError, GeoField, apply_edit};
pub use self::user_record::{Address, Geo, UserDraft, UserRecord, UserRecordId, UserRecordIdError};
pub use self::validation::{FieldErrors, FieldKey, ValidatedDraft, validate, validate_draft};
