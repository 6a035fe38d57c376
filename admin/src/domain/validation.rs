//! Field-keyed validation of [`UserDraft`] values.
//!
//! Rules per key, in order:
//! 1. required: a blank value (after trimming) yields `"<Label> is
//!    required"` and no other rule runs for that key;
//! 2. e-mail must contain `@` and a dotted domain;
//! 3. phone must be at least seven digits or phone punctuation, with an
//!    optional leading `+`;
//! 4. latitude and longitude must parse to finite numbers within
//!    `[-90, 90]` and `[-180, 180]`.
//!
//! Both the create and the edit flow use these rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::user_record::UserDraft;

/// Short key identifying a validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `company`
    Company,
    /// `address.street`
    Street,
    /// `address.city`
    City,
    /// `address.zip`
    Zip,
    /// `address.geo.lat`
    Lat,
    /// `address.geo.lng`
    Lng,
}

impl FieldKey {
    /// Wire name of the key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Street => "street",
            Self::City => "city",
            Self::Zip => "zip",
            Self::Lat => "lat",
            Self::Lng => "lng",
        }
    }

    /// Human-readable label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company",
            Self::Street => "Street address",
            Self::City => "City",
            Self::Zip => "Zip code",
            Self::Lat => "Latitude",
            Self::Lng => "Longitude",
        }
    }

    fn required_message(self) -> String {
        format!("{} is required", self.label())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message for an e-mail that fails the format check.
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
/// Message for a phone number that fails the format check.
pub const INVALID_PHONE: &str = "Please enter a valid phone number";
/// Message for a latitude that is unparsable or out of range.
pub const INVALID_LATITUDE: &str = "Latitude must be between -90 and 90";
/// Message for a longitude that is unparsable or out of range.
pub const INVALID_LONGITUDE: &str = "Longitude must be between -180 and 180";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9\s\-().]{7,}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Field-keyed validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldKey, String>);

impl FieldErrors {
    /// `true` when no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `key`, if any.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// `true` when `key` carries a message.
    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Drop the message for `key`, returning it.
    pub fn clear(&mut self, key: FieldKey) -> Option<String> {
        self.0.remove(&key)
    }

    /// Iterate over messages in key order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(key, message)| (*key, message.as_str()))
    }

    fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// A draft that passed [`validate`].
///
/// Only [`validate_draft`] constructs this type, so a mutating call that
/// takes one cannot be handed unchecked input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedDraft(UserDraft);

impl ValidatedDraft {
    /// Borrow the validated fields.
    pub fn draft(&self) -> &UserDraft {
        &self.0
    }

    /// Unwrap into the plain draft.
    pub fn into_draft(self) -> UserDraft {
        self.0
    }
}

impl AsRef<UserDraft> for ValidatedDraft {
    fn as_ref(&self) -> &UserDraft {
        &self.0
    }
}

/// Validate every field of `draft`.
///
/// # Examples
/// ```
/// use user_admin::domain::{FieldKey, UserDraft, validate};
///
/// let errors = validate(&UserDraft::default());
/// assert_eq!(errors.len(), 9);
/// assert_eq!(errors.get(FieldKey::Zip), Some("Zip code is required"));
/// ```
pub fn validate(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    let address = &draft.address;
    let required = [
        (FieldKey::Name, draft.name.as_str()),
        (FieldKey::Email, draft.email.as_str()),
        (FieldKey::Phone, draft.phone.as_str()),
        (FieldKey::Company, draft.company.as_str()),
        (FieldKey::Street, address.street.as_str()),
        (FieldKey::City, address.city.as_str()),
        (FieldKey::Zip, address.zip.as_str()),
        (FieldKey::Lat, address.geo.lat.as_str()),
        (FieldKey::Lng, address.geo.lng.as_str()),
    ];
    for (key, value) in required {
        if is_blank(value) {
            errors.insert(key, key.required_message());
        }
    }

    let email = draft.email.as_str();
    if !is_blank(email) && !email_regex().is_match(email) {
        errors.insert(FieldKey::Email, INVALID_EMAIL);
    }

    let phone = draft.phone.as_str();
    if !is_blank(phone) && !phone_regex().is_match(phone) {
        errors.insert(FieldKey::Phone, INVALID_PHONE);
    }

    let lat = address.geo.lat.as_str();
    if !is_blank(lat) && !within(lat, 90.0) {
        errors.insert(FieldKey::Lat, INVALID_LATITUDE);
    }

    let lng = address.geo.lng.as_str();
    if !is_blank(lng) && !within(lng, 180.0) {
        errors.insert(FieldKey::Lng, INVALID_LONGITUDE);
    }

    errors
}

/// Validate `draft`, returning it wrapped when it has no errors.
pub fn validate_draft(draft: UserDraft) -> Result<ValidatedDraft, FieldErrors> {
    let errors = validate(&draft);
    if errors.is_empty() {
        Ok(ValidatedDraft(draft))
    } else {
        Err(errors)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn within(value: &str, bound: f64) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|number| number.is_finite() && (-bound..=bound).contains(&number))
}
