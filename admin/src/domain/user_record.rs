//! User record data model.
//!
//! [`UserRecord`] is the store's canonical shape; [`UserDraft`] is the part a
//! client may edit and doubles as the create/edit form state. Decoding is
//! lenient: missing or `null` text fields become empty strings and numbers
//! are kept in their textual form, so a sparse record merges cleanly over an
//! empty form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserRecordId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRecordIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier carried leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Store-assigned user identifier.
///
/// Opaque to the client. Stores that hand out numeric identifiers are
/// accepted; the value is always carried and rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawUserRecordId", into = "String")]
pub struct UserRecordId(String);

impl UserRecordId {
    /// Validate and construct a [`UserRecordId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserRecordIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserRecordIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserRecordIdError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserRecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserRecordId> for String {
    fn from(value: UserRecordId) -> Self {
        value.0
    }
}

impl std::str::FromStr for UserRecordId {
    type Err = UserRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserRecordId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl TryFrom<RawUserRecordId> for UserRecordId {
    type Error = UserRecordIdError;

    fn try_from(value: RawUserRecordId) -> Result<Self, Self::Error> {
        match value {
            RawUserRecordId::Text(text) => Self::new(text),
            RawUserRecordId::Unsigned(number) => Self::new(number.to_string()),
            RawUserRecordId::Signed(number) => Self::new(number.to_string()),
        }
    }
}

/// Geographic coordinates, kept as the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    /// Latitude; valid values parse to a number in `[-90, 90]`.
    #[serde(deserialize_with = "lenient_text")]
    pub lat: String,
    /// Longitude; valid values parse to a number in `[-180, 180]`.
    #[serde(deserialize_with = "lenient_text")]
    pub lng: String,
}

impl Geo {
    /// Link to the coordinates on Google Maps.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::Geo;
    ///
    /// let geo = Geo { lat: "40.7128".into(), lng: "-74.0060".into() };
    /// assert_eq!(geo.maps_url(), "https://www.google.com/maps?q=40.7128,-74.0060");
    /// ```
    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.lat.trim(),
            self.lng.trim()
        )
    }
}

/// Postal address with nested coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street line.
    #[serde(deserialize_with = "lenient_text")]
    pub street: String,
    /// City name.
    #[serde(deserialize_with = "lenient_text")]
    pub city: String,
    /// Postal code.
    #[serde(deserialize_with = "lenient_text")]
    pub zip: String,
    /// Coordinates of the address.
    #[serde(deserialize_with = "null_as_default")]
    pub geo: Geo,
}

impl Address {
    /// `"<city>, <zip>"`, as shown in the dashboard table.
    pub fn locality(&self) -> String {
        format!("{}, {}", self.city, self.zip)
    }
}

/// Client-editable fields of a user record.
///
/// This is also the form state of the create and edit views; the empty
/// draft has every field set to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    /// Full name.
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// Contact e-mail address.
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    /// Contact phone number.
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    /// Company name.
    #[serde(deserialize_with = "lenient_text")]
    pub company: String,
    /// Postal address.
    #[serde(deserialize_with = "null_as_default")]
    pub address: Address,
}

/// A user record as held by the remote store.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - Timestamps are store-owned; clients never send them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserRecord {
    id: UserRecordId,
    #[serde(flatten)]
    draft: UserDraft,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Assemble a record from its parts.
    pub fn new(
        id: UserRecordId,
        draft: UserDraft,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            draft,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserRecordId {
        &self.id
    }

    /// Client-editable fields.
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    /// Full name, shortcut for prompts and headings.
    pub fn name(&self) -> &str {
        self.draft.name.as_str()
    }

    /// Creation timestamp, when the store reported one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Last update timestamp, when the store reported one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replace the editable fields, stamping `updated_at`.
    pub fn with_draft(self, draft: UserDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            draft,
            updated_at: Some(updated_at),
            ..self
        }
    }

    /// Consume the record, keeping only the editable fields.
    pub fn into_draft(self) -> UserDraft {
        self.draft
    }
}

impl From<UserRecord> for UserDraft {
    fn from(value: UserRecord) -> Self {
        value.into_draft()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientText {
    Text(String),
    Number(serde_json::Number),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LenientText>::deserialize(deserializer)? {
        Some(LenientText::Text(text)) => text,
        Some(LenientText::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests;
