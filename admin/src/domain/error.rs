//! JSON error envelope shared by the store and its REST client.
//!
//! The development store answers every failure with this shape, and
//! `RestUserDirectory` reads it back to recover the store's message. Bodies
//! that do not decode as an envelope (proxies, foreign servers) are left to
//! the adapter's status-based fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure category carried in the `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// An unexpected error occurred inside the store.
    InternalError,
}

impl ErrorCode {
    /// Message used when a caller supplies a blank one.
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Error envelope: `{"code": ..., "message": ..., "details"?: ...}`.
///
/// `message` is never blank. Constructors substitute the code's fallback
/// message; decoding rejects a blank message outright so the client can tell
/// a real envelope from an empty one.
///
/// # Examples
/// ```
/// use user_admin::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(Error::not_found("  ").message(), "Not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Envelope", into = "Envelope")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

/// A decoded envelope had no usable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("error envelope message must not be blank")]
pub struct BlankMessage;

impl Error {
    /// Build an error, trimming `message` and falling back to the code's
    /// default when nothing is left.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = match message.into().trim() {
            "" => code.fallback_message().to_owned(),
            trimmed => trimmed.to_owned(),
        };
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message; never blank.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured details, such as per-field validation messages.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::{Error, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = Error::new(ErrorCode::InvalidRequest, "bad")
    ///     .with_details(json!({ "fields": { "name": "Name is required" } }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// [`ErrorCode::InvalidRequest`] with `message`.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::NotFound`] with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::InternalError`] with `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Serialize, Deserialize)]
struct Envelope {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for Envelope {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<Envelope> for Error {
    type Error = BlankMessage;

    fn try_from(value: Envelope) -> Result<Self, Self::Error> {
        if value.message.trim().is_empty() {
            return Err(BlankMessage);
        }
        let error = Self::new(value.code, value.message);
        Ok(match value.details {
            Some(details) => error.with_details(details),
            None => error,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Envelope construction and serde contract.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "", "Invalid request")]
    #[case(ErrorCode::NotFound, "   ", "Not found")]
    #[case(ErrorCode::InternalError, " boom\n", "boom")]
    fn constructors_never_keep_blank_or_padded_messages(
        #[case] code: ErrorCode,
        #[case] message: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(Error::new(code, message).message(), expected);
    }

    #[rstest]
    fn serialises_snake_case_code_and_omits_missing_details() {
        let value = serde_json::to_value(Error::not_found("user 7 not found")).expect("serialise");
        assert_eq!(value, json!({ "code": "not_found", "message": "user 7 not found" }));
    }

    #[rstest]
    #[case::blank_message(json!({ "code": "internal_error", "message": " " }))]
    #[case::unknown_code(json!({ "code": "teapot", "message": "short and stout" }))]
    #[case::missing_message(json!({ "code": "not_found" }))]
    fn decoding_rejects_unusable_envelopes(#[case] payload: Value) {
        assert!(serde_json::from_value::<Error>(payload).is_err());
    }

    #[rstest]
    fn details_survive_the_wire() {
        let error = Error::invalid_request("invalid user")
            .with_details(json!({ "fields": { "lat": "Latitude must be between -90 and 90" } }));
        let value = serde_json::to_value(&error).expect("serialise");
        let decoded: Error = serde_json::from_value(value).expect("deserialise");
        assert_eq!(decoded, error);
    }
}
