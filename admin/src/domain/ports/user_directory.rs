//! Driven port for the remote user store and its errors.
//!
//! Views never talk to a store directly: the flow controller executes their
//! effects through this port. Mutating operations only accept
//! [`ValidatedDraft`], so a draft that failed validation cannot be sent.

use async_trait::async_trait;

use crate::domain::{UserRecord, UserRecordId, ValidatedDraft};

/// Failures raised by user directory adapters.
///
/// Every variant renders as a human-readable sentence; views show it as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// No record exists for the identifier.
    #[error("user {id} was not found")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
    /// The store refused the request payload.
    #[error("the user store rejected the request: {message}")]
    Rejected {
        /// Store-provided explanation.
        message: String,
    },
    /// The store could not be reached or failed internally.
    #[error("the user store is unavailable: {message}")]
    Transport {
        /// Transport or status detail.
        message: String,
    },
    /// The store did not answer in time.
    #[error("the user store timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The store answered with a body that could not be decoded.
    #[error("the user store sent an unreadable response: {message}")]
    Decode {
        /// Decoder detail.
        message: String,
    },
}

impl UserDirectoryError {
    /// Build [`UserDirectoryError::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Build [`UserDirectoryError::Rejected`].
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Build [`UserDirectoryError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build [`UserDirectoryError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build [`UserDirectoryError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Remote accessor for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every record, in store order.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UserDirectoryError>;

    /// One record; [`UserDirectoryError::NotFound`] when absent.
    async fn get_user(&self, id: &UserRecordId) -> Result<UserRecord, UserDirectoryError>;

    /// Store a new record. The store assigns `id` and both timestamps.
    async fn create_user(&self, draft: &ValidatedDraft) -> Result<UserRecord, UserDirectoryError>;

    /// Replace the editable fields of a record. The store refreshes
    /// `updated_at`; [`UserDirectoryError::NotFound`] when absent.
    async fn update_user(
        &self,
        id: &UserRecordId,
        draft: &ValidatedDraft,
    ) -> Result<UserRecord, UserDirectoryError>;

    /// Remove a record; [`UserDirectoryError::NotFound`] when absent.
    async fn delete_user(&self, id: &UserRecordId) -> Result<(), UserDirectoryError>;
}
