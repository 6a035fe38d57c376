//! Form state shared by the create and edit views.

use crate::domain::{FieldErrors, FieldPath, UserDraft, ValidatedDraft, validate_draft};

use super::{Ticket, Tickets};

/// Draft in progress, its field errors and the outstanding submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: UserDraft,
    errors: FieldErrors,
    submitting: Option<Ticket>,
}

impl FormState {
    pub(crate) fn with_draft(draft: UserDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Current draft.
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    /// Messages from the last rejected submit, minus fields edited since.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// `true` while a submission is outstanding; submit controls are
    /// disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    pub(crate) fn edit(&mut self, path: FieldPath, value: String) {
        self.draft = self.draft.with_field(path, value);
        self.errors.clear(path.key());
    }

    /// Validate and, when clean, mark the form as submitting.
    ///
    /// Returns `None` when already submitting or when validation failed; in
    /// the latter case the errors are recorded on the form.
    pub(crate) fn submit(&mut self, tickets: &mut Tickets) -> Option<(Ticket, ValidatedDraft)> {
        if self.submitting.is_some() {
            return None;
        }
        match validate_draft(self.draft.clone()) {
            Ok(validated) => {
                self.errors = FieldErrors::default();
                let ticket = tickets.issue();
                self.submitting = Some(ticket);
                Some((ticket, validated))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub(crate) fn awaits(&self, ticket: Ticket) -> bool {
        self.submitting == Some(ticket)
    }

    pub(crate) fn settle(&mut self) {
        self.submitting = None;
    }
}
