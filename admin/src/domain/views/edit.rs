//! Edit form for an existing user.
//!
//! The record is loaded first and merged into the form; until then the form
//! is the empty draft and `Submit` does nothing.

use crate::domain::{FieldPath, UserRecord, UserRecordId};

use super::{
    Effect, FormState, LoadState, Outcome, Request, Route, Tickets, USER_UPDATED, View,
};

/// Events handled by [`EditUserView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditUserEvent {
    /// The view was opened; load the record.
    Mount,
    /// Reload after a failed load.
    Retry,
    /// A field changed.
    Edit {
        /// Field that changed.
        path: FieldPath,
        /// New raw value.
        value: String,
    },
    /// Validate and send the draft.
    Submit,
    /// Abandon the edit and return to the details page.
    Cancel,
    /// Leave for the list, typically after a failed load.
    BackToDashboard,
    /// The view was torn down.
    Dismount,
    /// A store call finished.
    Remote(Outcome),
}

impl From<Outcome> for EditUserEvent {
    fn from(value: Outcome) -> Self {
        Self::Remote(value)
    }
}

/// Edit page state for one record.
#[derive(Debug, Clone)]
pub struct EditUserView {
    id: UserRecordId,
    original: LoadState<UserRecord>,
    form: FormState,
    tickets: Tickets,
    dismounted: bool,
}

impl EditUserView {
    /// A view for `id` that has not loaded anything yet.
    pub fn new(id: UserRecordId) -> Self {
        Self {
            id,
            original: LoadState::Idle,
            form: FormState::default(),
            tickets: Tickets::default(),
            dismounted: false,
        }
    }

    /// Identifier of the edited record.
    pub fn id(&self) -> &UserRecordId {
        &self.id
    }

    /// Load progress of the record being edited.
    pub fn original(&self) -> &LoadState<UserRecord> {
        &self.original
    }

    /// Draft, errors and submission state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// `"Edit User: <name>"`, using the name as loaded.
    pub fn title(&self) -> Option<String> {
        self.original
            .ready()
            .map(|user| format!("Edit User: {}", user.name()))
    }

    fn load(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        self.original = LoadState::Loading(ticket);
        vec![Effect::Remote {
            ticket,
            request: Request::GetUser(self.id.clone()),
        }]
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.original.ready().is_none() {
            return Vec::new();
        }
        let id = self.id.clone();
        self.form
            .submit(&mut self.tickets)
            .map(|(ticket, draft)| Effect::Remote {
                ticket,
                request: Request::UpdateUser(id, draft),
            })
            .into_iter()
            .collect()
    }

    fn settle(&mut self, outcome: Outcome) -> Vec<Effect> {
        let ticket = outcome.ticket();
        if self.original.awaits(ticket) {
            match outcome {
                Outcome::UserLoaded { user, .. } => {
                    self.form = FormState::with_draft(user.draft().clone());
                    self.original = LoadState::Ready(user);
                }
                Outcome::Failed { message, .. } => self.original = LoadState::Failed(message),
                _ => {}
            }
            return Vec::new();
        }
        if !self.form.awaits(ticket) {
            return Vec::new();
        }
        self.form.settle();
        match outcome {
            Outcome::UserSaved { .. } => vec![Effect::Navigate {
                route: Route::UserDetails(self.id.clone()),
                flash: Some(USER_UPDATED.to_owned()),
            }],
            Outcome::Failed { message, .. } => {
                vec![Effect::Alert(format!("Failed to update user: {message}"))]
            }
            _ => Vec::new(),
        }
    }
}

impl View for EditUserView {
    type Event = EditUserEvent;

    fn apply(mut self, event: EditUserEvent) -> (Self, Vec<Effect>) {
        if self.dismounted {
            return (self, Vec::new());
        }
        let effects = match event {
            EditUserEvent::Mount => self.load(),
            EditUserEvent::Retry if self.original.error().is_some() => self.load(),
            EditUserEvent::Retry => Vec::new(),
            EditUserEvent::Edit { path, value } => {
                self.form.edit(path, value);
                Vec::new()
            }
            EditUserEvent::Submit => self.submit(),
            EditUserEvent::Cancel => vec![Effect::Navigate {
                route: Route::UserDetails(self.id.clone()),
                flash: None,
            }],
            EditUserEvent::BackToDashboard => vec![Effect::Navigate {
                route: Route::Dashboard,
                flash: None,
            }],
            EditUserEvent::Dismount => {
                self.dismounted = true;
                Vec::new()
            }
            EditUserEvent::Remote(outcome) => self.settle(outcome),
        };
        (self, effects)
    }
}
