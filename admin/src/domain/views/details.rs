//! Read-only page for one user, with edit and delete actions.

use crate::domain::{UserRecord, UserRecordId};

use super::{
    DeleteConfirmation, Effect, LoadState, Outcome, Request, Route, Ticket, Tickets, USER_DELETED,
    View,
};

/// Events handled by [`UserDetailsView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDetailsEvent {
    /// The view was opened; load the record.
    Mount,
    /// Reload after a failed load.
    Retry,
    /// Go to the edit page.
    OpenEdit,
    /// Go back to the list.
    BackToDashboard,
    /// Ask to delete the shown user; awaits confirmation.
    RequestDelete,
    /// Confirm the pending delete.
    ConfirmDelete,
    /// Drop the pending delete.
    CancelDelete,
    /// The view was torn down.
    Dismount,
    /// A store call finished.
    Remote(Outcome),
}

impl From<Outcome> for UserDetailsEvent {
    fn from(value: Outcome) -> Self {
        Self::Remote(value)
    }
}

/// Details page state for one record.
#[derive(Debug, Clone)]
pub struct UserDetailsView {
    id: UserRecordId,
    user: LoadState<UserRecord>,
    confirmation: Option<DeleteConfirmation>,
    deleting: Option<Ticket>,
    tickets: Tickets,
    dismounted: bool,
}

impl UserDetailsView {
    /// A view for `id` that has not loaded anything yet.
    pub fn new(id: UserRecordId) -> Self {
        Self {
            id,
            user: LoadState::Idle,
            confirmation: None,
            deleting: None,
            tickets: Tickets::default(),
            dismounted: false,
        }
    }

    /// Identifier of the shown record.
    pub fn id(&self) -> &UserRecordId {
        &self.id
    }

    /// Load progress of the record.
    pub fn user(&self) -> &LoadState<UserRecord> {
        &self.user
    }

    /// Delete awaiting confirmation, if any.
    pub fn pending_confirmation(&self) -> Option<&DeleteConfirmation> {
        self.confirmation.as_ref()
    }

    /// `true` while the delete is in flight.
    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    fn load(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        self.user = LoadState::Loading(ticket);
        vec![Effect::Remote {
            ticket,
            request: Request::GetUser(self.id.clone()),
        }]
    }

    fn confirm_delete(&mut self) -> Vec<Effect> {
        if self.confirmation.take().is_none() {
            return Vec::new();
        }
        let ticket = self.tickets.issue();
        self.deleting = Some(ticket);
        vec![Effect::Remote {
            ticket,
            request: Request::DeleteUser(self.id.clone()),
        }]
    }

    fn settle(&mut self, outcome: Outcome) -> Vec<Effect> {
        let ticket = outcome.ticket();
        if self.user.awaits(ticket) {
            match outcome {
                Outcome::UserLoaded { user, .. } => self.user = LoadState::Ready(user),
                Outcome::Failed { message, .. } => self.user = LoadState::Failed(message),
                _ => {}
            }
            return Vec::new();
        }
        if self.deleting != Some(ticket) {
            return Vec::new();
        }
        self.deleting = None;
        match outcome {
            Outcome::UserDeleted { .. } => vec![Effect::Navigate {
                route: Route::Dashboard,
                flash: Some(USER_DELETED.to_owned()),
            }],
            Outcome::Failed { message, .. } => {
                vec![Effect::Alert(format!("Failed to delete user: {message}"))]
            }
            _ => Vec::new(),
        }
    }
}

impl View for UserDetailsView {
    type Event = UserDetailsEvent;

    fn apply(mut self, event: UserDetailsEvent) -> (Self, Vec<Effect>) {
        if self.dismounted {
            return (self, Vec::new());
        }
        let effects = match event {
            UserDetailsEvent::Mount => self.load(),
            UserDetailsEvent::Retry if self.user.error().is_some() => self.load(),
            UserDetailsEvent::Retry => Vec::new(),
            UserDetailsEvent::OpenEdit => vec![Effect::Navigate {
                route: Route::EditUser(self.id.clone()),
                flash: None,
            }],
            UserDetailsEvent::BackToDashboard => vec![Effect::Navigate {
                route: Route::Dashboard,
                flash: None,
            }],
            UserDetailsEvent::RequestDelete => {
                if self.deleting.is_none() {
                    self.confirmation = self.user.ready().map(DeleteConfirmation::new);
                }
                Vec::new()
            }
            UserDetailsEvent::ConfirmDelete => self.confirm_delete(),
            UserDetailsEvent::CancelDelete => {
                self.confirmation = None;
                Vec::new()
            }
            UserDetailsEvent::Dismount => {
                self.dismounted = true;
                Vec::new()
            }
            UserDetailsEvent::Remote(outcome) => self.settle(outcome),
        };
        (self, effects)
    }
}
