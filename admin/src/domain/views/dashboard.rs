//! Dashboard: the list of users with per-row delete.

use crate::domain::{UserRecord, UserRecordId};

use super::{DeleteConfirmation, Effect, LoadState, Outcome, Request, Ticket, Tickets, View};

/// Events handled by [`DashboardView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The view was opened; load the list.
    Mount,
    /// Reload after a failed load.
    Retry,
    /// Ask to delete a listed user; awaits confirmation.
    RequestDelete(UserRecordId),
    /// Confirm the pending delete.
    ConfirmDelete,
    /// Drop the pending delete.
    CancelDelete,
    /// The view was torn down.
    Dismount,
    /// A store call finished.
    Remote(Outcome),
}

impl From<Outcome> for DashboardEvent {
    fn from(value: Outcome) -> Self {
        Self::Remote(value)
    }
}

/// List view state.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    users: LoadState<Vec<UserRecord>>,
    confirmation: Option<DeleteConfirmation>,
    deleting: Option<(UserRecordId, Ticket)>,
    tickets: Tickets,
    dismounted: bool,
}

impl DashboardView {
    /// A view that has not loaded anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load progress of the user list.
    pub fn users(&self) -> &LoadState<Vec<UserRecord>> {
        &self.users
    }

    /// Delete awaiting confirmation, if any.
    pub fn pending_confirmation(&self) -> Option<&DeleteConfirmation> {
        self.confirmation.as_ref()
    }

    /// `true` while the delete of `id` is in flight.
    pub fn is_deleting(&self, id: &UserRecordId) -> bool {
        self.deleting
            .as_ref()
            .is_some_and(|(pending, _)| pending == id)
    }

    /// `"Showing N user(s)"` once the list is loaded and non-empty.
    pub fn summary(&self) -> Option<String> {
        let count = self.users.ready()?.len();
        match count {
            0 => None,
            1 => Some("Showing 1 user".to_owned()),
            _ => Some(format!("Showing {count} users")),
        }
    }

    fn load(&mut self) -> Vec<Effect> {
        let ticket = self.tickets.issue();
        self.users = LoadState::Loading(ticket);
        vec![Effect::Remote {
            ticket,
            request: Request::ListUsers,
        }]
    }

    fn request_delete(&mut self, id: &UserRecordId) {
        if self.deleting.is_some() {
            return;
        }
        self.confirmation = self
            .users
            .ready()
            .and_then(|users| users.iter().find(|user| user.id() == id))
            .map(DeleteConfirmation::new);
    }

    fn confirm_delete(&mut self) -> Vec<Effect> {
        let Some(confirmation) = self.confirmation.take() else {
            return Vec::new();
        };
        let ticket = self.tickets.issue();
        let id = confirmation.id().clone();
        self.deleting = Some((id.clone(), ticket));
        vec![Effect::Remote {
            ticket,
            request: Request::DeleteUser(id),
        }]
    }

    fn settle(&mut self, outcome: Outcome) -> Vec<Effect> {
        let ticket = outcome.ticket();
        if self.users.awaits(ticket) {
            match outcome {
                Outcome::UsersLoaded { users, .. } => self.users = LoadState::Ready(users),
                Outcome::Failed { message, .. } => self.users = LoadState::Failed(message),
                _ => {}
            }
            return Vec::new();
        }

        let Some((id, pending)) = self.deleting.take() else {
            return Vec::new();
        };
        if pending != ticket {
            self.deleting = Some((id, pending));
            return Vec::new();
        }
        match outcome {
            Outcome::UserDeleted { .. } => {
                if let LoadState::Ready(users) = &mut self.users {
                    users.retain(|user| user.id() != &id);
                }
                Vec::new()
            }
            Outcome::Failed { message, .. } => {
                vec![Effect::Alert(format!("Failed to delete user: {message}"))]
            }
            _ => Vec::new(),
        }
    }
}

impl View for DashboardView {
    type Event = DashboardEvent;

    fn apply(mut self, event: DashboardEvent) -> (Self, Vec<Effect>) {
        if self.dismounted {
            return (self, Vec::new());
        }
        let effects = match event {
            DashboardEvent::Mount => self.load(),
            DashboardEvent::Retry if self.users.error().is_some() => self.load(),
            DashboardEvent::Retry => Vec::new(),
            DashboardEvent::RequestDelete(id) => {
                self.request_delete(&id);
                Vec::new()
            }
            DashboardEvent::ConfirmDelete => self.confirm_delete(),
            DashboardEvent::CancelDelete => {
                self.confirmation = None;
                Vec::new()
            }
            DashboardEvent::Dismount => {
                self.dismounted = true;
                Vec::new()
            }
            DashboardEvent::Remote(outcome) => self.settle(outcome),
        };
        (self, effects)
    }
}
