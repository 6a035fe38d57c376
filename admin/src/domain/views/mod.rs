//! Per-view state machines.
//!
//! Each view is a plain state object with a pure transition
//! (`View::apply`) returning the next state and the effects to perform.
//! Effects that reach the store carry a [`Ticket`]; the matching
//! [`Outcome`] is fed back as an event and applied only while that ticket is
//! still the one the view is waiting for. A dismounted view waits for
//! nothing, so late results are dropped instead of applied to a stale view.

mod create;
mod dashboard;
mod details;
mod edit;
mod form;

use std::fmt;

use crate::domain::{UserRecord, UserRecordId, ValidatedDraft};

pub use create::{CreateUserEvent, CreateUserView};
pub use dashboard::{DashboardEvent, DashboardView};
pub use details::{UserDetailsEvent, UserDetailsView};
pub use edit::{EditUserEvent, EditUserView};
pub use form::FormState;

/// Flash shown on the dashboard after a successful create.
pub const USER_CREATED: &str = "User created successfully!";
/// Flash shown on the details page after a successful update.
pub const USER_UPDATED: &str = "User updated successfully!";
/// Flash shown on the dashboard after a delete from the details page.
pub const USER_DELETED: &str = "User deleted successfully!";

/// Request token identifying one outstanding store call of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw sequence number, for logs.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic ticket source owned by one view.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tickets {
    issued: u64,
}

impl Tickets {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }
}

/// Navigation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Dashboard,
    /// `/users/new`
    NewUser,
    /// `/users/<id>`
    UserDetails(UserRecordId),
    /// `/users/<id>/edit`
    EditUser(UserRecordId),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dashboard => f.write_str("/"),
            Self::NewUser => f.write_str("/users/new"),
            Self::UserDetails(id) => write!(f, "/users/{id}"),
            Self::EditUser(id) => write!(f, "/users/{id}/edit"),
        }
    }
}

/// A call against the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// List every user.
    ListUsers,
    /// Fetch one user.
    GetUser(UserRecordId),
    /// Create a user from a validated draft.
    CreateUser(ValidatedDraft),
    /// Replace a user's editable fields.
    UpdateUser(UserRecordId, ValidatedDraft),
    /// Delete a user.
    DeleteUser(UserRecordId),
}

impl Request {
    /// Short operation name, for logs.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::GetUser(_) => "get_user",
            Self::CreateUser(_) => "create_user",
            Self::UpdateUser(..) => "update_user",
            Self::DeleteUser(_) => "delete_user",
        }
    }

    /// Target record, when the call addresses one.
    pub const fn user_id(&self) -> Option<&UserRecordId> {
        match self {
            Self::ListUsers | Self::CreateUser(_) => None,
            Self::GetUser(id) | Self::UpdateUser(id, _) | Self::DeleteUser(id) => Some(id),
        }
    }
}

/// Work a view asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Call the store; feed the [`Outcome`] back as an event.
    Remote {
        /// Token the outcome must carry to be applied.
        ticket: Ticket,
        /// The call to make.
        request: Request,
    },
    /// Leave the view.
    Navigate {
        /// Destination.
        route: Route,
        /// One-off message for the destination view.
        flash: Option<String>,
    },
    /// Blocking alert for a failed mutation.
    Alert(String),
}

/// Result of a [`Effect::Remote`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `ListUsers` succeeded.
    UsersLoaded {
        /// Ticket of the request.
        ticket: Ticket,
        /// Records in store order.
        users: Vec<UserRecord>,
    },
    /// `GetUser` succeeded.
    UserLoaded {
        /// Ticket of the request.
        ticket: Ticket,
        /// The record.
        user: UserRecord,
    },
    /// `CreateUser` or `UpdateUser` succeeded.
    UserSaved {
        /// Ticket of the request.
        ticket: Ticket,
        /// The stored record.
        user: UserRecord,
    },
    /// `DeleteUser` succeeded.
    UserDeleted {
        /// Ticket of the request.
        ticket: Ticket,
    },
    /// Any call failed.
    Failed {
        /// Ticket of the request.
        ticket: Ticket,
        /// Human-readable reason.
        message: String,
    },
}

impl Outcome {
    /// Ticket of the originating request.
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::UsersLoaded { ticket, .. }
            | Self::UserLoaded { ticket, .. }
            | Self::UserSaved { ticket, .. }
            | Self::UserDeleted { ticket }
            | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Load progress of the data a view displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the store.
    Loading(Ticket),
    /// Data available.
    Ready(T),
    /// The load failed; the view offers a retry.
    Failed(String),
}

impl<T> LoadState<T> {
    /// `true` while waiting for the store.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Loaded data, if any.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub(crate) fn awaits(&self, ticket: Ticket) -> bool {
        matches!(self, Self::Loading(pending) if *pending == ticket)
    }
}

/// Pending delete awaiting explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    id: UserRecordId,
    name: String,
}

impl DeleteConfirmation {
    pub(crate) fn new(user: &UserRecord) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_owned(),
        }
    }

    /// Record to delete.
    pub fn id(&self) -> &UserRecordId {
        &self.id
    }

    /// Question to put to the user.
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.name)
    }
}

/// A view driven by events.
pub trait View: Sized {
    /// Events the view reacts to; store outcomes convert into it.
    type Event: From<Outcome>;

    /// Apply one event, returning the next state and the effects to run.
    fn apply(self, event: Self::Event) -> (Self, Vec<Effect>);
}

#[cfg(test)]
mod tests {
    //! Shared view primitives.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn tickets_are_issued_in_order() {
        let mut tickets = Tickets::default();
        let first = tickets.issue();
        let second = tickets.issue();
        assert!(first < second);
        assert_eq!(second.get(), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[rstest]
    fn routes_render_as_paths() {
        let id = UserRecordId::new("7").expect("id");
        assert_eq!(Route::Dashboard.to_string(), "/");
        assert_eq!(Route::NewUser.to_string(), "/users/new");
        assert_eq!(Route::UserDetails(id.clone()).to_string(), "/users/7");
        assert_eq!(Route::EditUser(id).to_string(), "/users/7/edit");
    }

    #[rstest]
    fn load_state_only_awaits_its_own_ticket() {
        let mut tickets = Tickets::default();
        let old = tickets.issue();
        let current = tickets.issue();
        let state: LoadState<()> = LoadState::Loading(current);
        assert!(state.awaits(current));
        assert!(!state.awaits(old));
        assert!(!LoadState::<()>::Failed("boom".to_owned()).awaits(current));
    }
}
