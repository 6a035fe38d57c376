//! New-user form.

use crate::domain::FieldPath;

use super::{Effect, FormState, Outcome, Request, Route, Tickets, USER_CREATED, View};

/// Events handled by [`CreateUserView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserEvent {
    /// A field changed.
    Edit {
        /// Field that changed.
        path: FieldPath,
        /// New raw value.
        value: String,
    },
    /// Validate and send the draft.
    Submit,
    /// Abandon the form.
    Cancel,
    /// The view was torn down.
    Dismount,
    /// A store call finished.
    Remote(Outcome),
}

impl From<Outcome> for CreateUserEvent {
    fn from(value: Outcome) -> Self {
        Self::Remote(value)
    }
}

/// New-user form state.
#[derive(Debug, Clone, Default)]
pub struct CreateUserView {
    form: FormState,
    tickets: Tickets,
    dismounted: bool,
}

impl CreateUserView {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft, errors and submission state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    fn submit(&mut self) -> Vec<Effect> {
        self.form
            .submit(&mut self.tickets)
            .map(|(ticket, draft)| Effect::Remote {
                ticket,
                request: Request::CreateUser(draft),
            })
            .into_iter()
            .collect()
    }

    fn settle(&mut self, outcome: Outcome) -> Vec<Effect> {
        if !self.form.awaits(outcome.ticket()) {
            return Vec::new();
        }
        self.form.settle();
        match outcome {
            Outcome::UserSaved { .. } => vec![Effect::Navigate {
                route: Route::Dashboard,
                flash: Some(USER_CREATED.to_owned()),
            }],
            Outcome::Failed { message, .. } => {
                vec![Effect::Alert(format!("Failed to create user: {message}"))]
            }
            _ => Vec::new(),
        }
    }
}

impl View for CreateUserView {
    type Event = CreateUserEvent;

    fn apply(mut self, event: CreateUserEvent) -> (Self, Vec<Effect>) {
        if self.dismounted {
            return (self, Vec::new());
        }
        let effects = match event {
            CreateUserEvent::Edit { path, value } => {
                self.form.edit(path, value);
                Vec::new()
            }
            CreateUserEvent::Submit => self.submit(),
            CreateUserEvent::Cancel => vec![Effect::Navigate {
                route: Route::Dashboard,
                flash: None,
            }],
            CreateUserEvent::Dismount => {
                self.dismounted = true;
                Vec::new()
            }
            CreateUserEvent::Remote(outcome) => self.settle(outcome),
        };
        (self, effects)
    }
}
