//! Executes view effects against a [`UserDirectory`].

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::views::{Effect, Outcome, Request, Ticket, View};

/// Runs store calls on behalf of views and feeds the results back.
///
/// The controller holds no view state; hosts own their views and pass them
/// through [`FlowController::drive`].
#[derive(Clone)]
pub struct FlowController {
    directory: Arc<dyn UserDirectory>,
}

impl FlowController {
    /// Build a controller over `directory`.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Perform one store call and wrap its result as an [`Outcome`].
    pub async fn execute(&self, ticket: Ticket, request: &Request) -> Outcome {
        let operation = request.operation();
        let user_id: Option<&str> = request.user_id().map(AsRef::as_ref);
        debug!(operation, user_id, ticket = ticket.get(), "calling user store");

        let result = match request {
            Request::ListUsers => self
                .directory
                .list_users()
                .await
                .map(|users| Outcome::UsersLoaded { ticket, users }),
            Request::GetUser(id) => self
                .directory
                .get_user(id)
                .await
                .map(|user| Outcome::UserLoaded { ticket, user }),
            Request::CreateUser(draft) => self
                .directory
                .create_user(draft)
                .await
                .map(|user| Outcome::UserSaved { ticket, user }),
            Request::UpdateUser(id, draft) => self
                .directory
                .update_user(id, draft)
                .await
                .map(|user| Outcome::UserSaved { ticket, user }),
            Request::DeleteUser(id) => self
                .directory
                .delete_user(id)
                .await
                .map(|()| Outcome::UserDeleted { ticket }),
        };

        result.unwrap_or_else(|error: UserDirectoryError| {
            warn!(operation, user_id, error = %error, "user store call failed");
            Outcome::Failed {
                ticket,
                message: error.to_string(),
            }
        })
    }

    /// Apply `event` to `view`, then run every store call it asks for until
    /// the view settles.
    ///
    /// Returns the final view and the effects left for the host: navigation
    /// and alerts, in the order they were produced.
    pub async fn drive<V: View>(&self, view: V, event: V::Event) -> (V, Vec<Effect>) {
        let (mut view, effects) = view.apply(event);
        let mut queue = VecDeque::from(effects);
        let mut surfaced = Vec::new();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Remote { ticket, request } => {
                    let outcome = self.execute(ticket, &request).await;
                    let (next, more) = view.apply(outcome.into());
                    view = next;
                    queue.extend(more);
                }
                other => surfaced.push(other),
            }
        }
        (view, surfaced)
    }
}
