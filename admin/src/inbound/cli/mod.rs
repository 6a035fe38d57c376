//! Terminal host for the views.
//!
//! Each subcommand mounts one view, feeds it the events a person would
//! produce on the matching page and prints what the view settles on.

pub mod args;
pub mod render;

use std::io::{self, BufRead, Write};

use crate::domain::views::{
    CreateUserEvent, CreateUserView, DashboardEvent, DashboardView, Effect, EditUserEvent,
    EditUserView, FormState, UserDetailsEvent, UserDetailsView,
};
use crate::domain::{FlowController, UserRecordId, UserRecordIdError};

pub use args::{Assignment, AssignmentError, Cli, Command};

/// Why a command did not complete.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The id argument is not a usable identifier.
    #[error(transparent)]
    InvalidId(#[from] UserRecordIdError),
    /// The view could not load its data.
    #[error("failed to load: {0}")]
    Load(String),
    /// The draft failed validation; field errors were already printed.
    #[error("user is invalid")]
    InvalidDraft,
    /// The store refused or failed a mutation.
    #[error("{0}")]
    Failed(String),
    /// Writing output or reading the confirmation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Run one subcommand to completion.
///
/// Output goes to `out`; the delete confirmation is read from `input`.
///
/// # Errors
///
/// Returns [`CliError`] when loading fails, the draft is invalid, the store
/// rejects a change or the terminal cannot be written.
pub async fn run(
    command: Command,
    flow: &FlowController,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<(), CliError> {
    match command {
        Command::List => list(flow, out).await,
        Command::Show { id } => show(flow, UserRecordId::new(id)?, out).await,
        Command::Create { assignments } => create(flow, assignments, out).await,
        Command::Edit { id, assignments } => {
            edit(flow, UserRecordId::new(id)?, assignments, out).await
        }
        Command::Delete { id, yes } => {
            delete(flow, UserRecordId::new(id)?, yes, out, input).await
        }
    }
}

async fn list(flow: &FlowController, out: &mut impl Write) -> Result<(), CliError> {
    let (view, _) = flow.drive(DashboardView::new(), DashboardEvent::Mount).await;
    if let Some(message) = view.users().error() {
        return Err(CliError::Load(message.to_owned()));
    }
    render::dashboard(out, &view)?;
    Ok(())
}

async fn show(
    flow: &FlowController,
    id: UserRecordId,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let view = mounted_details(flow, id).await?;
    if let Some(user) = view.user().ready() {
        render::user_details(out, user)?;
    }
    Ok(())
}

async fn create(
    flow: &FlowController,
    assignments: Vec<Assignment>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut view = CreateUserView::new();
    for Assignment { path, value } in assignments {
        (view, _) = flow
            .drive(view, CreateUserEvent::Edit { path, value })
            .await;
    }
    let (view, effects) = flow.drive(view, CreateUserEvent::Submit).await;
    settle_form(view.form(), effects, out)
}

async fn edit(
    flow: &FlowController,
    id: UserRecordId,
    assignments: Vec<Assignment>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (mut view, _) = flow.drive(EditUserView::new(id), EditUserEvent::Mount).await;
    if let Some(message) = view.original().error() {
        return Err(CliError::Load(message.to_owned()));
    }
    for Assignment { path, value } in assignments {
        (view, _) = flow.drive(view, EditUserEvent::Edit { path, value }).await;
    }
    let (view, effects) = flow.drive(view, EditUserEvent::Submit).await;
    settle_form(view.form(), effects, out)
}

async fn delete(
    flow: &FlowController,
    id: UserRecordId,
    yes: bool,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<(), CliError> {
    let view = mounted_details(flow, id).await?;
    let (view, _) = flow.drive(view, UserDetailsEvent::RequestDelete).await;
    let Some(prompt) = view.pending_confirmation().map(|pending| pending.prompt()) else {
        return Ok(());
    };

    if !yes && !confirm(&prompt, out, input)? {
        flow.drive(view, UserDetailsEvent::CancelDelete).await;
        writeln!(out, "Delete cancelled.")?;
        return Ok(());
    }
    let (_, effects) = flow.drive(view, UserDetailsEvent::ConfirmDelete).await;
    surface(effects, out)
}

async fn mounted_details(
    flow: &FlowController,
    id: UserRecordId,
) -> Result<UserDetailsView, CliError> {
    let (view, _) = flow
        .drive(UserDetailsView::new(id), UserDetailsEvent::Mount)
        .await;
    match view.user().error() {
        Some(message) => Err(CliError::Load(message.to_owned())),
        None => Ok(view),
    }
}

fn confirm(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn settle_form(
    form: &FormState,
    effects: Vec<Effect>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if effects.is_empty() && !form.errors().is_empty() {
        writeln!(out, "Please fix the following fields:")?;
        render::field_errors(out, form.errors())?;
        return Err(CliError::InvalidDraft);
    }
    surface(effects, out)
}

fn surface(effects: Vec<Effect>, out: &mut impl Write) -> Result<(), CliError> {
    for effect in effects {
        match effect {
            Effect::Navigate {
                flash: Some(flash), ..
            } => writeln!(out, "{flash}")?,
            Effect::Alert(message) => return Err(CliError::Failed(message)),
            Effect::Navigate { flash: None, .. } | Effect::Remote { .. } => {}
        }
    }
    Ok(())
}
