//! `user-admin`: list, inspect, create, edit and delete user records held by
//! a remote user store.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;

use user_admin::config::AdminSettings;
use user_admin::domain::FlowController;
use user_admin::inbound::cli::{self, Cli};
use user_admin::outbound::rest::RestUserDirectory;
use user_admin::telemetry;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Cli::parse();
    let settings = args.merge_into(
        AdminSettings::load_from_iter([OsString::from("user-admin")])
            .wrap_err("failed to load user-admin settings")?,
    );

    if let Err(e) = telemetry::init(settings.log_format()?, "warn") {
        warn!(error = %e, "tracing init failed");
    }

    let directory = RestUserDirectory::new(settings.api_url()?, settings.timeout()?)
        .wrap_err("failed to build the user store client")?;
    let flow = FlowController::new(Arc::new(directory));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build the async runtime")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut input = io::stdin().lock();
    let outcome = runtime.block_on(cli::run(args.command, &flow, &mut out, &mut input));
    out.flush()?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            eprintln!("error: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}
