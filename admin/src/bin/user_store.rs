//! `user-store`: in-memory development store speaking the user REST
//! contract, for running `user-admin` locally.

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use user_admin::config::StoreSettings;
use user_admin::inbound::http::{HttpState, configure};
use user_admin::outbound::memory::InMemoryUserDirectory;
use user_admin::telemetry;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = StoreSettings::load_from_iter([OsString::from("user-store")])
        .wrap_err("failed to load user-store settings")?;

    if let Err(e) = telemetry::init(settings.log_format()?, "info") {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = settings.bind_addr()?;
    let state = web::Data::new(HttpState::new(Arc::new(InMemoryUserDirectory::new(
        Arc::new(DefaultClock),
    ))));

    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "user store listening");
    server.run().await.wrap_err("user store stopped unexpectedly")
}
