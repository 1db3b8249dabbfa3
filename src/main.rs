//! NexusOnyx auth console
//!
//! Drives the sign-in/sign-up form from stdin against an in-memory identity
//! service.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use nexus_auth::config::AuthConfig;
use nexus_auth::{console, FormController, FormMode, InMemoryIdentityService};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AuthConfig::load();

    // Initialize logging
    let filter = config
        .as_ref()
        .map(|c| c.log_filter().to_string())
        .unwrap_or_else(|_| nexus_auth::config::DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = config.unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {err:#}");
        AuthConfig::default()
    });

    let mode = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<FormMode>()?,
        None => config.mode(),
    };
    tracing::info!(%mode, "starting auth console");

    let service = Arc::new(InMemoryIdentityService::new());
    let controller = FormController::with_rules(mode, config.rules, service);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    console::run(controller, stdin, &mut stdout).await
}
