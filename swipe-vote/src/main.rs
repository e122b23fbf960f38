//! Swipe Vote Main Entry Point
//!
//! Loads the caption feed for the configured user and runs an interactive
//! voting session on the terminal.

use dotenv::dotenv;
use std::env;
use swipe_vote::{AppConfig, AppError, Dependencies, TerminalSession};
use tokio::io::{self, BufReader};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// Logs go to stderr so they do not interleave with the session on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("swipe_vote=info,swipe_vote_engine=info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "swipe-vote",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();
    info!(
        database = config.database_url.is_some(),
        authenticated = config.user_id.is_some(),
        undo_policy = ?config.engine.undo_policy,
        "Starting swipe vote session"
    );

    let deps = match Dependencies::new(config).await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let engine = deps.build_engine().await?;
    let mut session = TerminalSession::new(engine);
    let mut stdout = io::stdout();

    match session.run(BufReader::new(io::stdin()), &mut stdout).await {
        Ok(()) => {
            info!(votes = session.engine().history().len(), "Session ended");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Session failed");
            Err(e)
        }
    }
}
