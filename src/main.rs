//! zoomit - Query the Zoom.it deep-zoom API from the command line.
//!
//! Prints the classified outcome of a single request as JSON on stdout.
//! Logs go to stderr.

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoomit::{
    config::{Cli, Command},
    Classified, HttpTransport, Outcome, OutcomeKind, TransportError, ZoomitClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let (base, reference) = match cli.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpTransport::new(cli.timeout()) {
        Ok(transport) => transport,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = ZoomitClient::new(transport, base);
    info!("Querying {} for {}", client.base(), reference);

    match &cli.command {
        Command::Content(_) => report(client.fetch_content_info(&reference).await),
        Command::Dzi(_) => report(client.fetch_dzi_info(&reference).await),
        Command::Thumbnail(_) => report(client.fetch_thumbnail_info(&reference).await),
    }
}

/// Print the outcome and map it to an exit code.
///
/// Ready and processing are successes; everything else, including an
/// unclassified status, is a failure.
fn report<R, F, P>(result: Result<Classified<Outcome<R, F, P>>, TransportError>) -> ExitCode
where
    R: Serialize,
    F: Serialize,
    P: Serialize,
{
    let classified = match result {
        Ok(classified) => classified,
        Err(e) => {
            error!("Request failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let kind = classified.outcome.as_ref().map(|outcome| outcome.kind());
    let output = match classified.to_json() {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to render output: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            error!("Failed to render output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    match kind {
        Some(OutcomeKind::Ready) | Some(OutcomeKind::Processing) => ExitCode::SUCCESS,
        Some(kind) => {
            info!("Outcome: {}", kind.as_str());
            ExitCode::FAILURE
        }
        None => {
            info!(
                "Status {} is not handled by this resource",
                classified.response.status
            );
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "zoomit=debug" } else { "zoomit=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
