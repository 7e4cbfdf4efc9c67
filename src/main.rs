// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! convcheck - branch name and commit message convention checker.

use clap::Parser;
use console::style;
use convcheck::cli::{run, Cli};
use convcheck::ConvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = run(cli) {
        report_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Print the error to stderr; failures show only their reason.
fn report_error(err: &ConvError) {
    match err {
        ConvError::Validation(failure) => {
            eprintln!("{} {}", style("✗").red().bold(), failure.reason);
        }
        other => eprintln!("Error: {}", other),
    }
}

/// Set up logging/tracing.
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_new("convcheck=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
