//! jar-archiver: JAR manifest and pom.properties generation.
//!
//! This is the main entry point for the `jar-archiver` CLI. It parses
//! arguments, installs the log subscriber, dispatches to the appropriate
//! command handler, and handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use jar_archiver::exit_codes;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr so command output on stdout stays machine-readable.
///
/// `RUST_LOG` takes precedence over `--verbose`/`--quiet`.
fn init_logging(cli: &Cli) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(cli.log_level())
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(&cli);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
