use actas_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file under XDG state if possible; stderr otherwise so the CLI still runs.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("actas error: {:#}", err);
        std::process::exit(1);
    }
}
