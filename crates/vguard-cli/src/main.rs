use vguard_core::logging;
use vguard_core::GuardError;

mod cli;

use crate::cli::CliCommand;

fn main() {
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        match err.downcast_ref::<GuardError>() {
            Some(rejection) => eprintln!(
                "vguard error: {} ({}, HTTP {})",
                rejection,
                rejection.kind().code(),
                rejection.http_status()
            ),
            None => eprintln!("vguard error: {:#}", err),
        }
        std::process::exit(1);
    }
}
