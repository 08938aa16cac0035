//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, BackendArgs, Command};

use thiserror::Error;

use crate::error::{ErrorKind, TranslationError};
use crate::translation::Backend;

/// Exit status for a run stopped by Ctrl+C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Failures that belong to the CLI rather than to a backend.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{operation} is not supported by the '{backend}' backend; try --backend google")]
    Unsupported {
        backend: Backend,
        operation: &'static str,
    },

    #[error("Interrupted")]
    Interrupted,
}

/// Maps an error from any command to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(translation_error) = err.downcast_ref::<TranslationError>() {
        return match translation_error.kind() {
            ErrorKind::NoToken => exitcode::NOPERM,
            ErrorKind::BadRequest => exitcode::DATAERR,
            ErrorKind::Other => exitcode::UNAVAILABLE,
        };
    }

    match err.downcast_ref::<CliError>() {
        Some(CliError::Unsupported { .. }) => exitcode::USAGE,
        Some(CliError::Interrupted) => EXIT_INTERRUPTED,
        None => exitcode::CONFIG,
    }
}
