//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command};

use crate::error::{ApiError, ErrorKind};

const GENERAL_FAILURE: exitcode::ExitCode = 1;

/// Picks the process exit code for an error returned by a command.
///
/// Translation failures map to sysexits codes by kind; anything else is 1.
pub fn exit_code(err: &anyhow::Error) -> exitcode::ExitCode {
    let Some(api_error) = err.downcast_ref::<ApiError>() else {
        return GENERAL_FAILURE;
    };

    match api_error.kind() {
        ErrorKind::Config => exitcode::CONFIG,
        ErrorKind::InvalidInput => exitcode::DATAERR,
        ErrorKind::Auth => exitcode::NOPERM,
        ErrorKind::RateLimited => exitcode::TEMPFAIL,
        ErrorKind::Network => exitcode::UNAVAILABLE,
        ErrorKind::ServerError => exitcode::PROTOCOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_by_kind() {
        let code = |err: ApiError| exit_code(&anyhow::Error::new(err));

        assert_eq!(code(ApiError::config("no key")), exitcode::CONFIG);
        assert_eq!(code(ApiError::invalid_input("empty")), exitcode::DATAERR);
        assert_eq!(code(ApiError::from_status(401, None)), exitcode::NOPERM);
        assert_eq!(code(ApiError::from_status(429, None)), exitcode::TEMPFAIL);
        assert_eq!(code(ApiError::network("down")), exitcode::UNAVAILABLE);
        assert_eq!(code(ApiError::from_status(500, None)), exitcode::PROTOCOL);
    }

    #[test]
    fn test_exit_code_for_context_wrapped_error() {
        let err = anyhow::Error::new(ApiError::config("no key")).context("Translation failed");
        assert_eq!(exit_code(&err), exitcode::CONFIG);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        assert_eq!(exit_code(&anyhow::anyhow!("disk full")), 1);
    }
}
