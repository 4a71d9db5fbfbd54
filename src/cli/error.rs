//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("no match: {0}")]
    NotFound(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::NotFound(_) => crate::exitcode::NOT_FOUND,
            CliError::Infra(e) => match e {
                InfraError::Io { source, .. } => match source.kind() {
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::InvalidInput => {
                        crate::exitcode::NOINPUT
                    }
                    _ => crate::exitcode::IOERR,
                },
                InfraError::Application(ApplicationError::Config { .. }) => {
                    crate::exitcode::CONFIG
                }
                InfraError::Application(ApplicationError::Domain(DomainError::NoRootBlock {
                    ..
                })) => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn given_errors_when_exit_code_then_sysexits_mapping() {
        let missing = CliError::from(InfraError::io("read", io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let denied = CliError::from(InfraError::io(
            "read",
            io::Error::from(io::ErrorKind::PermissionDenied),
        ));
        assert_eq!(denied.exit_code(), crate::exitcode::IOERR);

        let empty = CliError::from(ApplicationError::from(DomainError::NoRootBlock { lines: 0 }));
        assert_eq!(empty.exit_code(), crate::exitcode::DATAERR);

        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);

        assert_eq!(CliError::NotFound("x".into()).exit_code(), crate::exitcode::NOT_FOUND);
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
    }
}
