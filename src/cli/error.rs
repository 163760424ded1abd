//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
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
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { .. }) => exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::InputNotFound(_) => exitcode::NOINPUT,
                ApplicationError::Domain(_) | ApplicationError::Parse { .. } => exitcode::DATAERR,
                ApplicationError::OutputExists(_) | ApplicationError::OutputIsInput(_) => {
                    exitcode::CANTCREAT
                }
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::IOERR,
                ApplicationError::Serialize(_) => exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_follow_sysexits() {
        let missing: CliError = ApplicationError::InputNotFound(PathBuf::from("x.willow")).into();
        assert_eq!(missing.exit_code(), exitcode::NOINPUT);

        let malformed: CliError =
            ApplicationError::from(DomainError::MalformedGraph("cycle".into())).into();
        assert_eq!(malformed.exit_code(), exitcode::DATAERR);

        let exists: CliError = ApplicationError::OutputExists(PathBuf::from("x.yew")).into();
        assert_eq!(exists.exit_code(), exitcode::CANTCREAT);

        assert_eq!(CliError::Usage("no file".into()).exit_code(), exitcode::USAGE);
    }
}
