//! Exit codes for the `graphql-resources` CLI.
//!
//! Scripts can tell a bad configuration apart from an unreadable input
//! without parsing error messages.

use graphql_resource_config::ConfigError;
use graphql_resource_middleware::MiddlewareError;

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Configuration error (unreadable, malformed or invalid config file)
    ConfigError = 2,
    /// I/O error (input file or stdin unreadable, stdout closed)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify a command failure.
    ///
    /// Anything caused by the configuration maps to [`ExitCode::ConfigError`],
    /// even when the root cause is an I/O error reading the config file.
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        let from_config = error
            .chain()
            .any(|cause| cause.is::<ConfigError>() || cause.is::<MiddlewareError>());
        if from_config {
            Self::ConfigError
        } else {
            Self::IoError
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
