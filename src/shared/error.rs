use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts tell a missing package apart from a typo in the
/// coordinate and from a backend outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The requested artifact, version or package does not exist upstream
    NotFound = 1,
    /// Invalid command-line arguments or a malformed coordinate
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Classifies an error chain into an exit code.
    ///
    /// Walks the chain so that context added with `anyhow::Context` does not
    /// hide the underlying [`JarHellError`].
    pub fn from_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(err) = cause.downcast_ref::<JarHellError>() {
                return match err {
                    JarHellError::NotFound { .. } => ExitCode::NotFound,
                    JarHellError::InvalidCoordinate { .. } | JarHellError::InvalidRoute { .. } => {
                        ExitCode::InvalidArguments
                    }
                    _ => ExitCode::ApplicationError,
                };
            }
        }
        ExitCode::ApplicationError
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NotFound => write!(f, "Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum JarHellError {
    /// 404: the coordinate or version does not exist upstream
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 400: the coordinate string is malformed; never sent to the backend
    #[error("Invalid package coordinate: '{input}'\nReason: {reason}\n\n💡 Hint: Use the form groupId:artifactId:version[:classifier], e.g. org.slf4j:slf4j-api:2.0.9")]
    InvalidCoordinate { input: String, reason: String },

    #[error("Invalid route: '{route}'\nReason: {reason}\n\n💡 Hint: Routes look like / or /packages/groupId:artifactId[:version]")]
    InvalidRoute { route: String, reason: String },

    /// Transport failure or a non-2xx status not covered above
    #[error("Server request failed{}: {message}\n\n💡 Hint: Check the server URL and your network connection", status_suffix(.status))]
    Server { status: Option<u16>, message: String },

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and builder inputs
    #[error("Validation error: {message}")]
    Validation { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" with status {}", s))
        .unwrap_or_default()
}

impl JarHellError {
    pub fn not_found(message: impl Into<String>) -> Self {
        JarHellError::NotFound {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, JarHellError::NotFound { .. })
    }
}
