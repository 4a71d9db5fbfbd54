//! Infrastructure-level errors (wraps application errors)

use std::path::Path;

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;

/// Extension trait for converting `io::Result` to `InfraResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read project", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> InfraResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> InfraResult<T> {
        self.map_err(|e| InfraError::io(format!("{}: {}", action, path.display()), e))
    }
}
