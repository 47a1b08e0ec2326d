//! Error types for iptrule.

use thiserror::Error;

/// Error type for iptrule operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required rule parameter was not supplied
    #[error("Must specify a {0}")]
    MissingParameter(&'static str),

    /// IP version other than 4 or 6
    #[error("invalid IP version: {0} (expected 4 or 6)")]
    InvalidIpVersion(String),

    /// Match formatter failure
    #[error("{kind} match formatter error: {message}")]
    Formatter {
        kind: &'static str,
        message: String,
    },

    /// Resource registrar failure
    #[error("registrar error: {0}")]
    Registrar(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a formatter error for the given match kind.
    pub fn formatter(kind: &'static str, message: impl Into<String>) -> Self {
        Error::Formatter {
            kind,
            message: message.into(),
        }
    }
}

/// Result type alias for iptrule operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = Error::MissingParameter("cartesian product");
        assert_eq!(err.to_string(), "Must specify a cartesian product");
    }

    #[test]
    fn test_formatter_message() {
        let err = Error::formatter("implicit", "unknown field: colour");
        assert_eq!(
            err.to_string(),
            "implicit match formatter error: unknown field: colour"
        );
    }
}
