//! Error taxonomy for status-context resolution.
//!
//! Only configuration loading is fatal to a caller. Expansion failures are
//! recovered inside [`crate::label::LabelExpander`] and never escape
//! [`crate::assembler::resolve_notifications`].

use std::path::PathBuf;

/// Errors raised by a macro-expansion capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    #[error("unknown token macro: {token}")]
    UnknownToken { token: String },

    #[error("malformed token macro at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    #[error("macro expansion failed: {0}")]
    Failed(String),
}

/// Errors produced while loading or validating notification settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("contextLabel must not be blank")]
    BlankContextLabel,

    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_error_display() {
        let err = ExpansionError::UnknownToken {
            token: "BRANCH".to_string(),
        };
        assert!(err.to_string().contains("unknown token macro"));
        assert!(err.to_string().contains("BRANCH"));

        let err = ExpansionError::Malformed {
            offset: 4,
            reason: "unterminated '${'".to_string(),
        };
        assert!(err.to_string().contains("byte 4"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::BlankContextLabel;
        assert!(err.to_string().contains("contextLabel"));

        let err = ConfigError::Read {
            path: PathBuf::from("/missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing.toml"));
        assert!(msg.contains("gone"));
    }
}
