// ⚠️ Lookup errors - one taxonomy for loader, validation and handlers

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Backing file missing or unreadable
    #[error("BIN dataset unavailable at {path:?}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File read but rows do not fit the expected columns
    #[error("BIN dataset malformed at line {line}: {reason}")]
    DataMalformed { line: u64, reason: String },

    /// Missing parameter, bad body, or size limit exceeded
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),
}

impl LookupError {
    /// True for failures that come from the dataset rather than the caller
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            LookupError::DataUnavailable { .. } | LookupError::DataMalformed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_classification() {
        let unavailable = LookupError::DataUnavailable {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let malformed = LookupError::DataMalformed {
            line: 3,
            reason: "wrong column count".to_string(),
        };

        assert!(unavailable.is_data_error());
        assert!(malformed.is_data_error());
        assert!(!LookupError::InvalidInput("bad".to_string()).is_data_error());
        assert!(!LookupError::NotFound("BIN not found".to_string()).is_data_error());
    }

    #[test]
    fn test_display_messages() {
        let malformed = LookupError::DataMalformed {
            line: 7,
            reason: "empty number".to_string(),
        };
        assert_eq!(
            malformed.to_string(),
            "BIN dataset malformed at line 7: empty number"
        );
        assert_eq!(
            LookupError::NotFound("BIN not found".to_string()).to_string(),
            "BIN not found"
        );
    }
}
