//! Fatal error type.
//!
//! Data-shape problems reachable from ordinary dataset content are never
//! errors: they degrade into result flags and warnings. Only the dataset
//! boundary and invalid engine configuration fail.

use thiserror::Error;

/// Result alias used at the fallible boundaries of the crate.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Errors that abort a resolution request.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The dataset provider could not supply a dataset.
    #[error("timetable dataset unavailable: {message}")]
    Dataset { message: String },

    /// The dataset document is not valid JSON or a slot is malformed.
    #[error("timetable dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A search configuration value is out of range.
    #[error("invalid search configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl TimetableError {
    /// Creates a dataset error.
    pub fn dataset(message: impl Into<String>) -> Self {
        TimetableError::Dataset {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        TimetableError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimetableError::dataset("file missing");
        assert_eq!(err.to_string(), "timetable dataset unavailable: file missing");

        let err = TimetableError::invalid_config("candidate_width", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid search configuration: candidate_width must be positive"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: TimetableError = parse.unwrap_err().into();
        assert!(matches!(err, TimetableError::Json(_)));
    }
}
