use thiserror::Error;

/// Failure to isolate or parse a JSON object from raw provider text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("provider returned empty text")]
    Empty,

    #[error("no JSON object found in provider text")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    Malformed(String),
}

/// Why a candidate node failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("node is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("link {index}: {reason}")]
    InvalidLink { index: usize, reason: String },

    #[error("link {index}: invalid type '{value}'")]
    InvalidLinkType { index: usize, value: String },
}

/// Schema violation somewhere in a candidate tree.
///
/// `path` locates the offending node, e.g. `$.children[1].children[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node at {path}: {reason}")]
pub struct ValidationError {
    pub path: String,
    pub reason: ValidationFailure,
}

/// The only failures the generator surfaces to its callers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("domain is required")]
    EmptyDomain,

    #[error("generation cancelled")]
    Cancelled,
}

/// Errors from repository operations (used by trait definitions in skillforge-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_includes_path_and_reason() {
        let err = ValidationError {
            path: "$.children[1]".to_string(),
            reason: ValidationFailure::MissingField("description"),
        };
        assert_eq!(
            err.to_string(),
            "invalid node at $.children[1]: missing required field 'description'"
        );
    }

    #[test]
    fn test_invalid_link_type_display() {
        let reason = ValidationFailure::InvalidLinkType {
            index: 2,
            value: "podcast".to_string(),
        };
        assert_eq!(reason.to_string(), "link 2: invalid type 'podcast'");
    }

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::Malformed("expected value at line 1 column 2".to_string());
        assert!(err.to_string().starts_with("malformed JSON"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Unavailable("pool closed".to_string());
        assert_eq!(err.to_string(), "storage unavailable: pool closed");
    }
}
