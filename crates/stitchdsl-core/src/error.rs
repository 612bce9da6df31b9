//! Error types and error code constants for stitchdsl.
//!
//! AST construction is almost entirely infallible: typed constructors encode
//! their invariants in the type system. `AstError` covers the remaining
//! construction paths that take loosely-typed input from a parser (optional
//! payload slots, raw paths, numeric options).
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid node (malformed input from the caller)
//! - `10`: Internal errors (parser produced an impossible shape)

use std::fmt;

use thiserror::Error;

use crate::types::SourceLocation;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable numeric classification of [`AstError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AstErrorCode {
    /// Malformed node input (empty path, zero batch size).
    InvalidNode = 2,
    /// Internal consistency errors (parser bugs).
    InternalError = 10,
}

impl AstErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for AstErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// AstError
// ============================================================================

/// Errors raised while assembling AST nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A field transformation was built with neither a mapping nor a hydration.
    #[error("field transformation at {location} has no mapping or hydration")]
    MissingTransformation { location: SourceLocation },

    /// A field transformation was built with both a mapping and a hydration.
    #[error("field transformation at {location} has both a mapping and a hydration")]
    ConflictingTransformation { location: SourceLocation },

    /// A field mapping was given an empty input path.
    #[error("field mapping input path must not be empty")]
    EmptyMappingPath,

    /// A path segment was empty (e.g. `author..id`).
    #[error("path '{path}' contains an empty segment")]
    EmptyPathSegment { path: String },

    /// A single path segment contained a `.` separator.
    #[error("path segment '{segment}' must not contain '.'")]
    DottedPathSegment { segment: String },

    /// A hydration batch size of zero was requested.
    #[error("hydration from {service}.{field} has batch size 0")]
    InvalidBatchSize { service: String, field: String },
}

impl From<&AstError> for AstErrorCode {
    fn from(err: &AstError) -> Self {
        match err {
            AstError::MissingTransformation { .. } => AstErrorCode::InternalError,
            AstError::ConflictingTransformation { .. } => AstErrorCode::InternalError,
            AstError::EmptyMappingPath => AstErrorCode::InvalidNode,
            AstError::EmptyPathSegment { .. } => AstErrorCode::InvalidNode,
            AstError::DottedPathSegment { .. } => AstErrorCode::InvalidNode,
            AstError::InvalidBatchSize { .. } => AstErrorCode::InvalidNode,
        }
    }
}

impl AstError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> AstErrorCode {
        AstErrorCode::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformation_shape_errors_are_internal() {
        let err = AstError::MissingTransformation {
            location: SourceLocation::new(4, 9),
        };
        assert_eq!(err.error_code(), AstErrorCode::InternalError);
        assert_eq!(err.error_code().code(), 10);

        let err = AstError::ConflictingTransformation {
            location: SourceLocation::new(4, 9),
        };
        assert_eq!(err.error_code(), AstErrorCode::InternalError);
    }

    #[test]
    fn input_errors_are_invalid_node() {
        assert_eq!(
            AstError::EmptyMappingPath.error_code(),
            AstErrorCode::InvalidNode
        );
        let err = AstError::InvalidBatchSize {
            service: "UserService".to_string(),
            field: "users".to_string(),
        };
        assert_eq!(err.error_code().code(), 2);
        let err = AstError::DottedPathSegment {
            segment: "author.id".to_string(),
        };
        assert_eq!(err.error_code(), AstErrorCode::InvalidNode);
        assert_eq!(err.to_string(), "path segment 'author.id' must not contain '.'");
    }

    #[test]
    fn error_messages_include_location() {
        let err = AstError::MissingTransformation {
            location: SourceLocation::new(4, 9).with_source_name("issues.stitch"),
        };
        assert_eq!(
            err.to_string(),
            "field transformation at issues.stitch:4:9 has no mapping or hydration"
        );
    }

    #[test]
    fn batch_size_message() {
        let err = AstError::InvalidBatchSize {
            service: "UserService".to_string(),
            field: "users".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "hydration from UserService.users has batch size 0"
        );
    }
}
