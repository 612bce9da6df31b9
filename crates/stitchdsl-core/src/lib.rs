//! Core infrastructure for stitchdsl.
//!
//! This crate provides the language-agnostic pieces shared by every AST node:
//! - Byte spans and line/column source locations
//! - Comment tokens attached to nodes
//! - Node metadata (location plus comments), embedded by composition
//! - Error types and error codes

pub mod error;
pub mod span;
pub mod types;

pub use error::{AstError, AstErrorCode};
pub use span::Span;
pub use types::{Comment, NodeMetadata, SourceLocation};
