//! Provenance types shared by every AST node.
//!
//! Source locations and comments describe where a node came from. They are
//! carried for diagnostics and formatting, and never take part in structural
//! equality of nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::Span;

// ============================================================================
// SourceLocation
// ============================================================================

/// Position of a node in DSL source text.
///
/// - `line`: 1-indexed line number
/// - `column`: 1-indexed column, UTF-8 bytes
/// - `source_name`: name of the source document (optional)
/// - `span`: byte range of the node (optional)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, UTF-8 bytes).
    pub column: u32,
    /// Source document name, e.g. `issues.stitch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// Byte range covered by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl SourceLocation {
    /// Create a location from line and column only.
    pub fn new(line: u32, column: u32) -> Self {
        SourceLocation {
            line,
            column,
            source_name: None,
            span: None,
        }
    }

    /// Attach a source document name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Attach a byte span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Parse a location from "name:line:col" or "line:col" format.
    ///
    /// Splits from the right so names containing colons still parse.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.rsplitn(3, ':').collect();
        match parts.as_slice() {
            [col, line] => Some(SourceLocation::new(line.parse().ok()?, col.parse().ok()?)),
            [col, line, name] if !name.is_empty() => Some(
                SourceLocation::new(line.parse().ok()?, col.parse().ok()?)
                    .with_source_name(*name),
            ),
            _ => None,
        }
    }

    /// Comparison key for deterministic sorting: (source_name, line, column).
    fn sort_key(&self) -> (Option<&str>, u32, u32) {
        (self.source_name.as_deref(), self.line, self.column)
    }
}

fn span_key(span: Option<Span>) -> Option<(u64, u64)> {
    span.map(|s| (s.start, s.end))
}

impl Default for SourceLocation {
    fn default() -> Self {
        SourceLocation::new(1, 1)
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| span_key(self.span).cmp(&span_key(other.span)))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_name {
            Some(name) => write!(f, "{name}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

// ============================================================================
// Comment
// ============================================================================

/// A comment token captured by the parser and attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text without the leading `#`.
    pub content: String,
    /// Where the comment appeared.
    pub location: SourceLocation,
}

impl Comment {
    pub fn new(content: impl Into<String>, location: SourceLocation) -> Self {
        Comment {
            content: content.into(),
            location,
        }
    }
}

// ============================================================================
// NodeMetadata
// ============================================================================

/// Location and comments embedded in every AST node.
///
/// Comments keep the order in which the parser attached them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Originating position in source text.
    pub location: SourceLocation,
    /// Attached comments, in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl NodeMetadata {
    pub fn new(location: SourceLocation, comments: Vec<Comment>) -> Self {
        NodeMetadata { location, comments }
    }

    /// Metadata with a location and no comments.
    pub fn at(line: u32, column: u32) -> Self {
        NodeMetadata::new(SourceLocation::new(line, column), Vec::new())
    }
}
