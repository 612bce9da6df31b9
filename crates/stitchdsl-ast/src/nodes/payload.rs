// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Transformation payloads.
//!
//! These are the values a [`FieldTransformation`](super::FieldTransformation)
//! carries. They are plain data: no source metadata of their own and no
//! traversal participation. Consumers that know the variant inspect them
//! directly.

use std::fmt;

use serde::{Deserialize, Serialize};
use stitchdsl_core::AstError;

// ============================================================================
// Paths
// ============================================================================

/// Split a dotted path, rejecting empty input and empty segments.
fn parse_path(raw: &str) -> Result<Vec<String>, AstError> {
    if raw.is_empty() {
        return Err(AstError::EmptyMappingPath);
    }
    let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
    validate_path(&segments)?;
    Ok(segments)
}

/// A path is non-empty and every segment is a non-empty name without `.`.
///
/// With no dotted segments, two paths that print the same are equal.
fn validate_path(segments: &[String]) -> Result<(), AstError> {
    if segments.is_empty() {
        return Err(AstError::EmptyMappingPath);
    }
    if segments.iter().any(String::is_empty) {
        return Err(AstError::EmptyPathSegment {
            path: segments.join("."),
        });
    }
    if let Some(segment) = segments.iter().find(|s| s.contains('.')) {
        return Err(AstError::DottedPathSegment {
            segment: segment.clone(),
        });
    }
    Ok(())
}

/// Build a one-segment path from a single name.
fn single_segment(name: String) -> Result<Vec<String>, AstError> {
    if name.is_empty() {
        return Err(AstError::EmptyMappingPath);
    }
    let path = vec![name];
    validate_path(&path)?;
    Ok(path)
}

// ============================================================================
// FieldMappingDefinition
// ============================================================================

/// Rename of a field onto a differently-named field of the underlying service.
///
/// The input path is non-empty. A path with more than one segment pulls a
/// nested value (`author.id`). Every constructor, deserialization included,
/// enforces the path rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFieldMappingDefinition")]
pub struct FieldMappingDefinition {
    input_path: Vec<String>,
}

#[derive(Deserialize)]
struct RawFieldMappingDefinition {
    input_path: Vec<String>,
}

impl TryFrom<RawFieldMappingDefinition> for FieldMappingDefinition {
    type Error = AstError;

    fn try_from(raw: RawFieldMappingDefinition) -> Result<Self, AstError> {
        FieldMappingDefinition::from_path(raw.input_path)
    }
}

impl FieldMappingDefinition {
    /// Map onto a single, top-level field of the underlying service.
    ///
    /// # Errors
    /// Rejects an empty name, and a name containing `.` (use [`parse`](Self::parse)
    /// for nested paths).
    pub fn new(input_name: impl Into<String>) -> Result<Self, AstError> {
        Ok(FieldMappingDefinition {
            input_path: single_segment(input_name.into())?,
        })
    }

    /// Map onto a (possibly nested) path.
    pub fn from_path(input_path: Vec<String>) -> Result<Self, AstError> {
        validate_path(&input_path)?;
        Ok(FieldMappingDefinition { input_path })
    }

    /// Map onto a dotted path such as `author.id`.
    pub fn parse(dotted: &str) -> Result<Self, AstError> {
        Ok(FieldMappingDefinition {
            input_path: parse_path(dotted)?,
        })
    }

    pub fn input_path(&self) -> &[String] {
        &self.input_path
    }

    /// The input path rendered with dots.
    pub fn input_name(&self) -> String {
        self.input_path.join(".")
    }

    /// True when the mapping reads below the top level of the source object.
    pub fn is_nested(&self) -> bool {
        self.input_path.len() > 1
    }
}

impl fmt::Display for FieldMappingDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input_name())
    }
}

// ============================================================================
// Remote arguments
// ============================================================================

/// Where a hydration call argument takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteArgumentSourceKind {
    /// A field of the object being hydrated (`$source.authorId`).
    ObjectField,
    /// An argument of the hydrated field itself (`$argument.first`).
    FieldArgument,
    /// A value from the execution context (`$context.tenant`).
    Context,
}

impl RemoteArgumentSourceKind {
    /// The DSL variable prefix for this source.
    pub fn prefix(&self) -> &'static str {
        match self {
            RemoteArgumentSourceKind::ObjectField => "$source",
            RemoteArgumentSourceKind::FieldArgument => "$argument",
            RemoteArgumentSourceKind::Context => "$context",
        }
    }
}

/// Value source of a hydration argument: a kind plus a non-empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRemoteArgumentSource")]
pub struct RemoteArgumentSource {
    kind: RemoteArgumentSourceKind,
    path: Vec<String>,
}

#[derive(Deserialize)]
struct RawRemoteArgumentSource {
    kind: RemoteArgumentSourceKind,
    path: Vec<String>,
}

impl TryFrom<RawRemoteArgumentSource> for RemoteArgumentSource {
    type Error = AstError;

    fn try_from(raw: RawRemoteArgumentSource) -> Result<Self, AstError> {
        RemoteArgumentSource::new(raw.kind, raw.path)
    }
}

impl RemoteArgumentSource {
    pub fn new(kind: RemoteArgumentSourceKind, path: Vec<String>) -> Result<Self, AstError> {
        validate_path(&path)?;
        Ok(RemoteArgumentSource { kind, path })
    }

    /// `$source.<dotted>`
    pub fn object_field(dotted: &str) -> Result<Self, AstError> {
        Ok(RemoteArgumentSource {
            kind: RemoteArgumentSourceKind::ObjectField,
            path: parse_path(dotted)?,
        })
    }

    /// `$argument.<name>`
    pub fn field_argument(name: impl Into<String>) -> Result<Self, AstError> {
        Ok(RemoteArgumentSource {
            kind: RemoteArgumentSourceKind::FieldArgument,
            path: single_segment(name.into())?,
        })
    }

    /// `$context.<name>`
    pub fn context(name: impl Into<String>) -> Result<Self, AstError> {
        Ok(RemoteArgumentSource {
            kind: RemoteArgumentSourceKind::Context,
            path: single_segment(name.into())?,
        })
    }

    pub fn kind(&self) -> RemoteArgumentSourceKind {
        self.kind
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Display for RemoteArgumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.prefix(), self.path.join("."))
    }
}

/// A named argument passed to the hydration call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteArgumentDefinition {
    name: String,
    source: RemoteArgumentSource,
}

impl RemoteArgumentDefinition {
    pub fn new(name: impl Into<String>, source: RemoteArgumentSource) -> Self {
        RemoteArgumentDefinition {
            name: name.into(),
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &RemoteArgumentSource {
        &self.source
    }
}

impl fmt::Display for RemoteArgumentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.source)
    }
}

// ============================================================================
// InnerServiceHydration
// ============================================================================

/// Resolve a field by calling a top-level field of another service.
///
/// Arguments keep declaration order. When `batch_size` is set the call is
/// batched and `object_identifier` names the field used to match results
/// back to source objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInnerServiceHydration")]
pub struct InnerServiceHydration {
    service_name: String,
    top_level_field: String,
    arguments: Vec<RemoteArgumentDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    object_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    batch_size: Option<u32>,
}

#[derive(Deserialize)]
struct RawInnerServiceHydration {
    service_name: String,
    top_level_field: String,
    #[serde(default)]
    arguments: Vec<RemoteArgumentDefinition>,
    #[serde(default)]
    object_identifier: Option<String>,
    #[serde(default)]
    batch_size: Option<u32>,
}

impl TryFrom<RawInnerServiceHydration> for InnerServiceHydration {
    type Error = AstError;

    fn try_from(raw: RawInnerServiceHydration) -> Result<Self, AstError> {
        let hydration = InnerServiceHydration {
            service_name: raw.service_name,
            top_level_field: raw.top_level_field,
            arguments: raw.arguments,
            object_identifier: raw.object_identifier,
            batch_size: None,
        };
        match raw.batch_size {
            Some(batch_size) => hydration.with_batch_size(batch_size),
            None => Ok(hydration),
        }
    }
}

impl InnerServiceHydration {
    pub fn new(service_name: impl Into<String>, top_level_field: impl Into<String>) -> Self {
        InnerServiceHydration {
            service_name: service_name.into(),
            top_level_field: top_level_field.into(),
            arguments: Vec::new(),
            object_identifier: None,
            batch_size: None,
        }
    }

    /// Append an argument to the call.
    pub fn with_argument(mut self, argument: RemoteArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_object_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.object_identifier = Some(identifier.into());
        self
    }

    /// Batch the call in groups of `batch_size`.
    ///
    /// # Errors
    /// Returns [`AstError::InvalidBatchSize`] for a batch size of zero.
    pub fn with_batch_size(mut self, batch_size: u32) -> Result<Self, AstError> {
        if batch_size == 0 {
            return Err(AstError::InvalidBatchSize {
                service: self.service_name,
                field: self.top_level_field,
            });
        }
        self.batch_size = Some(batch_size);
        Ok(self)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn top_level_field(&self) -> &str {
        &self.top_level_field
    }

    pub fn arguments(&self) -> &[RemoteArgumentDefinition] {
        &self.arguments
    }

    /// Look up an argument by name.
    pub fn argument(&self, name: &str) -> Option<&RemoteArgumentDefinition> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn object_identifier(&self) -> Option<&str> {
        self.object_identifier.as_deref()
    }

    pub fn batch_size(&self) -> Option<u32> {
        self.batch_size
    }

    pub fn is_batched(&self) -> bool {
        self.batch_size.is_some()
    }

    /// Paths of the source object that the call arguments read.
    ///
    /// These must be fetched from the underlying service before hydrating.
    pub fn source_field_paths(&self) -> impl Iterator<Item = &[String]> {
        self.arguments
            .iter()
            .filter(|arg| arg.source.kind == RemoteArgumentSourceKind::ObjectField)
            .map(|arg| arg.source.path())
    }

    /// `Service.field`, the call target.
    pub fn target(&self) -> String {
        format!("{}.{}", self.service_name, self.top_level_field)
    }
}
