// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The field transformation node.
//!
//! A [`FieldTransformation`] annotates a field that the underlying service
//! cannot answer directly. It holds exactly one [`TransformationKind`]:
//!
//! ```text
//! authorId: ID => renamed from author.id                         (Mapping)
//! author: User => hydrated from UserService.user(id: $source.authorId)  (Hydration)
//! ```
//!
//! The node is a traversal leaf: walkers visit it but never descend into its
//! payload. Equality compares the variant and payload only; location and
//! comments are provenance.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use stitchdsl_core::{AstError, Comment, NodeMetadata, SourceLocation};

use super::payload::{FieldMappingDefinition, InnerServiceHydration};
use super::traits::{AstNode, NodeRef};
use crate::visitor::{walk_field_transformation, VisitResult, Visitor};

/// The transformation a field carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "definition", rename_all = "snake_case")]
pub enum TransformationKind {
    /// Rename onto a field of the underlying service.
    Mapping(FieldMappingDefinition),
    /// Resolve through a call into another service.
    Hydration(InnerServiceHydration),
}

impl TransformationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformationKind::Mapping(_) => "mapping",
            TransformationKind::Hydration(_) => "hydration",
        }
    }
}

impl From<FieldMappingDefinition> for TransformationKind {
    fn from(def: FieldMappingDefinition) -> Self {
        TransformationKind::Mapping(def)
    }
}

impl From<InnerServiceHydration> for TransformationKind {
    fn from(def: InnerServiceHydration) -> Self {
        TransformationKind::Hydration(def)
    }
}

/// An immutable field annotation holding a mapping or a hydration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldTransformation {
    #[serde(rename = "transformation")]
    kind: TransformationKind,
    metadata: NodeMetadata,
}

impl FieldTransformation {
    pub fn new(kind: impl Into<TransformationKind>, metadata: NodeMetadata) -> Self {
        FieldTransformation {
            kind: kind.into(),
            metadata,
        }
    }

    /// A transformation that renames the field.
    pub fn mapping(
        definition: FieldMappingDefinition,
        location: SourceLocation,
        comments: Vec<Comment>,
    ) -> Self {
        Self::new(definition, NodeMetadata::new(location, comments))
    }

    /// A transformation that hydrates the field from another service.
    pub fn hydration(
        definition: InnerServiceHydration,
        location: SourceLocation,
        comments: Vec<Comment>,
    ) -> Self {
        Self::new(definition, NodeMetadata::new(location, comments))
    }

    /// Build from the two optional slots a parser fills in.
    ///
    /// Exactly one slot must be populated.
    ///
    /// # Errors
    /// - [`AstError::MissingTransformation`] if both slots are empty
    /// - [`AstError::ConflictingTransformation`] if both are populated
    pub fn from_parts(
        mapping: Option<FieldMappingDefinition>,
        hydration: Option<InnerServiceHydration>,
        metadata: NodeMetadata,
    ) -> Result<Self, AstError> {
        match (mapping, hydration) {
            (Some(def), None) => Ok(Self::new(def, metadata)),
            (None, Some(def)) => Ok(Self::new(def, metadata)),
            (None, None) => {
                tracing::debug!(location = %metadata.location, "transformation without payload");
                Err(AstError::MissingTransformation {
                    location: metadata.location,
                })
            }
            (Some(_), Some(_)) => {
                tracing::debug!(location = %metadata.location, "transformation with two payloads");
                Err(AstError::ConflictingTransformation {
                    location: metadata.location,
                })
            }
        }
    }

    pub fn kind(&self) -> &TransformationKind {
        &self.kind
    }

    /// Consume the node, keeping only its payload.
    pub fn into_kind(self) -> TransformationKind {
        self.kind
    }

    /// The mapping payload, if this node is a mapping.
    pub fn field_mapping_definition(&self) -> Option<&FieldMappingDefinition> {
        match &self.kind {
            TransformationKind::Mapping(def) => Some(def),
            TransformationKind::Hydration(_) => None,
        }
    }

    /// The hydration payload, if this node is a hydration.
    pub fn inner_service_hydration(&self) -> Option<&InnerServiceHydration> {
        match &self.kind {
            TransformationKind::Mapping(_) => None,
            TransformationKind::Hydration(def) => Some(def),
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.kind, TransformationKind::Mapping(_))
    }

    pub fn is_hydration(&self) -> bool {
        matches!(self.kind, TransformationKind::Hydration(_))
    }
}

impl PartialEq for FieldTransformation {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for FieldTransformation {}

impl Hash for FieldTransformation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl AstNode for FieldTransformation {
    fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::FieldTransformation(self)
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_field_transformation(visitor, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::payload::{RemoteArgumentDefinition, RemoteArgumentSource};

    fn legacy_id() -> FieldTransformation {
        FieldTransformation::mapping(
            FieldMappingDefinition::new("legacyId").unwrap(),
            SourceLocation::new(1, 1),
            Vec::new(),
        )
    }

    fn user_hydration() -> FieldTransformation {
        FieldTransformation::hydration(
            InnerServiceHydration::new("UserService", "user"),
            SourceLocation::new(2, 1),
            Vec::new(),
        )
    }

    #[test]
    fn test_mapping_accessors() {
        let node = legacy_id();
        assert_eq!(
            node.field_mapping_definition().map(|m| m.input_name()),
            Some("legacyId".to_string())
        );
        assert!(node.inner_service_hydration().is_none());
        assert!(node.children().is_empty());
        assert!(node.is_mapping());
        assert!(!node.is_hydration());
        assert_eq!(node.kind().as_str(), "mapping");
    }

    #[test]
    fn test_hydration_accessors() {
        let node = user_hydration();
        assert_eq!(
            node.inner_service_hydration().map(|h| h.service_name()),
            Some("UserService")
        );
        assert_eq!(
            node.inner_service_hydration().map(|h| h.top_level_field()),
            Some("user")
        );
        assert!(node.field_mapping_definition().is_none());
        assert!(node.children().is_empty());
        assert!(node.is_hydration());
    }

    #[test]
    fn test_accessor_returns_constructed_payload() {
        let hydration = InnerServiceHydration::new("UserService", "user").with_argument(
            RemoteArgumentDefinition::new(
                "id",
                RemoteArgumentSource::object_field("authorId").unwrap(),
            ),
        );
        let node = FieldTransformation::hydration(
            hydration.clone(),
            SourceLocation::new(7, 5),
            Vec::new(),
        );
        assert_eq!(node.inner_service_hydration(), Some(&hydration));
        assert_eq!(
            node.into_kind(),
            TransformationKind::Hydration(hydration)
        );
    }

    #[test]
    fn test_equality_ignores_provenance() {
        let a = legacy_id();
        let b = FieldTransformation::mapping(
            FieldMappingDefinition::new("legacyId").unwrap(),
            SourceLocation::new(40, 12).with_source_name("other.stitch"),
            vec![Comment::new(" renamed upstream", SourceLocation::new(39, 12))],
        );
        assert_eq!(a, a);
        assert!(a.is_equal_to(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        use std::collections::HashSet;

        let moved = FieldTransformation::mapping(
            FieldMappingDefinition::new("legacyId").unwrap(),
            SourceLocation::new(40, 12).with_source_name("other.stitch"),
            vec![Comment::new(" renamed upstream", SourceLocation::new(39, 12))],
        );
        let set: HashSet<FieldTransformation> =
            [legacy_id(), moved, user_hydration()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&legacy_id()));
    }

    #[test]
    fn test_equality_distinguishes_variant_and_payload() {
        assert_ne!(legacy_id(), user_hydration());
        let other_mapping = FieldTransformation::mapping(
            FieldMappingDefinition::new("id").unwrap(),
            SourceLocation::new(1, 1),
            Vec::new(),
        );
        assert_ne!(legacy_id(), other_mapping);
    }

    #[test]
    fn test_deep_copy_keeps_variant_payload_and_metadata() {
        let original = FieldTransformation::hydration(
            InnerServiceHydration::new("UserService", "user"),
            SourceLocation::new(2, 1),
            vec![Comment::new(" via users", SourceLocation::new(1, 1))],
        );
        let copy = original.deep_copy();
        assert_eq!(copy, original);
        assert_eq!(copy.metadata(), original.metadata());
        assert_eq!(copy.comments().len(), 1);
        assert!(!std::ptr::eq(&copy, &original));
    }

    #[test]
    fn test_from_parts_accepts_exactly_one_payload() {
        let node = FieldTransformation::from_parts(
            Some(FieldMappingDefinition::new("legacyId").unwrap()),
            None,
            NodeMetadata::at(1, 1),
        )
        .unwrap();
        assert_eq!(node, legacy_id());

        let node = FieldTransformation::from_parts(
            None,
            Some(InnerServiceHydration::new("UserService", "user")),
            NodeMetadata::at(2, 1),
        )
        .unwrap();
        assert_eq!(node, user_hydration());
    }

    #[test]
    fn test_from_parts_rejects_neither() {
        let err = FieldTransformation::from_parts(None, None, NodeMetadata::at(3, 4)).unwrap_err();
        assert_eq!(
            err,
            AstError::MissingTransformation {
                location: SourceLocation::new(3, 4)
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_both() {
        let err = FieldTransformation::from_parts(
            Some(FieldMappingDefinition::new("legacyId").unwrap()),
            Some(InnerServiceHydration::new("UserService", "user")),
            NodeMetadata::at(3, 4),
        )
        .unwrap_err();
        assert!(matches!(err, AstError::ConflictingTransformation { .. }));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(legacy_id()).unwrap();
        assert_eq!(json["transformation"]["kind"], "mapping");
        assert_eq!(json["transformation"]["definition"]["input_path"][0], "legacyId");
        assert_eq!(json["metadata"]["location"]["line"], 1);
    }

    #[test]
    fn test_nodes_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldTransformation>();
    }
}
