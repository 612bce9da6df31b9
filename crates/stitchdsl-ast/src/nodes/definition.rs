// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Definition nodes enclosing field transformations.
//!
//! ```text
//! service IssueService {
//!     type Issue {
//!         id: ID
//!         author: User => hydrated from UserService.user(id: $source.authorId)
//!     }
//! }
//! ```
//!
//! All nodes are built once and are immutable afterwards. Builders consume
//! `self`; there are no `&mut` accessors.

use serde::{Deserialize, Serialize};
use stitchdsl_core::NodeMetadata;

use super::traits::{AstNode, NodeRef};
use super::transformation::FieldTransformation;
use crate::visitor::{
    walk_field_definition, walk_object_type_definition, walk_service_definition,
    walk_stitching_dsl, VisitResult, Visitor,
};

// ============================================================================
// StitchingDsl
// ============================================================================

/// Root of a parsed DSL document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StitchingDsl {
    services: Vec<ServiceDefinition>,
    metadata: NodeMetadata,
}

impl StitchingDsl {
    pub fn new(services: Vec<ServiceDefinition>, metadata: NodeMetadata) -> Self {
        StitchingDsl { services, metadata }
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    /// Find a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|s| s.name == name)
    }

    /// All field transformations in the document, in source order.
    pub fn transformations(&self) -> impl Iterator<Item = &FieldTransformation> {
        self.services
            .iter()
            .flat_map(|s| s.types.iter())
            .flat_map(|t| t.fields.iter())
            .filter_map(|f| f.transformation.as_ref())
    }
}

impl PartialEq for StitchingDsl {
    fn eq(&self, other: &Self) -> bool {
        self.services == other.services
    }
}

impl Eq for StitchingDsl {}

impl AstNode for StitchingDsl {
    fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.services.iter().map(NodeRef::ServiceDefinition).collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::StitchingDsl(self)
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_stitching_dsl(visitor, self)
    }
}

// ============================================================================
// ServiceDefinition
// ============================================================================

/// A backend service and the types it contributes to the unified schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDefinition {
    name: String,
    types: Vec<ObjectTypeDefinition>,
    metadata: NodeMetadata,
}

impl ServiceDefinition {
    pub fn new(
        name: impl Into<String>,
        types: Vec<ObjectTypeDefinition>,
        metadata: NodeMetadata,
    ) -> Self {
        ServiceDefinition {
            name: name.into(),
            types,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[ObjectTypeDefinition] {
        &self.types
    }

    /// Find an object type by name.
    pub fn object_type(&self, name: &str) -> Option<&ObjectTypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }
}

impl PartialEq for ServiceDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.types == other.types
    }
}

impl Eq for ServiceDefinition {}

impl AstNode for ServiceDefinition {
    fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.types.iter().map(NodeRef::ObjectTypeDefinition).collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ServiceDefinition(self)
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_service_definition(visitor, self)
    }
}

// ============================================================================
// ObjectTypeDefinition
// ============================================================================

/// An object type with its fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectTypeDefinition {
    name: String,
    fields: Vec<FieldDefinition>,
    metadata: NodeMetadata,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>, metadata: NodeMetadata) -> Self {
        ObjectTypeDefinition {
            name: name.into(),
            fields,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for ObjectTypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for ObjectTypeDefinition {}

impl AstNode for ObjectTypeDefinition {
    fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.fields.iter().map(NodeRef::FieldDefinition).collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ObjectTypeDefinition(self)
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_object_type_definition(visitor, self)
    }
}

// ============================================================================
// FieldDefinition
// ============================================================================

/// A field of an object type, optionally carrying a transformation.
///
/// `type_ref` is the field type as written (`ID`, `User`, `[Comment!]!`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    name: String,
    type_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transformation: Option<FieldTransformation>,
    metadata: NodeMetadata,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>, metadata: NodeMetadata) -> Self {
        FieldDefinition {
            name: name.into(),
            type_ref: type_ref.into(),
            transformation: None,
            metadata,
        }
    }

    /// Attach the field's transformation.
    pub fn with_transformation(mut self, transformation: FieldTransformation) -> Self {
        self.transformation = Some(transformation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &str {
        &self.type_ref
    }

    pub fn transformation(&self) -> Option<&FieldTransformation> {
        self.transformation.as_ref()
    }
}

impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_ref == other.type_ref
            && self.transformation == other.transformation
    }
}

impl Eq for FieldDefinition {}

impl AstNode for FieldDefinition {
    fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        self.transformation
            .iter()
            .map(NodeRef::FieldTransformation)
            .collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::FieldDefinition(self)
    }

    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        walk_field_definition(visitor, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::payload::{FieldMappingDefinition, InnerServiceHydration};
    use stitchdsl_core::{Comment, SourceLocation};

    fn issue_service(comment: Option<&str>) -> ServiceDefinition {
        let comments = comment
            .map(|c| vec![Comment::new(c, SourceLocation::new(1, 1))])
            .unwrap_or_default();
        ServiceDefinition::new(
            "IssueService",
            vec![ObjectTypeDefinition::new(
                "Issue",
                vec![
                    FieldDefinition::new("id", "ID", NodeMetadata::at(3, 9)),
                    FieldDefinition::new("key", "String", NodeMetadata::at(4, 9))
                        .with_transformation(FieldTransformation::mapping(
                            FieldMappingDefinition::new("issueKey").unwrap(),
                            SourceLocation::new(4, 23),
                            Vec::new(),
                        )),
                    FieldDefinition::new("author", "User", NodeMetadata::at(5, 9))
                        .with_transformation(FieldTransformation::hydration(
                            InnerServiceHydration::new("UserService", "user"),
                            SourceLocation::new(5, 22),
                            Vec::new(),
                        )),
                ],
                NodeMetadata::at(2, 5),
            )],
            NodeMetadata::new(SourceLocation::new(2, 1), comments),
        )
    }

    #[test]
    fn test_lookup_helpers() {
        let dsl = StitchingDsl::new(vec![issue_service(None)], NodeMetadata::default());
        let issue = dsl
            .service("IssueService")
            .and_then(|s| s.object_type("Issue"))
            .unwrap();
        assert_eq!(issue.fields().len(), 3);
        assert!(issue.field("id").unwrap().transformation().is_none());
        assert!(issue.field("key").unwrap().transformation().unwrap().is_mapping());
        assert!(dsl.service("UserService").is_none());
        assert!(issue.field("missing").is_none());
    }

    #[test]
    fn test_children_follow_structure() {
        let service = issue_service(None);
        assert_eq!(service.children().len(), 1);
        let issue = &service.types()[0];
        assert_eq!(issue.children().len(), 3);

        let id = issue.field("id").unwrap();
        assert!(id.children().is_empty());

        let author = issue.field("author").unwrap();
        let children = author.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind_name(), "field_transformation");
        assert!(children[0].children().is_empty());
    }

    #[test]
    fn test_subtree_size_stops_at_transformation() {
        let dsl = StitchingDsl::new(vec![issue_service(None)], NodeMetadata::default());
        // dsl + service + type + 3 fields + 2 transformations
        assert_eq!(dsl.as_node_ref().subtree_size(), 8);
    }

    #[test]
    fn test_transformations_in_source_order() {
        let dsl = StitchingDsl::new(vec![issue_service(None)], NodeMetadata::default());
        let kinds: Vec<&str> = dsl.transformations().map(|t| t.kind().as_str()).collect();
        assert_eq!(kinds, vec!["mapping", "hydration"]);
    }

    #[test]
    fn test_equality_ignores_metadata_at_every_level() {
        let a = StitchingDsl::new(vec![issue_service(None)], NodeMetadata::default());
        let b = StitchingDsl::new(
            vec![issue_service(Some(" owned by the issues team"))],
            NodeMetadata::at(10, 1),
        );
        assert!(a.is_equal_to(&b));
        assert_ne!(a.services()[0].metadata(), b.services()[0].metadata());
    }

    #[test]
    fn test_equality_sees_transformation_changes() {
        let plain = FieldDefinition::new("key", "String", NodeMetadata::at(4, 9));
        let mapped = plain.clone().with_transformation(FieldTransformation::mapping(
            FieldMappingDefinition::new("issueKey").unwrap(),
            SourceLocation::new(4, 23),
            Vec::new(),
        ));
        assert_ne!(plain, mapped);
        assert_eq!(mapped.deep_copy(), mapped);
    }
}
