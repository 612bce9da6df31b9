// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits and types for AST nodes.
//!
//! # Node contract
//!
//! Every node embeds a [`NodeMetadata`] (location plus comments) and
//! implements [`AstNode`]:
//!
//! - `children` lists the nodes a generic walk descends into
//! - `is_equal_to` is structural and ignores metadata
//! - `deep_copy` reproduces the node, metadata included
//! - `accept` runs a [`Visitor`] over the node and reports whether the walk
//!   should stop
//!
//! # Node kinds
//!
//! [`NodeRef`] is the closed set of node kinds, borrowed. It lets code hold a
//! heterogeneous list of nodes (e.g. a `children` result) and dispatch on the
//! concrete kind with a `match`.
//!
//! ```text
//! StitchingDsl
//!   ServiceDefinition*
//!     ObjectTypeDefinition*
//!       FieldDefinition*
//!         FieldTransformation?   (leaf)
//! ```

use stitchdsl_core::{Comment, NodeMetadata, SourceLocation};

use super::definition::{FieldDefinition, ObjectTypeDefinition, ServiceDefinition, StitchingDsl};
use super::transformation::FieldTransformation;
use crate::visitor::{
    walk_field_definition, walk_field_transformation, walk_object_type_definition,
    walk_service_definition, walk_stitching_dsl, VisitResult, Visitor,
};

// ============================================================================
// AstNode
// ============================================================================

/// Behaviour shared by all AST nodes.
pub trait AstNode: Clone + PartialEq {
    /// Location and comments of this node.
    fn metadata(&self) -> &NodeMetadata;

    fn location(&self) -> &SourceLocation {
        &self.metadata().location
    }

    fn comments(&self) -> &[Comment] {
        &self.metadata().comments
    }

    /// Direct children in source order.
    fn children(&self) -> Vec<NodeRef<'_>>;

    /// Structural equality, ignoring location and comments.
    fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }

    /// A deep copy of the node, metadata included.
    fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Borrow this node as a [`NodeRef`].
    fn as_node_ref(&self) -> NodeRef<'_>;

    /// Walk this node with `visitor`.
    ///
    /// Returns [`VisitResult::Stop`] if the visitor stopped the walk, and
    /// [`VisitResult::Continue`] otherwise.
    fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult;
}

// ============================================================================
// NodeRef
// ============================================================================

/// A borrowed reference to any AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    StitchingDsl(&'a StitchingDsl),
    ServiceDefinition(&'a ServiceDefinition),
    ObjectTypeDefinition(&'a ObjectTypeDefinition),
    FieldDefinition(&'a FieldDefinition),
    FieldTransformation(&'a FieldTransformation),
}

impl<'a> NodeRef<'a> {
    /// Name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::StitchingDsl(_) => "stitching_dsl",
            NodeRef::ServiceDefinition(_) => "service_definition",
            NodeRef::ObjectTypeDefinition(_) => "object_type_definition",
            NodeRef::FieldDefinition(_) => "field_definition",
            NodeRef::FieldTransformation(_) => "field_transformation",
        }
    }

    pub fn metadata(&self) -> &'a NodeMetadata {
        match *self {
            NodeRef::StitchingDsl(n) => n.metadata(),
            NodeRef::ServiceDefinition(n) => n.metadata(),
            NodeRef::ObjectTypeDefinition(n) => n.metadata(),
            NodeRef::FieldDefinition(n) => n.metadata(),
            NodeRef::FieldTransformation(n) => n.metadata(),
        }
    }

    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::StitchingDsl(n) => n.children(),
            NodeRef::ServiceDefinition(n) => n.children(),
            NodeRef::ObjectTypeDefinition(n) => n.children(),
            NodeRef::FieldDefinition(n) => n.children(),
            NodeRef::FieldTransformation(n) => n.children(),
        }
    }

    /// Walk the referenced node with `visitor`.
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> VisitResult {
        match *self {
            NodeRef::StitchingDsl(n) => walk_stitching_dsl(visitor, n),
            NodeRef::ServiceDefinition(n) => walk_service_definition(visitor, n),
            NodeRef::ObjectTypeDefinition(n) => walk_object_type_definition(visitor, n),
            NodeRef::FieldDefinition(n) => walk_field_definition(visitor, n),
            NodeRef::FieldTransformation(n) => walk_field_transformation(visitor, n),
        }
    }

    /// Count this node and all nodes below it.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(NodeRef::subtree_size)
            .sum::<usize>()
    }
}
