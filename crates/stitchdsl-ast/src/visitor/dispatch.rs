// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for AST traversal.
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: Children are visited in declaration order
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)
//!
//! Every walk returns `Stop` if the walk was stopped and `Continue` otherwise.
//! The node whose visitor returned `Stop` emits a `trace` event.

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    FieldDefinition, FieldTransformation, NodeRef, ObjectTypeDefinition, ServiceDefinition,
    StitchingDsl,
};

/// Record where a visitor halted the walk.
fn stopped(node: &'static str, name: &str) -> VisitResult {
    tracing::trace!(node, node_name = name, "walk stopped by visitor");
    VisitResult::Stop
}

/// Walk any node through its [`NodeRef`].
pub fn walk_node<V: Visitor>(visitor: &mut V, node: NodeRef<'_>) -> VisitResult {
    node.accept(visitor)
}

/// Walk a [`StitchingDsl`] document.
///
/// Traversal order:
/// 1. `visit_stitching_dsl`
/// 2. Walk each service (in source order)
/// 3. `leave_stitching_dsl`
pub fn walk_stitching_dsl<V: Visitor>(visitor: &mut V, node: &StitchingDsl) -> VisitResult {
    let result = visitor.visit_stitching_dsl(node);
    match result {
        VisitResult::Stop => return stopped("stitching_dsl", ""),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for service in node.services() {
                if walk_service_definition(visitor, service) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_stitching_dsl(node);
    VisitResult::Continue
}

/// Walk a [`ServiceDefinition`] and its object types.
pub fn walk_service_definition<V: Visitor>(
    visitor: &mut V,
    node: &ServiceDefinition,
) -> VisitResult {
    let result = visitor.visit_service_definition(node);
    match result {
        VisitResult::Stop => return stopped("service_definition", node.name()),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for object_type in node.types() {
                if walk_object_type_definition(visitor, object_type) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_service_definition(node);
    VisitResult::Continue
}

/// Walk an [`ObjectTypeDefinition`] and its fields.
pub fn walk_object_type_definition<V: Visitor>(
    visitor: &mut V,
    node: &ObjectTypeDefinition,
) -> VisitResult {
    let result = visitor.visit_object_type_definition(node);
    match result {
        VisitResult::Stop => return stopped("object_type_definition", node.name()),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for field in node.fields() {
                if walk_field_definition(visitor, field) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_object_type_definition(node);
    VisitResult::Continue
}

/// Walk a [`FieldDefinition`] and its transformation, if any.
pub fn walk_field_definition<V: Visitor>(visitor: &mut V, node: &FieldDefinition) -> VisitResult {
    let result = visitor.visit_field_definition(node);
    match result {
        VisitResult::Stop => return stopped("field_definition", node.name()),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if let Some(transformation) = node.transformation() {
                if walk_field_transformation(visitor, transformation) == VisitResult::Stop {
                    return VisitResult::Stop;
                }
            }
        }
    }
    visitor.leave_field_definition(node);
    VisitResult::Continue
}

/// Walk a [`FieldTransformation`].
///
/// Leaf node: the mapping or hydration payload is not walked.
pub fn walk_field_transformation<V: Visitor>(
    visitor: &mut V,
    node: &FieldTransformation,
) -> VisitResult {
    if visitor.visit_field_transformation(node) == VisitResult::Stop {
        return stopped("field_transformation", node.kind().as_str());
    }
    visitor.leave_field_transformation(node);
    VisitResult::Continue
}
