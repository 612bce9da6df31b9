// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions for AST traversal.

use crate::nodes::{
    FieldDefinition, FieldTransformation, ObjectTypeDefinition, ServiceDefinition, StitchingDsl,
};

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing, respectively.
///
/// # Usage
///
/// ```ignore
/// visitor_methods! {
///     // Generates visit_field_definition and leave_field_definition
///     field_definition: FieldDefinition,
/// }
/// ```
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Immutable visitor for AST traversal.
///
/// Implement this trait to traverse the AST without modifying it. Each node
/// kind has a corresponding `visit_*` and `leave_*` method pair.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order
///
/// # Control Flow
///
/// - Return `VisitResult::Continue` to traverse into children
/// - Return `VisitResult::SkipChildren` to skip children (but `leave_*` still called)
/// - Return `VisitResult::Stop` to halt traversal immediately
///
/// # Example
///
/// ```
/// use stitchdsl_ast::visitor::{VisitResult, Visitor};
/// use stitchdsl_ast::FieldTransformation;
///
/// struct HydrationCounter {
///     count: usize,
/// }
///
/// impl Visitor for HydrationCounter {
///     fn visit_field_transformation(&mut self, node: &FieldTransformation) -> VisitResult {
///         if node.is_hydration() {
///             self.count += 1;
///         }
///         VisitResult::Continue
///     }
/// }
/// ```
pub trait Visitor {
    visitor_methods! {
        stitching_dsl: StitchingDsl,
        service_definition: ServiceDefinition,
        object_type_definition: ObjectTypeDefinition,
        field_definition: FieldDefinition,
        /// Field transformations are leaves: no walk descends into their payload.
        field_transformation: FieldTransformation,
    }
}
