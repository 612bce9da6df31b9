// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for AST traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order
//!
//! A walk descends document → services → object types → fields → field
//! transformation, and stops there: transformation payloads are not nodes.
//!
//! # Visitor Pattern
//!
//! ```ignore
//! use stitchdsl_ast::visitor::{walk_stitching_dsl, VisitResult, Visitor};
//!
//! struct FieldCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for FieldCounter {
//!     fn visit_field_definition(&mut self, _node: &FieldDefinition) -> VisitResult {
//!         self.count += 1;
//!         VisitResult::Continue
//!     }
//! }
//!
//! let mut counter = FieldCounter { count: 0 };
//! walk_stitching_dsl(&mut counter, &dsl);
//! ```

mod dispatch;
mod traits;
mod transformation_collector;

pub use dispatch::*;
pub use traits::{VisitResult, Visitor};
pub use transformation_collector::{
    TransformationCollector, TransformationInfo, TransformationInfoKind,
};
