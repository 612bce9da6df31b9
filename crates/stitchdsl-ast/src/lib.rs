// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! AST for the stitchdsl schema-stitching language.
//!
//! A stitching document declares services, their object types and fields. A
//! field the underlying service cannot answer directly carries a
//! [`FieldTransformation`]: either a rename onto another field
//! ([`FieldMappingDefinition`]) or a call into another service whose result is
//! spliced in ([`InnerServiceHydration`]).
//!
//! # Overview
//!
//! - **Nodes**: immutable, built once by a parser. Every node embeds a
//!   [`NodeMetadata`] and implements [`AstNode`].
//! - **Traversal**: [`visitor::Visitor`] plus `walk_*` functions. Field
//!   transformations are leaves.
//! - **Code Generation**: render nodes back to DSL text with [`Codegen`].
//!
//! # Quick Start
//!
//! ```
//! use stitchdsl_ast::{
//!     AstNode, Codegen, FieldMappingDefinition, FieldTransformation, SourceLocation,
//! };
//!
//! let node = FieldTransformation::mapping(
//!     FieldMappingDefinition::new("legacyId").unwrap(),
//!     SourceLocation::new(1, 1),
//!     Vec::new(),
//! );
//! assert_eq!(
//!     node.field_mapping_definition().map(|m| m.input_name()),
//!     Some("legacyId".to_string())
//! );
//! assert!(node.inner_service_hydration().is_none());
//! assert!(node.children().is_empty());
//! assert_eq!(node.to_dsl(), "=> renamed from legacyId");
//! ```

/// Visitor infrastructure for AST traversal.
pub mod visitor;
pub use visitor::{VisitResult, Visitor};

/// Rendering nodes back to DSL text.
pub mod codegen;
pub use codegen::{Codegen, CodegenState};

mod nodes;

// Re-export all node types for AST construction and traversal
pub use nodes::*;

// Re-export error types
pub use stitchdsl_core::{AstError, AstErrorCode};
