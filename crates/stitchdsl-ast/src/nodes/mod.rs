// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

mod definition;
mod payload;
mod traits;
mod transformation;

pub use definition::{FieldDefinition, ObjectTypeDefinition, ServiceDefinition, StitchingDsl};
pub use payload::{
    FieldMappingDefinition, InnerServiceHydration, RemoteArgumentDefinition, RemoteArgumentSource,
    RemoteArgumentSourceKind,
};
pub use traits::{AstNode, NodeRef};
pub use transformation::{FieldTransformation, TransformationKind};

// Re-export provenance types so node construction needs a single import.
pub use stitchdsl_core::{Comment, NodeMetadata, SourceLocation, Span};
