// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! TransformationCollector visitor for field transformation extraction.
//!
//! This module provides a [`TransformationCollector`] visitor that walks a
//! [`StitchingDsl`] document and records every transformed field with the
//! service and type that own it.
//!
//! # Usage
//!
//! ```ignore
//! use stitchdsl_ast::visitor::TransformationCollector;
//!
//! for info in TransformationCollector::collect(&dsl) {
//!     println!("{}.{} -> {} {}", info.type_name, info.field, info.kind, info.target);
//! }
//! ```

use serde::{Deserialize, Serialize};
use stitchdsl_core::SourceLocation;

use super::dispatch::walk_stitching_dsl;
use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    AstNode, FieldDefinition, FieldTransformation, ObjectTypeDefinition, ServiceDefinition,
    StitchingDsl, TransformationKind,
};

/// The kind of transformation on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformationInfoKind {
    /// `=> renamed from ...`
    Mapping,
    /// `=> hydrated from ...`
    Hydration,
}

impl TransformationInfoKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformationInfoKind::Mapping => "mapping",
            TransformationInfoKind::Hydration => "hydration",
        }
    }
}

impl std::fmt::Display for TransformationInfoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Information about a single transformed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationInfo {
    /// Service declaring the field.
    pub service: String,
    /// Object type declaring the field.
    pub type_name: String,
    /// Field name.
    pub field: String,
    /// Mapping or hydration.
    pub kind: TransformationInfoKind,
    /// Mapped input path (`author.id`) or hydration call target (`UserService.user`).
    pub target: String,
    /// Location of the transformation.
    pub location: SourceLocation,
}

/// A visitor that collects transformation information from a document.
///
/// Results are in source order.
#[derive(Debug, Default)]
pub struct TransformationCollector {
    infos: Vec<TransformationInfo>,
    service: Option<String>,
    type_name: Option<String>,
    field: Option<String>,
    /// When set, only hydrations calling into this service are recorded.
    hydration_target: Option<String>,
}

impl TransformationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect transformations from a parsed document.
    pub fn collect(dsl: &StitchingDsl) -> Vec<TransformationInfo> {
        let mut collector = TransformationCollector::new();
        walk_stitching_dsl(&mut collector, dsl);
        tracing::debug!(
            count = collector.infos.len(),
            "collected field transformations"
        );
        collector.into_infos()
    }

    /// Collect only hydrations that call into `service_name`.
    pub fn hydrations_into(dsl: &StitchingDsl, service_name: &str) -> Vec<TransformationInfo> {
        let mut collector = TransformationCollector {
            hydration_target: Some(service_name.to_string()),
            ..Self::default()
        };
        walk_stitching_dsl(&mut collector, dsl);
        tracing::debug!(
            service = service_name,
            count = collector.infos.len(),
            "collected hydrations"
        );
        collector.into_infos()
    }

    fn records(&self, kind: &TransformationKind) -> bool {
        match (&self.hydration_target, kind) {
            (None, _) => true,
            (Some(service), TransformationKind::Hydration(hydration)) => {
                hydration.service_name() == service
            }
            (Some(_), TransformationKind::Mapping(_)) => false,
        }
    }

    /// Get the collected infos, consuming the collector.
    pub fn into_infos(self) -> Vec<TransformationInfo> {
        self.infos
    }
}

impl Visitor for TransformationCollector {
    fn visit_service_definition(&mut self, node: &ServiceDefinition) -> VisitResult {
        self.service = Some(node.name().to_string());
        VisitResult::Continue
    }

    fn leave_service_definition(&mut self, _node: &ServiceDefinition) {
        self.service = None;
    }

    fn visit_object_type_definition(&mut self, node: &ObjectTypeDefinition) -> VisitResult {
        self.type_name = Some(node.name().to_string());
        VisitResult::Continue
    }

    fn leave_object_type_definition(&mut self, _node: &ObjectTypeDefinition) {
        self.type_name = None;
    }

    fn visit_field_definition(&mut self, node: &FieldDefinition) -> VisitResult {
        if node.transformation().is_none() {
            return VisitResult::SkipChildren;
        }
        self.field = Some(node.name().to_string());
        VisitResult::Continue
    }

    fn leave_field_definition(&mut self, _node: &FieldDefinition) {
        self.field = None;
    }

    fn visit_field_transformation(&mut self, node: &FieldTransformation) -> VisitResult {
        if !self.records(node.kind()) {
            return VisitResult::Continue;
        }
        let (kind, target) = match node.kind() {
            TransformationKind::Mapping(mapping) => {
                (TransformationInfoKind::Mapping, mapping.input_name())
            }
            TransformationKind::Hydration(hydration) => {
                (TransformationInfoKind::Hydration, hydration.target())
            }
        };
        tracing::trace!(
            field = self.field.as_deref().unwrap_or_default(),
            kind = kind.as_str(),
            %target,
            "field transformation"
        );
        self.infos.push(TransformationInfo {
            service: self.service.clone().unwrap_or_default(),
            type_name: self.type_name.clone().unwrap_or_default(),
            field: self.field.clone().unwrap_or_default(),
            kind,
            target,
            location: node.location().clone(),
        });
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{
        FieldMappingDefinition, InnerServiceHydration, NodeMetadata, RemoteArgumentDefinition,
        RemoteArgumentSource,
    };

    fn field(name: &str, line: u32) -> FieldDefinition {
        FieldDefinition::new(name, "String", NodeMetadata::at(line, 9))
    }

    fn sample() -> StitchingDsl {
        let issue = ObjectTypeDefinition::new(
            "Issue",
            vec![
                field("id", 3),
                field("key", 4).with_transformation(FieldTransformation::mapping(
                    FieldMappingDefinition::parse("details.key").unwrap(),
                    SourceLocation::new(4, 23),
                    Vec::new(),
                )),
                field("author", 5).with_transformation(FieldTransformation::hydration(
                    InnerServiceHydration::new("UserService", "user").with_argument(
                        RemoteArgumentDefinition::new(
                            "id",
                            RemoteArgumentSource::object_field("authorId").unwrap(),
                        ),
                    ),
                    SourceLocation::new(5, 22),
                    Vec::new(),
                )),
                field("project", 6).with_transformation(FieldTransformation::hydration(
                    InnerServiceHydration::new("ProjectService", "project"),
                    SourceLocation::new(6, 23),
                    Vec::new(),
                )),
            ],
            NodeMetadata::at(2, 5),
        );
        StitchingDsl::new(
            vec![
                ServiceDefinition::new("IssueService", vec![issue], NodeMetadata::at(1, 1)),
                ServiceDefinition::new("UserService", Vec::new(), NodeMetadata::at(9, 1)),
            ],
            NodeMetadata::default(),
        )
    }

    #[test]
    fn test_collects_in_source_order() {
        let infos = TransformationCollector::collect(&sample());
        let summary: Vec<(&str, TransformationInfoKind, &str)> = infos
            .iter()
            .map(|i| (i.field.as_str(), i.kind, i.target.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("key", TransformationInfoKind::Mapping, "details.key"),
                ("author", TransformationInfoKind::Hydration, "UserService.user"),
                ("project", TransformationInfoKind::Hydration, "ProjectService.project"),
            ]
        );
    }

    #[test]
    fn test_records_owner_and_location() {
        let infos = TransformationCollector::collect(&sample());
        let author = &infos[1];
        assert_eq!(author.service, "IssueService");
        assert_eq!(author.type_name, "Issue");
        assert_eq!(author.location, SourceLocation::new(5, 22));
    }

    #[test]
    fn test_hydrations_into_service() {
        let infos = TransformationCollector::hydrations_into(&sample(), "UserService");
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].field, "author");
        assert!(TransformationCollector::hydrations_into(&sample(), "Nope").is_empty());
    }

    #[test]
    fn test_hydrations_into_matches_whole_service_name() {
        let users = ObjectTypeDefinition::new(
            "Team",
            vec![field("lead", 3).with_transformation(FieldTransformation::hydration(
                InnerServiceHydration::new("Legacy.UserService", "user"),
                SourceLocation::new(3, 20),
                Vec::new(),
            ))],
            NodeMetadata::at(2, 5),
        );
        let dsl = StitchingDsl::new(
            vec![ServiceDefinition::new("TeamService", vec![users], NodeMetadata::at(1, 1))],
            NodeMetadata::default(),
        );
        assert!(TransformationCollector::hydrations_into(&dsl, "Legacy").is_empty());
        let infos = TransformationCollector::hydrations_into(&dsl, "Legacy.UserService");
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].target, "Legacy.UserService.user");
    }

    #[test]
    fn test_walk_then_into_infos() {
        let mut collector = TransformationCollector::new();
        walk_stitching_dsl(&mut collector, &sample());
        let infos = collector.into_infos();
        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].location, SourceLocation::new(4, 23));
    }

    #[test]
    fn test_empty_document() {
        assert!(TransformationCollector::collect(&StitchingDsl::default()).is_empty());
    }

    #[test]
    fn test_info_serializes_kind_as_snake_case() {
        let infos = TransformationCollector::collect(&sample());
        let json = serde_json::to_value(&infos[0]).unwrap();
        assert_eq!(json["kind"], "mapping");
        assert_eq!(json["target"], "details.key");
    }
}
