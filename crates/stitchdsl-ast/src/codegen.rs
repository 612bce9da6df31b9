// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Rendering AST nodes back to DSL text.
//!
//! Output is normalized: one field per line, indentation from
//! [`CodegenState::default_indent`], comments as `#` lines above the node they
//! are attached to. A field transformation renders inline after its field:
//!
//! ```text
//! key: String => renamed from details.key
//! author: User => hydrated from UserService.user(id: $source.authorId) object identified by id, batch size 50
//! ```

use std::fmt;

use stitchdsl_core::Comment;

use crate::nodes::{
    AstNode, FieldDefinition, FieldTransformation, InnerServiceHydration, ObjectTypeDefinition,
    ServiceDefinition, StitchingDsl, TransformationKind,
};

/// Output buffer and layout settings for [`Codegen`].
#[derive(Debug)]
pub struct CodegenState<'a> {
    pub tokens: String,
    pub indent_tokens: Vec<&'a str>,
    pub default_newline: &'a str,
    pub default_indent: &'a str,
}

impl Default for CodegenState<'_> {
    fn default() -> Self {
        Self {
            tokens: String::new(),
            indent_tokens: Vec::new(),
            default_newline: "\n",
            default_indent: "    ",
        }
    }
}

impl<'a> CodegenState<'a> {
    /// State using `indent` for each nesting level.
    pub fn with_indent(indent: &'a str) -> Self {
        Self {
            default_indent: indent,
            ..Self::default()
        }
    }

    pub fn indent(&mut self, v: &'a str) {
        self.indent_tokens.push(v);
    }

    pub fn dedent(&mut self) {
        self.indent_tokens.pop();
    }

    pub fn add_indent(&mut self) {
        for token in &self.indent_tokens {
            self.tokens.push_str(token);
        }
    }

    pub fn add_token(&mut self, tok: &str) {
        self.tokens.push_str(tok);
    }

    pub fn add_newline(&mut self) {
        self.tokens.push_str(self.default_newline);
    }

    /// Emit each comment on its own indented line.
    ///
    /// Multi-line comment content becomes one `#` line per line of text.
    pub fn add_comments(&mut self, comments: &[Comment]) {
        for comment in comments {
            if comment.content.is_empty() {
                self.add_comment_line("");
            }
            for line in comment.content.lines() {
                self.add_comment_line(line);
            }
        }
    }

    fn add_comment_line(&mut self, line: &str) {
        self.add_indent();
        self.add_token("#");
        self.add_token(line);
        self.add_newline();
    }
}

impl fmt::Display for CodegenState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens)
    }
}

/// Render a node into a [`CodegenState`].
pub trait Codegen<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>);

    /// Render with default settings.
    fn to_dsl(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.to_string()
    }
}

impl<'a> Codegen<'a> for StitchingDsl {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_comments(self.comments());
        for (i, service) in self.services().iter().enumerate() {
            if i > 0 {
                state.add_newline();
            }
            service.codegen(state);
        }
    }
}

impl<'a> Codegen<'a> for ServiceDefinition {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_comments(self.comments());
        state.add_indent();
        state.add_token("service ");
        state.add_token(self.name());
        state.add_token(" {");
        state.add_newline();

        state.indent(state.default_indent);
        for (i, object_type) in self.types().iter().enumerate() {
            if i > 0 {
                state.add_newline();
            }
            object_type.codegen(state);
        }
        state.dedent();

        state.add_indent();
        state.add_token("}");
        state.add_newline();
    }
}

impl<'a> Codegen<'a> for ObjectTypeDefinition {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_comments(self.comments());
        state.add_indent();
        state.add_token("type ");
        state.add_token(self.name());
        state.add_token(" {");
        state.add_newline();

        state.indent(state.default_indent);
        for field in self.fields() {
            field.codegen(state);
        }
        state.dedent();

        state.add_indent();
        state.add_token("}");
        state.add_newline();
    }
}

impl<'a> Codegen<'a> for FieldDefinition {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_comments(self.comments());
        if let Some(transformation) = self.transformation() {
            state.add_comments(transformation.comments());
        }
        state.add_indent();
        state.add_token(self.name());
        state.add_token(": ");
        state.add_token(self.type_ref());
        if let Some(transformation) = self.transformation() {
            state.add_token(" ");
            transformation.codegen(state);
        }
        state.add_newline();
    }
}

/// Inline form only; comments are emitted by the owning field.
impl<'a> Codegen<'a> for FieldTransformation {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        match self.kind() {
            TransformationKind::Mapping(mapping) => {
                state.add_token("=> renamed from ");
                state.add_token(&mapping.input_name());
            }
            TransformationKind::Hydration(hydration) => {
                state.add_token("=> hydrated from ");
                hydration_codegen(hydration, state);
            }
        }
    }
}

fn hydration_codegen(hydration: &InnerServiceHydration, state: &mut CodegenState<'_>) {
    state.add_token(&hydration.target());
    if !hydration.arguments().is_empty() {
        state.add_token("(");
        for (i, argument) in hydration.arguments().iter().enumerate() {
            if i > 0 {
                state.add_token(", ");
            }
            state.add_token(&argument.to_string());
        }
        state.add_token(")");
    }
    if let Some(identifier) = hydration.object_identifier() {
        state.add_token(" object identified by ");
        state.add_token(identifier);
    }
    if let Some(batch_size) = hydration.batch_size() {
        state.add_token(if hydration.object_identifier().is_some() {
            ", batch size "
        } else {
            " batch size "
        });
        state.add_token(&batch_size.to_string());
    }
}
