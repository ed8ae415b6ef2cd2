//! Template AST
//!
//! The parts of a parsed template element the view compiler consumes when
//! binding events: the element's own `(event)` bindings and the directives
//! matched on it, each with its metadata and host listeners.

use crate::expression_parser::ast::AST;
use crate::parse_util::ParseSourceSpan;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An event binding, `(target:name)="handler"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundEventAst {
    pub name: String,
    #[serde(default)]
    pub target: Option<String>,
    pub handler: AST,
    #[serde(default)]
    pub source_span: Option<ParseSourceSpan>,
}

impl BoundEventAst {
    /// Builds an event binding from its raw name, where `window:resize`
    /// targets the global `window` scope and `click` the element itself.
    pub fn new(raw_name: &str, handler: AST, source_span: Option<ParseSourceSpan>) -> Self {
        let (name, target) = parse_event_listener_name(raw_name);
        BoundEventAst {
            name,
            target,
            handler,
            source_span,
        }
    }

    pub fn full_name(&self) -> String {
        match &self.target {
            Some(target) => format!("{}:{}", target, self.name),
            None => self.name.clone(),
        }
    }
}

fn parse_event_listener_name(raw_name: &str) -> (String, Option<String>) {
    match raw_name.split_once(':') {
        Some((target, name)) => (name.trim().to_string(), Some(target.trim().to_string())),
        None => (raw_name.to_string(), None),
    }
}

/// Resolved metadata of a directive or component class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileDirectiveMetadata {
    pub type_name: String,
    pub is_component: bool,
    /// Event name to the observable property emitting it, in declaration order.
    pub outputs: IndexMap<String, String>,
}

/// A directive matched on an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveAst {
    pub directive: CompileDirectiveMetadata,
    #[serde(default)]
    pub host_events: Vec<BoundEventAst>,
    #[serde(default)]
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAst {
    pub name: String,
    #[serde(default)]
    pub outputs: Vec<BoundEventAst>,
    #[serde(default)]
    pub directives: Vec<DirectiveAst>,
    #[serde(default)]
    pub source_span: Option<ParseSourceSpan>,
}
