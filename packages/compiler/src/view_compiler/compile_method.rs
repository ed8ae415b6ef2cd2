//! Statement accumulator for a generated method body.
//!
//! When debug info is enabled, a `this.debug(nodeIndex, line, col)` call is
//! inserted before the first statement added after each debug state reset,
//! so runtime errors can be mapped back to the template.

use crate::output::output_ast as o;
use crate::parse_util::ParseSourceSpan;
use crate::view_compiler::constants::ViewMethods;

#[derive(Debug, Clone, PartialEq)]
struct DebugState {
    node_index: usize,
    source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct CompileMethod {
    debug_enabled: bool,
    pending_state: Option<DebugState>,
    body_statements: Vec<o::Statement>,
}

impl CompileMethod {
    pub fn new(debug_enabled: bool) -> Self {
        CompileMethod {
            debug_enabled,
            pending_state: None,
            body_statements: Vec::new(),
        }
    }

    /// Statements added from now on belong to `node_index` / `source_span`.
    pub fn reset_debug_info(&mut self, node_index: usize, source_span: Option<&ParseSourceSpan>) {
        self.pending_state = Some(DebugState {
            node_index,
            source_span: source_span.cloned(),
        });
    }

    fn update_debug_context_if_needed(&mut self) {
        let Some(state) = self.pending_state.take() else {
            return;
        };
        if !self.debug_enabled {
            return;
        }
        let (line, col) = match &state.source_span {
            Some(span) => (o::literal(span.start.line), o::literal(span.start.col)),
            None => (o::null_expr(), o::null_expr()),
        };
        let debug_call = o::this_expr().call_method(
            ViewMethods::DEBUG,
            vec![*o::literal(state.node_index), *line, *col],
        );
        self.body_statements.push(debug_call.to_stmt());
    }

    pub fn add_stmt(&mut self, stmt: o::Statement) {
        self.update_debug_context_if_needed();
        self.body_statements.push(stmt);
    }

    pub fn add_stmts(&mut self, stmts: impl IntoIterator<Item = o::Statement>) {
        self.update_debug_context_if_needed();
        self.body_statements.extend(stmts);
    }

    pub fn statements(&self) -> &[o::Statement] {
        &self.body_statements
    }

    pub fn is_empty(&self) -> bool {
        self.body_statements.is_empty()
    }

    pub fn finish(self) -> Vec<o::Statement> {
        self.body_statements
    }
}
