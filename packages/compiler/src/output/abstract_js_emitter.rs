//! Abstract JavaScript Emitter Module
//!
//! JavaScript-specific emitter functionality: class members and whole
//! statement lists rendered to source text.

use crate::output::abstract_emitter::{escape_identifier, AbstractEmitterVisitor, EmitterVisitorContext};
use crate::output::output_ast as o;

/// Abstract JavaScript emitter visitor
pub struct AbstractJsEmitterVisitor {
    base: AbstractEmitterVisitor,
}

impl AbstractJsEmitterVisitor {
    pub fn new() -> Self {
        AbstractJsEmitterVisitor {
            base: AbstractEmitterVisitor::new(true),
        }
    }

    pub fn visit_all_statements(&mut self, statements: &[o::Statement], ctx: &mut EmitterVisitorContext) {
        self.base.visit_all_statements(statements, ctx);
    }

    /// Renders a method as an ES2015 class member. Modifiers and types are
    /// not representable in JavaScript and are dropped.
    pub fn visit_class_method(&mut self, method: &o::ClassMethod, ctx: &mut EmitterVisitorContext) {
        ctx.print(&escape_identifier(&method.name, false, false), false);
        ctx.print("(", false);
        self.base.visit_params(&method.params, ctx);
        ctx.println(") {");
        ctx.inc_indent();
        self.base.visit_all_statements(&method.body, ctx);
        ctx.dec_indent();
        ctx.println("}");
    }
}

impl Default for AbstractJsEmitterVisitor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn emit_statements(statements: &[o::Statement]) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    AbstractJsEmitterVisitor::new().visit_all_statements(statements, &mut ctx);
    ctx.to_source()
}

pub fn emit_class_methods(methods: &[o::ClassMethod]) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    let mut visitor = AbstractJsEmitterVisitor::new();
    for method in methods {
        visitor.visit_class_method(method, &mut ctx);
    }
    ctx.to_source()
}

pub fn emit_expression(expr: &o::Expression) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    let mut visitor = AbstractEmitterVisitor::new(true);
    expr.visit_expression(&mut visitor, &mut ctx);
    ctx.to_source()
}
