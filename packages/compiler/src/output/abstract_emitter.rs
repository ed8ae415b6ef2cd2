//! Abstract Emitter Module
//!
//! Base emitter functionality for code generation

use crate::output::output_ast as o;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

const INDENT_WITH: &str = "  ";

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$ɵ][0-9a-zA-Z_$ɵ]*$").expect("valid identifier regex"));

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

lazy_static::lazy_static! {
    pub static ref BINARY_OPERATORS: HashMap<o::BinaryOperator, &'static str> = {
        let mut m = HashMap::new();
        m.insert(o::BinaryOperator::And, "&&");
        m.insert(o::BinaryOperator::Bigger, ">");
        m.insert(o::BinaryOperator::BiggerEquals, ">=");
        m.insert(o::BinaryOperator::BitwiseOr, "|");
        m.insert(o::BinaryOperator::BitwiseAnd, "&");
        m.insert(o::BinaryOperator::Divide, "/");
        m.insert(o::BinaryOperator::Equals, "==");
        m.insert(o::BinaryOperator::Identical, "===");
        m.insert(o::BinaryOperator::Lower, "<");
        m.insert(o::BinaryOperator::LowerEquals, "<=");
        m.insert(o::BinaryOperator::Minus, "-");
        m.insert(o::BinaryOperator::Modulo, "%");
        m.insert(o::BinaryOperator::Multiply, "*");
        m.insert(o::BinaryOperator::NotEquals, "!=");
        m.insert(o::BinaryOperator::NotIdentical, "!==");
        m.insert(o::BinaryOperator::NullishCoalesce, "??");
        m.insert(o::BinaryOperator::Or, "||");
        m.insert(o::BinaryOperator::Plus, "+");
        m
    };
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map_or(true, |l| l.parts.is_empty())
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
    }

    pub fn to_source(&self) -> String {
        let lines: &[EmittedLine] = match self.lines.last() {
            Some(last) if last.parts.is_empty() => &self.lines[..self.lines.len() - 1],
            _ => &self.lines,
        };
        lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", create_indent(l.indent), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn create_indent(count: usize) -> String {
    INDENT_WITH.repeat(count)
}

/// Escape identifier for safe use in generated code
pub fn escape_identifier(input: &str, escape_dollar: bool, always_quote: bool) -> String {
    if input.is_empty() {
        return "''".to_string();
    }

    if !always_quote && LEGAL_IDENTIFIER_RE.is_match(input) {
        return input.to_string();
    }

    let mut escaped = input.replace('\\', "\\\\");
    escaped = escaped.replace('\'', "\\'");
    escaped = escaped.replace('\n', "\\n");
    escaped = escaped.replace('\r', "\\r");
    if escape_dollar {
        escaped = escaped.replace('$', "\\$");
    }

    format!("'{}'", escaped)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Abstract base emitter visitor
pub struct AbstractEmitterVisitor {
    pub escape_dollar_in_strings: bool,
}

impl AbstractEmitterVisitor {
    pub fn new(escape_dollar_in_strings: bool) -> Self {
        AbstractEmitterVisitor {
            escape_dollar_in_strings,
        }
    }

    pub fn visit_params(&self, params: &[o::FnParam], ctx: &mut EmitterVisitorContext) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            ctx.print(&escape_identifier(&param.name, false, false), false);
        }
    }

    pub fn visit_all_expressions(&mut self, expressions: &[o::Expression], ctx: &mut EmitterVisitorContext) {
        for (i, expr) in expressions.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            expr.visit_expression(self, ctx);
        }
    }

    pub fn visit_all_statements(&mut self, statements: &[o::Statement], ctx: &mut EmitterVisitorContext) {
        for statement in statements {
            statement.visit_statement(self, ctx);
        }
    }
}

impl o::ExpressionVisitor for AbstractEmitterVisitor {
    type Context = EmitterVisitorContext;

    fn visit_read_var_expr(&mut self, expr: &o::ReadVarExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print(&escape_identifier(&expr.name, false, false), false);
    }

    fn visit_write_var_expr(&mut self, expr: &o::WriteVarExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print(&escape_identifier(&expr.name, false, false), false);
        ctx.print(" = ", false);
        expr.value.visit_expression(self, ctx);
    }

    fn visit_read_prop_expr(&mut self, expr: &o::ReadPropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".", false);
        ctx.print(&escape_identifier(&expr.name, false, false), false);
    }

    fn visit_write_prop_expr(&mut self, expr: &o::WritePropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".", false);
        ctx.print(&escape_identifier(&expr.name, false, false), false);
        ctx.print(" = ", false);
        expr.value.visit_expression(self, ctx);
    }

    fn visit_read_key_expr(&mut self, expr: &o::ReadKeyExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print("[", false);
        expr.index.visit_expression(self, ctx);
        ctx.print("]", false);
    }

    fn visit_write_key_expr(&mut self, expr: &o::WriteKeyExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print("[", false);
        expr.index.visit_expression(self, ctx);
        ctx.print("] = ", false);
        expr.value.visit_expression(self, ctx);
    }

    fn visit_invoke_function_expr(&mut self, expr: &o::InvokeFunctionExpr, ctx: &mut EmitterVisitorContext) {
        if matches!(*expr.fn_, o::Expression::Fn(_)) {
            ctx.print("(", false);
            expr.fn_.visit_expression(self, ctx);
            ctx.print(")", false);
        } else {
            expr.fn_.visit_expression(self, ctx);
        }
        ctx.print("(", false);
        self.visit_all_expressions(&expr.args, ctx);
        ctx.print(")", false);
    }

    fn visit_literal_expr(&mut self, expr: &o::LiteralExpr, ctx: &mut EmitterVisitorContext) {
        let value_str = match &expr.value {
            o::LiteralValue::Null => "null".to_string(),
            o::LiteralValue::String(s) => escape_identifier(s, self.escape_dollar_in_strings, true),
            o::LiteralValue::Number(n) => format_number(*n),
            o::LiteralValue::Bool(b) => b.to_string(),
        };
        ctx.print(&value_str, false);
    }

    fn visit_external_expr(&mut self, expr: &o::ExternalExpr, ctx: &mut EmitterVisitorContext) {
        if let Some(name) = &expr.value.name {
            ctx.print(name, false);
        }
    }

    fn visit_conditional_expr(&mut self, expr: &o::ConditionalExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("(", false);
        expr.condition.visit_expression(self, ctx);
        ctx.print(" ? ", false);
        expr.true_case.visit_expression(self, ctx);
        ctx.print(" : ", false);
        match &expr.false_case {
            Some(false_case) => false_case.visit_expression(self, ctx),
            None => ctx.print("null", false),
        }
        ctx.print(")", false);
    }

    fn visit_not_expr(&mut self, expr: &o::NotExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("!", false);
        expr.condition.visit_expression(self, ctx);
    }

    fn visit_cast_expr(&mut self, expr: &o::CastExpr, ctx: &mut EmitterVisitorContext) {
        // Casts only exist for typed targets.
        expr.value.visit_expression(self, ctx);
    }

    fn visit_function_expr(&mut self, expr: &o::FunctionExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("function(", false);
        self.visit_params(&expr.params, ctx);
        ctx.println(") {");
        ctx.inc_indent();
        self.visit_all_statements(&expr.statements, ctx);
        ctx.dec_indent();
        ctx.print("}", false);
    }

    fn visit_binary_operator_expr(&mut self, expr: &o::BinaryOperatorExpr, ctx: &mut EmitterVisitorContext) {
        let op_str = BINARY_OPERATORS.get(&expr.operator).copied().unwrap_or("??");
        ctx.print("(", false);
        expr.lhs.visit_expression(self, ctx);
        ctx.print(" ", false);
        ctx.print(op_str, false);
        ctx.print(" ", false);
        expr.rhs.visit_expression(self, ctx);
        ctx.print(")", false);
    }

    fn visit_unary_operator_expr(&mut self, expr: &o::UnaryOperatorExpr, ctx: &mut EmitterVisitorContext) {
        let op_str = match expr.operator {
            o::UnaryOperator::Minus => "-",
            o::UnaryOperator::Plus => "+",
        };
        ctx.print("(", false);
        ctx.print(op_str, false);
        expr.expr.visit_expression(self, ctx);
        ctx.print(")", false);
    }
}

impl o::StatementVisitor for AbstractEmitterVisitor {
    type Context = EmitterVisitorContext;

    fn visit_declare_var_stmt(&mut self, stmt: &o::DeclareVarStmt, ctx: &mut EmitterVisitorContext) {
        // Use "const" for Final modifier, otherwise "var"
        let keyword = if stmt.modifiers.contains(o::StmtModifier::FINAL) {
            "const "
        } else {
            "var "
        };
        ctx.print(keyword, false);
        ctx.print(&escape_identifier(&stmt.name, false, false), false);
        if let Some(value) = &stmt.value {
            ctx.print(" = ", false);
            value.visit_expression(self, ctx);
        }
        ctx.println(";");
    }

    fn visit_expression_stmt(&mut self, stmt: &o::ExpressionStatement, ctx: &mut EmitterVisitorContext) {
        stmt.expr.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_return_stmt(&mut self, stmt: &o::ReturnStatement, ctx: &mut EmitterVisitorContext) {
        ctx.print("return ", false);
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_if_stmt(&mut self, stmt: &o::IfStmt, ctx: &mut EmitterVisitorContext) {
        ctx.print("if (", false);
        stmt.condition.visit_expression(self, ctx);
        ctx.println(") {");
        ctx.inc_indent();
        self.visit_all_statements(&stmt.true_case, ctx);
        ctx.dec_indent();
        if !stmt.false_case.is_empty() {
            ctx.println("} else {");
            ctx.inc_indent();
            self.visit_all_statements(&stmt.false_case, ctx);
            ctx.dec_indent();
        }
        ctx.println("}");
    }
}
