/**
 * Angular Expression AST
 *
 * Node types for parsed template action expressions, the input to
 * expression lowering.
 */

use serde::{Deserialize, Serialize};

/// Visitor pattern for AST traversal
pub trait AstVisitor {
    type Result;

    fn visit_empty_expr(&mut self, ast: &EmptyExpr) -> Self::Result;
    fn visit_implicit_receiver(&mut self, ast: &ImplicitReceiver) -> Self::Result;
    fn visit_this_receiver(&mut self, ast: &ThisReceiver) -> Self::Result;
    fn visit_chain(&mut self, ast: &Chain) -> Self::Result;
    fn visit_conditional(&mut self, ast: &Conditional) -> Self::Result;
    fn visit_property_read(&mut self, ast: &PropertyRead) -> Self::Result;
    fn visit_property_write(&mut self, ast: &PropertyWrite) -> Self::Result;
    fn visit_keyed_read(&mut self, ast: &KeyedRead) -> Self::Result;
    fn visit_keyed_write(&mut self, ast: &KeyedWrite) -> Self::Result;
    fn visit_call(&mut self, ast: &Call) -> Self::Result;
    fn visit_literal_primitive(&mut self, ast: &LiteralPrimitive) -> Self::Result;
    fn visit_binary(&mut self, ast: &Binary) -> Self::Result;
    fn visit_unary(&mut self, ast: &Unary) -> Self::Result;
    fn visit_prefix_not(&mut self, ast: &PrefixNot) -> Self::Result;
    fn visit_pipe(&mut self, ast: &BindingPipe) -> Self::Result;
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    PropertyWrite(PropertyWrite),
    KeyedRead(KeyedRead),
    KeyedWrite(KeyedWrite),
    Call(Call),
    LiteralPrimitive(LiteralPrimitive),
    Binary(Binary),
    Unary(Unary),
    PrefixNot(PrefixNot),
    BindingPipe(BindingPipe),
}

impl AST {
    pub fn visit<V: AstVisitor + ?Sized>(&self, visitor: &mut V) -> V::Result {
        match self {
            AST::EmptyExpr(ast) => visitor.visit_empty_expr(ast),
            AST::ImplicitReceiver(ast) => visitor.visit_implicit_receiver(ast),
            AST::ThisReceiver(ast) => visitor.visit_this_receiver(ast),
            AST::Chain(ast) => visitor.visit_chain(ast),
            AST::Conditional(ast) => visitor.visit_conditional(ast),
            AST::PropertyRead(ast) => visitor.visit_property_read(ast),
            AST::PropertyWrite(ast) => visitor.visit_property_write(ast),
            AST::KeyedRead(ast) => visitor.visit_keyed_read(ast),
            AST::KeyedWrite(ast) => visitor.visit_keyed_write(ast),
            AST::Call(ast) => visitor.visit_call(ast),
            AST::LiteralPrimitive(ast) => visitor.visit_literal_primitive(ast),
            AST::Binary(ast) => visitor.visit_binary(ast),
            AST::Unary(ast) => visitor.visit_unary(ast),
            AST::PrefixNot(ast) => visitor.visit_prefix_not(ast),
            AST::BindingPipe(ast) => visitor.visit_pipe(ast),
        }
    }

    /// `name`, read from the implicit receiver.
    pub fn read(name: impl Into<String>) -> AST {
        AST::PropertyRead(PropertyRead {
            receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {})),
            name: name.into(),
        })
    }

    /// `name(args...)`, called on the implicit receiver.
    pub fn call_method(name: impl Into<String>, args: Vec<AST>) -> AST {
        AST::Call(Call {
            receiver: Box::new(AST::read(name)),
            args: args.into_iter().map(Box::new).collect(),
        })
    }

    /// `name = value`, written on the implicit receiver.
    pub fn write(name: impl Into<String>, value: AST) -> AST {
        AST::PropertyWrite(PropertyWrite {
            receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {})),
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn chain(expressions: Vec<AST>) -> AST {
        AST::Chain(Chain {
            expressions: expressions.into_iter().map(Box::new).collect(),
        })
    }

    pub fn empty() -> AST {
        AST::EmptyExpr(EmptyExpr {})
    }
}

/// Empty expression
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyExpr {}

/// Implicit receiver (the component instance)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplicitReceiver {}

/// This receiver (explicit `this`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThisReceiver {}

/// Chain of expressions (e.g., `a; b; c`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub expressions: Vec<Box<AST>>,
}

/// Ternary conditional (e.g., `condition ? true : false`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRead {
    pub receiver: Box<AST>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRead {
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedWrite {
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub value: Box<AST>,
}

/// Function call (e.g., `fn(a, b)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub receiver: Box<AST>,
    pub args: Vec<Box<AST>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LiteralPrimitive {
    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    Null,
    Undefined,
}

/// Binary operation (e.g., `a + b`); `operation` is the source operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// Unary `+` / `-`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
    pub operator: String,
    pub expr: Box<AST>,
}

/// Logical not (e.g., `!expr`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixNot {
    pub expression: Box<AST>,
}

/// Pipe expression (e.g., `value | pipeName:arg`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingPipe {
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<Box<AST>>,
}
