//! Output AST Module
//!
//! Defines the AST for output code generation: the statements, expressions
//! and class members produced by the view compiler and rendered by the
//! emitters in this module's siblings.

use crate::parse_util::ParseSourceSpan;
use bitflags::bitflags;

//// Types

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTypeName {
    Dynamic,
    Bool,
    String,
    Int,
    Number,
    Function,
    Inferred,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinType {
    pub name: BuiltinTypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionType {
    pub value: Box<Expression>,
    pub type_params: Option<Vec<Type>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Builtin(BuiltinType),
    Expression(ExpressionType),
}

// Predefined types
pub fn dynamic_type() -> Type {
    Type::Builtin(BuiltinType {
        name: BuiltinTypeName::Dynamic,
    })
}

pub fn bool_type() -> Type {
    Type::Builtin(BuiltinType {
        name: BuiltinTypeName::Bool,
    })
}

pub fn function_type() -> Type {
    Type::Builtin(BuiltinType {
        name: BuiltinTypeName::Function,
    })
}

/// A type referring to an imported symbol, e.g. the renderer's event type.
pub fn import_type(module_name: impl Into<String>, name: impl Into<String>) -> Type {
    Type::Expression(ExpressionType {
        value: import_expr(module_name, name),
        type_params: None,
    })
}

///// Expressions

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    Identical,
    NotIdentical,
    Minus,
    Plus,
    Divide,
    Multiply,
    Modulo,
    And,
    Or,
    BitwiseOr,
    BitwiseAnd,
    Lower,
    LowerEquals,
    Bigger,
    BiggerEquals,
    NullishCoalesce,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    ReadVar(ReadVarExpr),
    WriteVar(WriteVarExpr),
    ReadProp(ReadPropExpr),
    WriteProp(WritePropExpr),
    ReadKey(ReadKeyExpr),
    WriteKey(WriteKeyExpr),
    InvokeFn(InvokeFunctionExpr),
    Literal(LiteralExpr),
    External(ExternalExpr),
    Conditional(ConditionalExpr),
    NotExpr(NotExpr),
    Cast(CastExpr),
    Fn(FunctionExpr),
    BinaryOp(BinaryOperatorExpr),
    Unary(UnaryOperatorExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadVarExpr {
    pub name: String,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

impl ReadVarExpr {
    pub fn new(name: impl Into<String>) -> Self {
        ReadVarExpr {
            name: name.into(),
            type_: None,
            source_span: None,
        }
    }

    pub fn set(&self, value: Box<Expression>) -> WriteVarExpr {
        WriteVarExpr {
            name: self.name.clone(),
            value,
            type_: None,
            source_span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteVarExpr {
    pub name: String,
    pub value: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

impl WriteVarExpr {
    pub fn to_decl_stmt(&self, type_: Option<Type>, modifiers: StmtModifier) -> Statement {
        Statement::DeclareVar(DeclareVarStmt {
            name: self.name.clone(),
            value: Some(self.value.clone()),
            type_,
            modifiers,
            source_span: self.source_span.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritePropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub value: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadKeyExpr {
    pub receiver: Box<Expression>,
    pub index: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WriteKeyExpr {
    pub receiver: Box<Expression>,
    pub index: Box<Expression>,
    pub value: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeFunctionExpr {
    pub fn_: Box<Expression>,
    pub args: Vec<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalReference {
    pub module_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalExpr {
    pub value: ExternalReference,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expression>,
    pub true_case: Box<Expression>,
    pub false_case: Option<Box<Expression>>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub condition: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub name: String,
    pub type_: Option<Type>,
}

impl FnParam {
    pub fn new(name: impl Into<String>, type_: Option<Type>) -> Self {
        FnParam {
            name: name.into(),
            type_,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub value: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub params: Vec<FnParam>,
    pub statements: Vec<Statement>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpr {
    pub operator: BinaryOperator,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperatorExpr {
    pub operator: UnaryOperator,
    pub expr: Box<Expression>,
    pub type_: Option<Type>,
    pub source_span: Option<ParseSourceSpan>,
}

pub trait ExpressionVisitor {
    type Context;

    fn visit_read_var_expr(&mut self, expr: &ReadVarExpr, context: &mut Self::Context);
    fn visit_write_var_expr(&mut self, expr: &WriteVarExpr, context: &mut Self::Context);
    fn visit_read_prop_expr(&mut self, expr: &ReadPropExpr, context: &mut Self::Context);
    fn visit_write_prop_expr(&mut self, expr: &WritePropExpr, context: &mut Self::Context);
    fn visit_read_key_expr(&mut self, expr: &ReadKeyExpr, context: &mut Self::Context);
    fn visit_write_key_expr(&mut self, expr: &WriteKeyExpr, context: &mut Self::Context);
    fn visit_invoke_function_expr(&mut self, expr: &InvokeFunctionExpr, context: &mut Self::Context);
    fn visit_literal_expr(&mut self, expr: &LiteralExpr, context: &mut Self::Context);
    fn visit_external_expr(&mut self, expr: &ExternalExpr, context: &mut Self::Context);
    fn visit_conditional_expr(&mut self, expr: &ConditionalExpr, context: &mut Self::Context);
    fn visit_not_expr(&mut self, expr: &NotExpr, context: &mut Self::Context);
    fn visit_cast_expr(&mut self, expr: &CastExpr, context: &mut Self::Context);
    fn visit_function_expr(&mut self, expr: &FunctionExpr, context: &mut Self::Context);
    fn visit_binary_operator_expr(&mut self, expr: &BinaryOperatorExpr, context: &mut Self::Context);
    fn visit_unary_operator_expr(&mut self, expr: &UnaryOperatorExpr, context: &mut Self::Context);
}

///// Statements

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StmtModifier: u8 {
        const FINAL = 1;
        const PRIVATE = 2;
        const EXPORTED = 4;
        const STATIC = 8;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    DeclareVar(DeclareVarStmt),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    IfStmt(IfStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclareVarStmt {
    pub name: String,
    pub value: Option<Box<Expression>>,
    pub type_: Option<Type>,
    pub modifiers: StmtModifier,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

impl ReturnStatement {
    pub fn new(value: Box<Expression>) -> Self {
        ReturnStatement {
            value,
            source_span: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Expression>,
    pub true_case: Vec<Statement>,
    pub false_case: Vec<Statement>,
    pub source_span: Option<ParseSourceSpan>,
}

pub trait StatementVisitor {
    type Context;

    fn visit_declare_var_stmt(&mut self, stmt: &DeclareVarStmt, context: &mut Self::Context);
    fn visit_expression_stmt(&mut self, stmt: &ExpressionStatement, context: &mut Self::Context);
    fn visit_return_stmt(&mut self, stmt: &ReturnStatement, context: &mut Self::Context);
    fn visit_if_stmt(&mut self, stmt: &IfStmt, context: &mut Self::Context);
}

impl Statement {
    pub fn visit_statement<V: StatementVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        context: &mut V::Context,
    ) {
        match self {
            Statement::DeclareVar(stmt) => visitor.visit_declare_var_stmt(stmt, context),
            Statement::Expression(stmt) => visitor.visit_expression_stmt(stmt, context),
            Statement::Return(stmt) => visitor.visit_return_stmt(stmt, context),
            Statement::IfStmt(stmt) => visitor.visit_if_stmt(stmt, context),
        }
    }
}

///// Classes

/// A method generated onto the component view class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub name: String,
    pub params: Vec<FnParam>,
    pub body: Vec<Statement>,
    pub type_: Option<Type>,
    pub modifiers: StmtModifier,
}

impl ClassMethod {
    pub fn new(
        name: impl Into<String>,
        params: Vec<FnParam>,
        body: Vec<Statement>,
        type_: Option<Type>,
        modifiers: StmtModifier,
    ) -> Self {
        ClassMethod {
            name: name.into(),
            params,
            body,
            type_,
            modifiers,
        }
    }
}

// Helper functions for creating common expressions
pub fn variable(name: impl Into<String>) -> Box<Expression> {
    Box::new(Expression::ReadVar(ReadVarExpr::new(name)))
}

pub fn this_expr() -> Box<Expression> {
    variable("this")
}

pub fn literal(value: impl Into<LiteralValue>) -> Box<Expression> {
    Box::new(Expression::Literal(LiteralExpr {
        value: value.into(),
        type_: None,
        source_span: None,
    }))
}

pub fn null_expr() -> Box<Expression> {
    literal(LiteralValue::Null)
}

pub fn import_expr(module_name: impl Into<String>, name: impl Into<String>) -> Box<Expression> {
    Box::new(Expression::External(ExternalExpr {
        value: ExternalReference {
            module_name: Some(module_name.into()),
            name: Some(name.into()),
        },
        type_: None,
        source_span: None,
    }))
}

pub fn not(expr: Box<Expression>) -> Box<Expression> {
    Box::new(Expression::NotExpr(NotExpr {
        condition: expr,
        source_span: None,
    }))
}

pub fn fn_expr(params: Vec<FnParam>, statements: Vec<Statement>, type_: Option<Type>) -> Box<Expression> {
    Box::new(Expression::Fn(FunctionExpr {
        params,
        statements,
        type_,
        source_span: None,
    }))
}

// Implement conversions
impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<usize> for LiteralValue {
    fn from(n: usize) -> Self {
        LiteralValue::Number(n as f64)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

impl Expression {
    pub fn visit_expression<V: ExpressionVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        context: &mut V::Context,
    ) {
        match self {
            Expression::ReadVar(e) => visitor.visit_read_var_expr(e, context),
            Expression::WriteVar(e) => visitor.visit_write_var_expr(e, context),
            Expression::ReadProp(e) => visitor.visit_read_prop_expr(e, context),
            Expression::WriteProp(e) => visitor.visit_write_prop_expr(e, context),
            Expression::ReadKey(e) => visitor.visit_read_key_expr(e, context),
            Expression::WriteKey(e) => visitor.visit_write_key_expr(e, context),
            Expression::InvokeFn(e) => visitor.visit_invoke_function_expr(e, context),
            Expression::Literal(e) => visitor.visit_literal_expr(e, context),
            Expression::External(e) => visitor.visit_external_expr(e, context),
            Expression::Conditional(e) => visitor.visit_conditional_expr(e, context),
            Expression::NotExpr(e) => visitor.visit_not_expr(e, context),
            Expression::Cast(e) => visitor.visit_cast_expr(e, context),
            Expression::Fn(e) => visitor.visit_function_expr(e, context),
            Expression::BinaryOp(e) => visitor.visit_binary_operator_expr(e, context),
            Expression::Unary(e) => visitor.visit_unary_operator_expr(e, context),
        }
    }

    pub fn source_span(&self) -> Option<&ParseSourceSpan> {
        match self {
            Expression::ReadVar(e) => e.source_span.as_ref(),
            Expression::WriteVar(e) => e.source_span.as_ref(),
            Expression::ReadProp(e) => e.source_span.as_ref(),
            Expression::WriteProp(e) => e.source_span.as_ref(),
            Expression::ReadKey(e) => e.source_span.as_ref(),
            Expression::WriteKey(e) => e.source_span.as_ref(),
            Expression::InvokeFn(e) => e.source_span.as_ref(),
            Expression::Literal(e) => e.source_span.as_ref(),
            Expression::External(e) => e.source_span.as_ref(),
            Expression::Conditional(e) => e.source_span.as_ref(),
            Expression::NotExpr(e) => e.source_span.as_ref(),
            Expression::Cast(e) => e.source_span.as_ref(),
            Expression::Fn(e) => e.source_span.as_ref(),
            Expression::BinaryOp(e) => e.source_span.as_ref(),
            Expression::Unary(e) => e.source_span.as_ref(),
        }
    }

    pub fn prop(&self, name: impl Into<String>) -> Box<Expression> {
        Box::new(Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self.clone()),
            name: name.into(),
            type_: None,
            source_span: None,
        }))
    }

    pub fn key(&self, index: Box<Expression>) -> Box<Expression> {
        Box::new(Expression::ReadKey(ReadKeyExpr {
            receiver: Box::new(self.clone()),
            index,
            type_: None,
            source_span: None,
        }))
    }

    pub fn call_fn(&self, params: Vec<Expression>) -> Box<Expression> {
        Box::new(Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self.clone()),
            args: params,
            type_: None,
            source_span: None,
        }))
    }

    /// `receiver.name(params...)`
    pub fn call_method(&self, name: impl Into<String>, params: Vec<Expression>) -> Box<Expression> {
        self.prop(name).call_fn(params)
    }

    pub fn cast(&self, type_: Type) -> Box<Expression> {
        Box::new(Expression::Cast(CastExpr {
            value: Box::new(self.clone()),
            type_: Some(type_),
            source_span: None,
        }))
    }

    fn binary(&self, operator: BinaryOperator, rhs: Box<Expression>) -> Box<Expression> {
        Box::new(Expression::BinaryOp(BinaryOperatorExpr {
            operator,
            lhs: Box::new(self.clone()),
            rhs,
            type_: None,
            source_span: None,
        }))
    }

    pub fn identical(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::Identical, rhs)
    }

    pub fn not_identical(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::NotIdentical, rhs)
    }

    /// Creates a binary AND expression (&&)
    pub fn and(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::And, rhs)
    }

    /// Creates a binary OR expression (||)
    pub fn or(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::Or, rhs)
    }

    pub fn to_stmt(&self) -> Statement {
        Statement::Expression(ExpressionStatement {
            expr: Box::new(self.clone()),
            source_span: self.source_span().cloned(),
        })
    }
}
