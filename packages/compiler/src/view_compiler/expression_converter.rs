//! Action lowering
//!
//! Turns the AST of an event handler into output statements evaluated
//! against a receiver: the component context for element listeners, the
//! directive instance for directive host listeners.
//!
//! Top-level chains become one statement per expression; `$event` read on
//! the implicit receiver becomes the handler parameter.

use crate::error::{CompileError, Result};
use crate::expression_parser::ast::{self as e, AstVisitor, AST};
use crate::output::output_ast as o;
use crate::parse_util::ParseSourceSpan;
use crate::view_compiler::constants::EventHandlerVars;
use once_cell::sync::Lazy;

/// Lowers a handler expression into statements.
///
/// The last returned statement is the action's result: if it is an
/// expression statement or a return, its value decides whether the event's
/// default is prevented.
pub trait ExpressionLowering {
    fn lower_action(
        &mut self,
        context: &o::Expression,
        handler: &AST,
        source_span: Option<&ParseSourceSpan>,
    ) -> Result<Vec<o::Statement>>;
}

impl<F> ExpressionLowering for F
where
    F: FnMut(&o::Expression, &AST, Option<&ParseSourceSpan>) -> Result<Vec<o::Statement>>,
{
    fn lower_action(
        &mut self,
        context: &o::Expression,
        handler: &AST,
        source_span: Option<&ParseSourceSpan>,
    ) -> Result<Vec<o::Statement>> {
        self(context, handler, source_span)
    }
}

/// Default lowering for template action expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionConverter;

impl ExpressionLowering for ActionConverter {
    fn lower_action(
        &mut self,
        context: &o::Expression,
        handler: &AST,
        source_span: Option<&ParseSourceSpan>,
    ) -> Result<Vec<o::Statement>> {
        convert_action_binding(context, handler, source_span)
    }
}

pub fn convert_action_binding(
    context: &o::Expression,
    action: &AST,
    source_span: Option<&ParseSourceSpan>,
) -> Result<Vec<o::Statement>> {
    let actions: Vec<&AST> = match action {
        AST::Chain(chain) => chain.expressions.iter().map(|expr| expr.as_ref()).collect(),
        other => vec![other],
    };

    let mut converter = ActionVisitor {
        context,
        source_span,
    };
    let mut stmts = Vec::with_capacity(actions.len());
    for action in actions {
        if matches!(action, AST::EmptyExpr(_)) {
            continue;
        }
        let expr = action.visit(&mut converter)?;
        stmts.push(o::Statement::Expression(o::ExpressionStatement {
            expr,
            source_span: source_span.cloned(),
        }));
    }
    Ok(stmts)
}

static BINARY_OPERATORS: Lazy<Vec<(&'static str, o::BinaryOperator)>> = Lazy::new(|| {
    vec![
        ("&&", o::BinaryOperator::And),
        (">", o::BinaryOperator::Bigger),
        (">=", o::BinaryOperator::BiggerEquals),
        ("|", o::BinaryOperator::BitwiseOr),
        ("&", o::BinaryOperator::BitwiseAnd),
        ("/", o::BinaryOperator::Divide),
        ("==", o::BinaryOperator::Equals),
        ("===", o::BinaryOperator::Identical),
        ("<", o::BinaryOperator::Lower),
        ("<=", o::BinaryOperator::LowerEquals),
        ("-", o::BinaryOperator::Minus),
        ("%", o::BinaryOperator::Modulo),
        ("*", o::BinaryOperator::Multiply),
        ("!=", o::BinaryOperator::NotEquals),
        ("!==", o::BinaryOperator::NotIdentical),
        ("??", o::BinaryOperator::NullishCoalesce),
        ("||", o::BinaryOperator::Or),
        ("+", o::BinaryOperator::Plus),
    ]
});

pub fn binary_operator_from_str(op: &str) -> Option<o::BinaryOperator> {
    BINARY_OPERATORS
        .iter()
        .find(|(k, _)| *k == op)
        .map(|(_, v)| *v)
}

struct ActionVisitor<'a> {
    context: &'a o::Expression,
    source_span: Option<&'a ParseSourceSpan>,
}

impl<'a> ActionVisitor<'a> {
    fn error(&self, msg: impl Into<String>) -> CompileError {
        CompileError::lowering(self.source_span, msg)
    }

    fn convert(&mut self, ast: &AST) -> Result<Box<o::Expression>> {
        ast.visit(self)
    }

    fn convert_all(&mut self, asts: &[Box<AST>]) -> Result<Vec<o::Expression>> {
        asts.iter().map(|ast| self.convert(ast).map(|expr| *expr)).collect()
    }
}

fn is_implicit(ast: &AST) -> bool {
    matches!(ast, AST::ImplicitReceiver(_))
}

impl<'a> AstVisitor for ActionVisitor<'a> {
    type Result = Result<Box<o::Expression>>;

    fn visit_empty_expr(&mut self, _ast: &e::EmptyExpr) -> Self::Result {
        Err(self.error("Unexpected empty expression"))
    }

    fn visit_implicit_receiver(&mut self, _ast: &e::ImplicitReceiver) -> Self::Result {
        Ok(Box::new(self.context.clone()))
    }

    fn visit_this_receiver(&mut self, _ast: &e::ThisReceiver) -> Self::Result {
        Ok(Box::new(self.context.clone()))
    }

    fn visit_chain(&mut self, _ast: &e::Chain) -> Self::Result {
        Err(self.error("Chained expressions are only allowed at the top level of an action"))
    }

    fn visit_conditional(&mut self, ast: &e::Conditional) -> Self::Result {
        Ok(Box::new(o::Expression::Conditional(o::ConditionalExpr {
            condition: self.convert(&ast.condition)?,
            true_case: self.convert(&ast.true_exp)?,
            false_case: Some(self.convert(&ast.false_exp)?),
            type_: None,
            source_span: None,
        })))
    }

    fn visit_property_read(&mut self, ast: &e::PropertyRead) -> Self::Result {
        if is_implicit(&ast.receiver) && ast.name == EventHandlerVars::EVENT {
            return Ok(EventHandlerVars::event());
        }
        Ok(self.convert(&ast.receiver)?.prop(ast.name.as_str()))
    }

    fn visit_property_write(&mut self, ast: &e::PropertyWrite) -> Self::Result {
        if is_implicit(&ast.receiver) && ast.name == EventHandlerVars::EVENT {
            return Err(self.error(format!("Cannot assign to {}", EventHandlerVars::EVENT)));
        }
        Ok(Box::new(o::Expression::WriteProp(o::WritePropExpr {
            receiver: self.convert(&ast.receiver)?,
            name: ast.name.clone(),
            value: self.convert(&ast.value)?,
            type_: None,
            source_span: None,
        })))
    }

    fn visit_keyed_read(&mut self, ast: &e::KeyedRead) -> Self::Result {
        let receiver = self.convert(&ast.receiver)?;
        Ok(receiver.key(self.convert(&ast.key)?))
    }

    fn visit_keyed_write(&mut self, ast: &e::KeyedWrite) -> Self::Result {
        Ok(Box::new(o::Expression::WriteKey(o::WriteKeyExpr {
            receiver: self.convert(&ast.receiver)?,
            index: self.convert(&ast.key)?,
            value: self.convert(&ast.value)?,
            type_: None,
            source_span: None,
        })))
    }

    fn visit_call(&mut self, ast: &e::Call) -> Self::Result {
        if is_implicit(&ast.receiver) {
            return Err(self.error("Unexpected ImplicitReceiver in Call expression"));
        }
        let callee = self.convert(&ast.receiver)?;
        Ok(callee.call_fn(self.convert_all(&ast.args)?))
    }

    fn visit_literal_primitive(&mut self, ast: &e::LiteralPrimitive) -> Self::Result {
        Ok(match ast {
            e::LiteralPrimitive::String { value } => o::literal(value.as_str()),
            e::LiteralPrimitive::Number { value } => o::literal(*value),
            e::LiteralPrimitive::Boolean { value } => o::literal(*value),
            // undefined is emitted as null
            e::LiteralPrimitive::Null | e::LiteralPrimitive::Undefined => o::null_expr(),
        })
    }

    fn visit_binary(&mut self, ast: &e::Binary) -> Self::Result {
        let operator = binary_operator_from_str(&ast.operation)
            .ok_or_else(|| self.error(format!("Unsupported operator {}", ast.operation)))?;
        Ok(Box::new(o::Expression::BinaryOp(o::BinaryOperatorExpr {
            operator,
            lhs: self.convert(&ast.left)?,
            rhs: self.convert(&ast.right)?,
            type_: None,
            source_span: None,
        })))
    }

    fn visit_unary(&mut self, ast: &e::Unary) -> Self::Result {
        let operator = match ast.operator.as_str() {
            "+" => o::UnaryOperator::Plus,
            "-" => o::UnaryOperator::Minus,
            other => return Err(self.error(format!("Unsupported operator {}", other))),
        };
        Ok(Box::new(o::Expression::Unary(o::UnaryOperatorExpr {
            operator,
            expr: self.convert(&ast.expr)?,
            type_: None,
            source_span: None,
        })))
    }

    fn visit_prefix_not(&mut self, ast: &e::PrefixNot) -> Self::Result {
        Ok(o::not(self.convert(&ast.expression)?))
    }

    fn visit_pipe(&mut self, _ast: &e::BindingPipe) -> Self::Result {
        Err(self.error("Cannot have a pipe in an action expression"))
    }
}
