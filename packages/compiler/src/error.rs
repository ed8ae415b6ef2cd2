//! Compiler errors.

use crate::parse_util::{ParseError, ParseSourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    /// A handler expression could not be lowered to output statements.
    #[error("{}", describe_lowering(.msg, .span.as_ref()))]
    Lowering {
        msg: String,
        span: Option<ParseSourceSpan>,
    },

    /// The caller broke a driver precondition.
    #[error("internal compiler error: {0}")]
    Internal(String),
}

fn describe_lowering(msg: &str, span: Option<&ParseSourceSpan>) -> String {
    match span {
        Some(span) => ParseError::new(span.clone(), msg).to_string(),
        None => msg.to_string(),
    }
}

impl CompileError {
    pub fn lowering(span: Option<&ParseSourceSpan>, msg: impl Into<String>) -> Self {
        CompileError::Lowering {
            msg: msg.into(),
            span: span.cloned(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        CompileError::Internal(msg.into())
    }

    /// Template location of the failure, when there is one.
    pub fn span(&self) -> Option<&ParseSourceSpan> {
        match self {
            CompileError::Lowering { span, .. } => span.as_ref(),
            CompileError::Internal(_) => None,
        }
    }
}
