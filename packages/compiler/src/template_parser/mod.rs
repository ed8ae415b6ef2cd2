//! Template parser output consumed by the view compiler.

pub mod template_ast;

pub use template_ast::*;
