/**
 * Expression Parser Module
 *
 * Only the AST lives here; parsing happens upstream of the view compiler.
 */
pub mod ast;

pub use ast::*;
