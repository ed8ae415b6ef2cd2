//! Output Module
//!
//! Handles code generation and output

pub mod abstract_emitter;
pub mod abstract_js_emitter;
pub mod output_ast;
