#![deny(clippy::all)]

/**
 * Angular View Compiler - Event Binding
 *
 * Lowers the event bindings of template elements into handler methods of
 * the generated view class, with optional Node.js bindings
 */

#[cfg(feature = "napi-bindings")]
use napi::bindgen_prelude::*;
#[cfg(feature = "napi-bindings")]
use napi_derive::napi;

use anyhow::Context;

pub mod config;
pub mod error;
pub mod expression_parser;
pub mod output;
pub mod parse_util;
pub mod template_parser;
pub mod view_compiler;

// Re-exports
pub use config::{CompilerConfig, RenderTypes};
pub use error::{CompileError, Result as CompilerResult};

/// Compilation result
#[cfg_attr(feature = "napi-bindings", napi(object))]
#[cfg_attr(not(feature = "napi-bindings"), derive(Debug))]
pub struct CompilationResult {
    /// Generated JavaScript code
    pub js_code: String,
    /// Compilation time in milliseconds
    pub compilation_time: f64,
    /// Success flag
    pub success: bool,
    /// Error message if failed
    pub error: Option<String>,
}

/// Binds the events of a JSON array of template elements, numbered by
/// position, and returns the generated JavaScript: creation statements
/// first, then handler methods.
pub fn compile_view_json(elements_json: &str, config: &CompilerConfig) -> anyhow::Result<String> {
    let elements: Vec<template_parser::ElementAst> =
        serde_json::from_str(elements_json).context("invalid template element JSON")?;

    let mut view = view_compiler::CompileView::new(config.clone());
    view_compiler::bind_view_events(&elements, &mut view, &mut view_compiler::ActionConverter)
        .context("failed to bind element events")?;
    Ok(view.to_js())
}

#[cfg_attr(not(feature = "napi-bindings"), allow(dead_code))]
fn compile_view_internal(elements_json: &str, config_json: Option<&str>) -> CompilationResult {
    let start = std::time::Instant::now();

    let result = config_json
        .map(|json| serde_json::from_str::<CompilerConfig>(json).context("invalid compiler config JSON"))
        .transpose()
        .and_then(|config| compile_view_json(elements_json, &config.unwrap_or_default()));

    let elapsed = start.elapsed().as_micros() as f64 / 1000.0;

    match result {
        Ok(js_code) => CompilationResult {
            js_code,
            compilation_time: elapsed,
            success: true,
            error: None,
        },
        Err(err) => CompilationResult {
            js_code: String::new(),
            compilation_time: elapsed,
            success: false,
            error: Some(format!("{:#}", err)),
        },
    }
}

/// Compile the event bindings of a view
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn compile_view(elements_json: String, config_json: Option<String>) -> Result<CompilationResult> {
    Ok(compile_view_internal(&elements_json, config_json.as_deref()))
}

/// Get compiler version
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
