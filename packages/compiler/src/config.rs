//! Compiler configuration for view compilation.

use serde::{Deserialize, Serialize};

/// Names of the rendering backend types referenced by generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderTypes {
    pub module_name: String,
    pub renderer: String,
    pub render_element: String,
    pub render_event: String,
}

impl Default for RenderTypes {
    fn default() -> Self {
        RenderTypes {
            module_name: "@angular/core/src/render/api".to_string(),
            renderer: "Renderer".to_string(),
            render_element: "RenderElement".to_string(),
            render_event: "RenderEvent".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Emit `this.debug(nodeIndex, line, col)` markers before each action.
    pub gen_debug_info: bool,
    pub render_types: RenderTypes,
}

impl CompilerConfig {
    pub fn new(gen_debug_info: bool, render_types: RenderTypes) -> Self {
        CompilerConfig {
            gen_debug_info,
            render_types,
        }
    }
}
