//! The view class being generated.
//!
//! Event binding appends to three places here: the creation method (listener
//! registrations), the handler methods, and the disposable/subscription lists
//! the runtime tears down when the view is destroyed.

use crate::config::CompilerConfig;
use crate::output::abstract_js_emitter::{emit_class_methods, emit_statements};
use crate::output::output_ast as o;
use crate::view_compiler::compile_binding::CompileBinding;
use crate::view_compiler::compile_method::CompileMethod;
use crate::view_compiler::constants::ViewProperties;

#[derive(Debug, Clone)]
pub struct CompileView {
    pub config: CompilerConfig,
    pub create_method: CompileMethod,
    pub event_handler_methods: Vec<o::ClassMethod>,
    pub disposables: Vec<o::Expression>,
    pub subscriptions: Vec<o::Expression>,
    pub bindings: Vec<CompileBinding>,
}

impl CompileView {
    pub fn new(config: CompilerConfig) -> Self {
        let create_method = CompileMethod::new(config.gen_debug_info);
        CompileView {
            config,
            create_method,
            event_handler_methods: Vec::new(),
            disposables: Vec::new(),
            subscriptions: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Receiver for element-level handlers: the component instance.
    pub fn data_context(&self) -> Box<o::Expression> {
        ViewProperties::context()
    }

    /// Declared type of the `$event` parameter of generated handlers.
    pub fn render_event_type(&self) -> o::Type {
        let types = &self.config.render_types;
        o::import_type(types.module_name.clone(), types.render_event.clone())
    }

    /// JavaScript for the creation statements followed by the handler methods.
    pub fn to_js(&self) -> String {
        let create = emit_statements(self.create_method.statements());
        let methods = emit_class_methods(&self.event_handler_methods);
        match (create.is_empty(), methods.is_empty()) {
            (true, _) => methods,
            (_, true) => create,
            _ => format!("{}\n\n{}", create, methods),
        }
    }
}

impl Default for CompileView {
    fn default() -> Self {
        CompileView::new(CompilerConfig::default())
    }
}
