//! Binds the events of one element of a view.

use crate::error::Result;
use crate::output::output_ast as o;
use crate::template_parser::ElementAst;
use crate::view_compiler::compile_element::CompileElement;
use crate::view_compiler::compile_view::CompileView;
use crate::view_compiler::event_binder::{
    bind_directive_outputs, bind_render_outputs, collect_event_listeners, BoundEventListener,
};
use crate::view_compiler::expression_converter::ExpressionLowering;
use tracing::debug_span;

/// Collects the element's listeners, registers them with the renderer, then
/// subscribes them to each matched directive's outputs.
pub fn bind_element_events(
    ast: &ElementAst,
    element: &CompileElement,
    view: &mut CompileView,
    lowering: &mut dyn ExpressionLowering,
) -> Result<Vec<BoundEventListener>> {
    let span = debug_span!("bind_element_events", element = %ast.name, node_index = element.node_index);
    let _enter = span.enter();

    let listeners = collect_event_listeners(&ast.outputs, &ast.directives, element, view, lowering)?;
    bind_render_outputs(&listeners, view, element);
    for (directive_ast, directive_instance) in ast.directives.iter().zip(&element.directive_instances) {
        let instance: &o::Expression = directive_instance;
        bind_directive_outputs(directive_ast, instance, &listeners, view);
    }
    Ok(listeners)
}

/// Binds each element in order, numbering nodes by position.
pub fn bind_view_events(
    elements: &[ElementAst],
    view: &mut CompileView,
    lowering: &mut dyn ExpressionLowering,
) -> Result<()> {
    for (node_index, ast) in elements.iter().enumerate() {
        let element = CompileElement::from_ast(node_index, ast);
        bind_element_events(ast, &element, view, lowering)?;
    }
    Ok(())
}
