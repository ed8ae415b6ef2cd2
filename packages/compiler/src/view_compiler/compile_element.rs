use crate::output::output_ast as o;
use crate::template_parser::ElementAst;
use crate::view_compiler::constants::COMPONENT_VIEW;

/// An element of the view being compiled, with the expressions the
/// generated class uses to reach it at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileElement {
    pub node_index: usize,
    pub render_node: Box<o::Expression>,
    pub app_element: Box<o::Expression>,
    /// One instance per matched directive, in the element's directive order.
    pub directive_instances: Vec<Box<o::Expression>>,
}

impl CompileElement {
    pub fn new(
        node_index: usize,
        render_node: Box<o::Expression>,
        app_element: Box<o::Expression>,
        directive_instances: Vec<Box<o::Expression>>,
    ) -> Self {
        CompileElement {
            node_index,
            render_node,
            app_element,
            directive_instances,
        }
    }

    /// Element using the view class field naming: `this._el_<n>`,
    /// `this._appEl_<n>` and `this._<Type>_<n>_<k>` per directive.
    pub fn from_ast(node_index: usize, ast: &ElementAst) -> Self {
        let directive_instances = ast
            .directives
            .iter()
            .enumerate()
            .map(|(k, dir)| {
                o::this_expr().prop(format!("_{}_{}_{}", dir.directive.type_name, node_index, k))
            })
            .collect();
        CompileElement::new(
            node_index,
            o::this_expr().prop(format!("_el_{}", node_index)),
            o::this_expr().prop(format!("_appEl_{}", node_index)),
            directive_instances,
        )
    }

    /// The nested view of the component hosted on this element.
    pub fn component_view(&self) -> Box<o::Expression> {
        self.app_element.prop(COMPONENT_VIEW)
    }
}
