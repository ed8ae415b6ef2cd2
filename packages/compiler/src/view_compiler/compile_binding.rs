use crate::template_parser::BoundEventAst;

/// Records that the element at `node_index` binds `source_ast`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileBinding {
    pub node_index: usize,
    pub source_ast: BoundEventAst,
}

impl CompileBinding {
    pub fn new(node_index: usize, source_ast: BoundEventAst) -> Self {
        CompileBinding {
            node_index,
            source_ast,
        }
    }
}
