use angular_view_compiler::compile_view_json;
use angular_view_compiler::config::CompilerConfig;
use angular_view_compiler::template_parser::ElementAst;
use angular_view_compiler::view_compiler::{
    bind_element_events, bind_view_events, ActionConverter, CompileElement, CompileView,
};

const SAVE_FORM: &str = r#"{
    "name": "app-form",
    "outputs": [
        {"name": "save", "handler": {"type": "Call", "data": {
            "receiver": {"type": "PropertyRead", "data": {
                "receiver": {"type": "ImplicitReceiver", "data": {}},
                "name": "onSaved"
            }},
            "args": [{"type": "PropertyRead", "data": {
                "receiver": {"type": "ImplicitReceiver", "data": {}},
                "name": "$event"
            }}]
        }}}
    ],
    "directives": [{
        "directive": {"typeName": "FormCmp", "isComponent": true, "outputs": {"save": "onSave"}},
        "hostEvents": [
            {"name": "submit", "handler": {"type": "Call", "data": {
                "receiver": {"type": "PropertyRead", "data": {
                    "receiver": {"type": "ImplicitReceiver", "data": {}},
                    "name": "submit"
                }},
                "args": []
            }}}
        ]
    }]
}"#;

fn parse(json: &str) -> ElementAst {
    serde_json::from_str(json).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_bind_render_outputs_before_directive_outputs() {
        let ast = parse(SAVE_FORM);
        let element = CompileElement::from_ast(0, &ast);
        let mut view = CompileView::default();
        let listeners = bind_element_events(&ast, &element, &mut view, &mut ActionConverter).unwrap();

        assert_eq!(listeners.len(), 2);
        assert_eq!(view.disposables.len(), 2);
        assert_eq!(view.subscriptions.len(), 1);
        assert_eq!(
            view.to_js(),
            "var disposable_0 = this.renderer.listen(this._el_0, 'save', this.eventHandler(function($event) {\n\
             \x20 return this._handle_save_0_0($event);\n\
             }));\n\
             var disposable_1 = this.renderer.listen(this._el_0, 'submit', this.eventHandler(function($event) {\n\
             \x20 return this._handle_submit_0_1($event);\n\
             }));\n\
             const subscription_0 = this._FormCmp_0_0.onSave.subscribe(this.eventHandler(function($event) {\n\
             \x20 this._handle_save_0_0($event);\n\
             }));\n\
             \n\
             _handle_save_0_0($event) {\n\
             \x20 this.markPathToRootAsCheckOnce();\n\
             \x20 const pd_0 = (this.context.onSaved($event) !== false);\n\
             \x20 return (true && pd_0);\n\
             }\n\
             _handle_submit_0_1($event) {\n\
             \x20 this._appEl_0.componentView.markPathToRootAsCheckOnce();\n\
             \x20 const pd_0 = (this._FormCmp_0_0.submit() !== false);\n\
             \x20 return (true && pd_0);\n\
             }"
        );
    }

    #[test]
    fn should_number_handles_across_elements() {
        let elements = vec![parse(SAVE_FORM), parse(SAVE_FORM)];
        let mut view = CompileView::default();
        bind_view_events(&elements, &mut view, &mut ActionConverter).unwrap();

        let names: Vec<&str> = view
            .event_handler_methods
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["_handle_save_0_0", "_handle_submit_0_1", "_handle_save_1_0", "_handle_submit_1_1"]
        );
        assert_eq!(view.disposables.len(), 4);
        assert_eq!(view.subscriptions.len(), 2);
        assert!(view.to_js().contains("const subscription_1 = this._FormCmp_1_0.onSave.subscribe("));
    }

    #[test]
    fn should_produce_nothing_for_element_without_events() {
        let mut view = CompileView::default();
        bind_view_events(&[parse(r#"{"name": "span"}"#)], &mut view, &mut ActionConverter).unwrap();
        assert_eq!(view.to_js(), "");
        assert!(view.bindings.is_empty());
    }

    #[test]
    fn should_compile_view_json() {
        let js = compile_view_json(&format!("[{}]", SAVE_FORM), &CompilerConfig::default()).unwrap();
        let mut view = CompileView::default();
        bind_view_events(&[parse(SAVE_FORM)], &mut view, &mut ActionConverter).unwrap();
        assert_eq!(js, view.to_js());
    }

    #[test]
    fn should_report_lowering_errors_with_context() {
        let json = r#"[{"name": "b", "outputs": [{"name": "click", "handler": {"type": "BindingPipe", "data": {
            "exp": {"type": "PropertyRead", "data": {"receiver": {"type": "ImplicitReceiver", "data": {}}, "name": "a"}},
            "name": "async",
            "args": []
        }}}]}]"#;
        let err = compile_view_json(json, &CompilerConfig::default()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("failed to bind element events: "));
        assert!(message.ends_with("Cannot have a pipe in an action expression"));
    }
}
