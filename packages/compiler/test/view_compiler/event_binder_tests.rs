use angular_view_compiler::config::CompilerConfig;
use angular_view_compiler::error::{CompileError, Result};
use angular_view_compiler::expression_parser::ast::{self as e, AST};
use angular_view_compiler::output::abstract_js_emitter::{emit_class_methods, emit_statements};
use angular_view_compiler::output::output_ast as o;
use angular_view_compiler::parse_util::{ParseSourceFile, ParseSourceSpan};
use angular_view_compiler::template_parser::{BoundEventAst, CompileDirectiveMetadata, DirectiveAst, ElementAst};
use angular_view_compiler::view_compiler::{
    bind_directive_outputs, bind_render_outputs, collect_event_listeners, ActionConverter,
    BoundEventListener, CompileElement, CompileEventListener, CompileView,
};
use indexmap::IndexMap;

fn on(raw_name: &str, method: &str) -> BoundEventAst {
    BoundEventAst::new(raw_name, AST::call_method(method, vec![]), None)
}

fn directive(type_name: &str, is_component: bool, host_events: Vec<BoundEventAst>) -> DirectiveAst {
    DirectiveAst {
        directive: CompileDirectiveMetadata {
            type_name: type_name.to_string(),
            is_component,
            outputs: IndexMap::new(),
        },
        host_events,
        source_span: None,
    }
}

fn element(outputs: Vec<BoundEventAst>, directives: Vec<DirectiveAst>) -> ElementAst {
    ElementAst {
        name: "div".to_string(),
        outputs,
        directives,
        source_span: None,
    }
}

fn collect(ast: &ElementAst, view: &mut CompileView) -> (CompileElement, Vec<BoundEventListener>) {
    let el = CompileElement::from_ast(0, ast);
    let listeners =
        collect_event_listeners(&ast.outputs, &ast.directives, &el, view, &mut ActionConverter)
            .unwrap();
    (el, listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_one_method_per_distinct_target_and_event() {
        let ast = element(
            vec![on("click", "a"), on("window:resize", "b"), on("click", "c")],
            vec![directive("Tip", false, vec![on("click", "show"), on("keyup", "key")])],
        );
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);

        let methods: Vec<&str> = listeners.iter().map(|l| l.method_name()).collect();
        assert_eq!(methods, vec!["_handle_click_0_0", "_handle_resize_0_1", "_handle_keyup_0_2"]);
        assert_eq!(view.event_handler_methods.len(), 3);
        assert_eq!(view.bindings.len(), 5);
        assert_eq!(listeners[1].event_target(), Some("window"));
    }

    #[test]
    fn should_treat_global_and_element_events_as_distinct() {
        let ast = element(vec![on("click", "a"), on("document:click", "b")], vec![]);
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);
        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners[0].event_target(), None);
        assert_eq!(listeners[1].event_target(), Some("document"));
    }

    #[test]
    fn should_only_name_result_variables_for_value_actions() {
        let mut view = CompileView::default();
        let el = CompileElement::new(0, o::this_expr().prop("_el_0"), o::this_expr().prop("_appEl_0"), vec![]);
        let mut listener = CompileEventListener::new(&el, &view, None, "click".to_string(), 0);

        // The first handler lowers to a control-flow statement, the second to a call.
        let mut lowering = |ctx: &o::Expression, handler: &AST, _span: Option<&ParseSourceSpan>| -> Result<Vec<o::Statement>> {
            match handler {
                AST::EmptyExpr(_) => Ok(vec![o::Statement::IfStmt(o::IfStmt {
                    condition: ctx.prop("ready"),
                    true_case: vec![ctx.call_method("go", vec![]).to_stmt()],
                    false_case: vec![],
                    source_span: None,
                })]),
                _ => Ok(vec![ctx.call_method("save", vec![]).to_stmt()]),
            }
        };
        listener
            .add_action(&view, &mut lowering, &BoundEventAst::new("click", AST::empty(), None), None, None)
            .unwrap();
        listener
            .add_action(&view, &mut lowering, &on("click", "save"), None, None)
            .unwrap();
        listener.finish_method(&mut view, &el);

        assert_eq!(
            emit_class_methods(&view.event_handler_methods),
            "_handle_click_0_0($event) {\n\
             \x20 this.markPathToRootAsCheckOnce();\n\
             \x20 if (this.context.ready) {\n\
             \x20   this.context.go();\n\
             \x20 }\n\
             \x20 const pd_0 = (this.context.save() !== false);\n\
             \x20 return (true && pd_0);\n\
             }"
        );
    }

    #[test]
    fn should_return_literal_true_without_value_actions() {
        let ast = element(vec![BoundEventAst::new("click", AST::empty(), None)], vec![]);
        let mut view = CompileView::default();
        collect(&ast, &mut view);
        assert_eq!(
            emit_class_methods(&view.event_handler_methods),
            "_handle_click_0_0($event) {\n  this.markPathToRootAsCheckOnce();\n  return true;\n}"
        );
    }

    #[test]
    fn should_mark_component_view_only_for_component_host_listeners() {
        let ast = element(vec![], vec![directive("Cmp", true, vec![on("focus", "f")])]);
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);
        assert!(listeners[0].has_component_host_listener());
        assert_eq!(
            emit_statements(&view.event_handler_methods[0].body[..1]),
            "this._appEl_0.componentView.markPathToRootAsCheckOnce();"
        );

        let ast = element(vec![], vec![directive("Tip", false, vec![on("focus", "f")])]);
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);
        assert!(!listeners[0].has_component_host_listener());
        assert_eq!(
            emit_statements(&view.event_handler_methods[0].body[..1]),
            "this.markPathToRootAsCheckOnce();"
        );
    }

    #[test]
    fn should_keep_method_names_unique_when_sanitized_names_collide() {
        let ast = element(vec![on("click.foo", "a"), on("click-foo", "b")], vec![]);
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);
        let methods: Vec<&str> = listeners.iter().map(|l| l.method_name()).collect();
        assert_eq!(methods, vec!["_handle_click_foo_0_0", "_handle_click_foo_0_1"]);
        assert_eq!(listeners[0].event_name(), "click.foo");
        assert_eq!(listeners[1].event_name(), "click-foo");
    }

    #[test]
    fn should_use_listen_global_only_for_targeted_listeners() {
        let ast = element(vec![on("click", "a"), on("window:scroll", "b")], vec![]);
        let mut view = CompileView::default();
        let (el, listeners) = collect(&ast, &mut view);
        bind_render_outputs(&listeners, &mut view, &el);

        assert_eq!(view.disposables.len(), listeners.len());
        let create = view.create_method.statements();
        assert_eq!(create.len(), 2);
        assert!(emit_statements(&create[..1])
            .starts_with("var disposable_0 = this.renderer.listen(this._el_0, 'click', this.eventHandler("));
        assert!(emit_statements(&create[1..])
            .starts_with("var disposable_1 = this.renderer.listenGlobal('window', 'scroll', this.eventHandler("));
    }

    #[test]
    fn should_merge_template_and_component_host_listeners() {
        let ast = element(
            vec![on("click", "doSomething")],
            vec![directive("D", true, vec![on("click", "doSomethingElse")])],
        );
        let mut view = CompileView::default();
        let (_, listeners) = collect(&ast, &mut view);

        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].event_target(), None);
        assert_eq!(listeners[0].event_name(), "click");
        assert!(listeners[0].has_component_host_listener());
        assert_eq!(
            emit_class_methods(&view.event_handler_methods),
            "_handle_click_0_0($event) {\n\
             \x20 this._appEl_0.componentView.markPathToRootAsCheckOnce();\n\
             \x20 const pd_0 = (this.context.doSomething() !== false);\n\
             \x20 const pd_1 = (this._D_0_0.doSomethingElse() !== false);\n\
             \x20 return ((true && pd_0) && pd_1);\n\
             }"
        );
    }

    #[test]
    fn should_subscribe_listeners_to_matching_directive_outputs() {
        let mut dir = directive("Pager", false, vec![]);
        dir.directive.outputs.insert("next".to_string(), "onNext".to_string());
        dir.directive.outputs.insert("prev".to_string(), "onPrev".to_string());
        let ast = element(vec![on("prev", "back"), on("next", "forward")], vec![dir]);

        let mut view = CompileView::default();
        let (el, listeners) = collect(&ast, &mut view);
        bind_directive_outputs(&ast.directives[0], &el.directive_instances[0], &listeners, &mut view);

        assert_eq!(view.subscriptions.len(), 2);
        assert_eq!(
            emit_statements(view.create_method.statements()),
            "const subscription_0 = this._Pager_0_0.onNext.subscribe(this.eventHandler(function($event) {\n\
             \x20 this._handle_next_0_1($event);\n\
             }));\n\
             const subscription_1 = this._Pager_0_0.onPrev.subscribe(this.eventHandler(function($event) {\n\
             \x20 this._handle_prev_0_0($event);\n\
             }));"
        );
    }

    #[test]
    fn should_not_subscribe_when_no_listener_matches_output() {
        let mut dir = directive("Form", false, vec![]);
        dir.directive.outputs.insert("save".to_string(), "onSave".to_string());
        let ast = element(vec![on("submit", "send")], vec![dir]);

        let mut view = CompileView::default();
        let (el, listeners) = collect(&ast, &mut view);
        bind_directive_outputs(&ast.directives[0], &el.directive_instances[0], &listeners, &mut view);

        assert!(view.subscriptions.is_empty());
        assert!(view.create_method.is_empty());
    }

    #[test]
    fn should_generate_identical_output_for_identical_input() {
        let build = || {
            let ast = element(
                vec![on("click", "a"), on("window:resize", "b")],
                vec![directive("D", true, vec![on("click", "c")])],
            );
            let mut view = CompileView::default();
            let (el, listeners) = collect(&ast, &mut view);
            bind_render_outputs(&listeners, &mut view, &el);
            view.to_js()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn should_emit_debug_markers_when_enabled() {
        let file = ParseSourceFile::new("<button (click)=\"a()\"></button>", "cmp.html");
        let span = ParseSourceSpan::from_offsets(&file, 8, 21);
        let ast = element(
            vec![
                BoundEventAst::new("click", AST::call_method("a", vec![]), Some(span)),
                on("click", "b"),
            ],
            vec![],
        );
        let mut view = CompileView::new(CompilerConfig {
            gen_debug_info: true,
            ..CompilerConfig::default()
        });
        collect(&ast, &mut view);

        assert_eq!(
            emit_class_methods(&view.event_handler_methods),
            "_handle_click_0_0($event) {\n\
             \x20 this.markPathToRootAsCheckOnce();\n\
             \x20 this.debug(0, 0, 8);\n\
             \x20 const pd_0 = (this.context.a() !== false);\n\
             \x20 this.debug(0, null, null);\n\
             \x20 const pd_1 = (this.context.b() !== false);\n\
             \x20 return ((true && pd_0) && pd_1);\n\
             }"
        );
    }

    #[test]
    fn should_propagate_lowering_failures() {
        let file = ParseSourceFile::new("<b (click)=\"a | p\"></b>", "cmp.html");
        let span = ParseSourceSpan::from_offsets(&file, 3, 18);
        let pipe = AST::BindingPipe(e::BindingPipe {
            exp: Box::new(AST::read("a")),
            name: "p".to_string(),
            args: vec![],
        });
        let ast = element(vec![on("click", "ok"), BoundEventAst::new("click", pipe, Some(span.clone()))], vec![]);

        let mut view = CompileView::default();
        let el = CompileElement::from_ast(0, &ast);
        let err = collect_event_listeners(&ast.outputs, &[], &el, &mut view, &mut ActionConverter)
            .unwrap_err();

        assert!(matches!(err, CompileError::Lowering { .. }));
        assert_eq!(err.span(), Some(&span));
        assert!(err.to_string().starts_with("Cannot have a pipe in an action expression"));
        assert!(view.event_handler_methods.is_empty());
    }

    #[test]
    fn should_accept_custom_lowering() {
        let ast = element(vec![on("click", "ignored")], vec![]);
        let mut view = CompileView::default();
        let el = CompileElement::from_ast(0, &ast);
        let mut lowering = |_: &o::Expression, _: &AST, _: Option<&ParseSourceSpan>| -> Result<Vec<o::Statement>> {
            Ok(vec![o::Statement::Return(o::ReturnStatement::new(o::literal(false)))])
        };
        collect_event_listeners(&ast.outputs, &[], &el, &mut view, &mut lowering).unwrap();

        assert_eq!(
            emit_statements(&view.event_handler_methods[0].body[1..]),
            "const pd_0 = (false !== false);\nreturn (true && pd_0);"
        );
    }
}
