use angular_view_compiler::output::abstract_emitter::escape_identifier;
use angular_view_compiler::output::abstract_js_emitter::{
    emit_class_methods, emit_expression, emit_statements,
};
use angular_view_compiler::output::output_ast as o;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_escape_single_quotes() {
        assert_eq!(escape_identifier("'", false, true), "'\\''");
    }

    #[test]
    fn should_escape_backslash() {
        assert_eq!(escape_identifier("\\", false, true), "'\\\\'");
    }

    #[test]
    fn should_escape_newlines() {
        assert_eq!(escape_identifier("\n", false, true), "'\\n'");
    }

    #[test]
    fn should_escape_dollar() {
        assert_eq!(escape_identifier("$", true, true), "'\\$'");
    }

    #[test]
    fn should_not_escape_dollar() {
        assert_eq!(escape_identifier("$", false, true), "'$'");
    }

    #[test]
    fn should_add_quotes_for_non_identifiers() {
        assert_eq!(escape_identifier("==", false, false), "'=='");
    }

    #[test]
    fn should_not_quote_identifiers() {
        assert_eq!(escape_identifier("$event", false, false), "$event");
        assert_eq!(escape_identifier("_handle_click_0_0", false, false), "_handle_click_0_0");
    }

    #[test]
    fn should_emit_declarations() {
        let value = o::variable("a").not_identical(o::literal(false));
        let stmts = vec![
            o::ReadVarExpr::new("pd_0")
                .set(value.clone())
                .to_decl_stmt(None, o::StmtModifier::FINAL),
            o::ReadVarExpr::new("disposable_0")
                .set(value)
                .to_decl_stmt(Some(o::function_type()), o::StmtModifier::PRIVATE),
        ];
        assert_eq!(
            emit_statements(&stmts),
            "const pd_0 = (a !== false);\nvar disposable_0 = (a !== false);"
        );
    }

    #[test]
    fn should_drop_casts() {
        let expr = o::variable("x").cast(o::dynamic_type());
        assert_eq!(emit_expression(&expr), "x");
    }

    #[test]
    fn should_emit_whole_numbers_without_fraction() {
        assert_eq!(emit_expression(&o::literal(3usize)), "3");
        assert_eq!(emit_expression(&o::literal(0.25)), "0.25");
    }

    #[test]
    fn should_emit_function_expressions() {
        let body = vec![o::Statement::Return(o::ReturnStatement::new(
            o::this_expr().call_method("run", vec![*o::variable("$event")]),
        ))];
        let expr = o::fn_expr(vec![o::FnParam::new("$event", None)], body, None);
        assert_eq!(
            emit_expression(&expr),
            "function($event) {\n  return this.run($event);\n}"
        );
    }

    #[test]
    fn should_emit_class_methods() {
        let method = o::ClassMethod::new(
            "_handle_click_0_0",
            vec![o::FnParam::new("$event", Some(o::import_type("@angular/core", "RenderEvent")))],
            vec![o::Statement::Return(o::ReturnStatement::new(o::literal(true)))],
            Some(o::bool_type()),
            o::StmtModifier::PRIVATE,
        );
        assert_eq!(
            emit_class_methods(&[method.clone(), method]),
            "_handle_click_0_0($event) {\n  return true;\n}\n_handle_click_0_0($event) {\n  return true;\n}"
        );
    }

    #[test]
    fn should_emit_if_statements() {
        let stmt = o::Statement::IfStmt(o::IfStmt {
            condition: o::variable("a"),
            true_case: vec![o::variable("b").to_stmt()],
            false_case: vec![o::variable("c").to_stmt()],
            source_span: None,
        });
        assert_eq!(
            emit_statements(&[stmt]),
            "if (a) {\n  b;\n} else {\n  c;\n}"
        );
    }
}
