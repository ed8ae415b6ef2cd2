//! Event Binder
//!
//! Turns the event bindings of one element into listener methods on the
//! generated view class, then wires those methods to the renderer and to
//! directive outputs.
//!
//! All handlers for the same `(target, event)` pair on an element share one
//! method `_handle_<event>_<nodeIndex>_<listenerIndex>`. Each action whose
//! last statement yields a value stores `value !== false` in `pd_<k>`; the
//! method returns `true && pd_0 && ... && pd_n` so any handler returning
//! `false` prevents the event's default.
//!
//! A [`CompileEventListener`] accumulates actions. Finishing it consumes it
//! and produces a [`BoundEventListener`], which is the only thing that can be
//! attached to the renderer or to a directive output.

use crate::error::{CompileError, Result};
use crate::output::output_ast as o;
use crate::template_parser::{BoundEventAst, CompileDirectiveMetadata, DirectiveAst};
use crate::view_compiler::compile_binding::CompileBinding;
use crate::view_compiler::compile_element::CompileElement;
use crate::view_compiler::compile_method::CompileMethod;
use crate::view_compiler::compile_view::CompileView;
use crate::view_compiler::constants::{
    EventHandlerVars, RendererMethods, ViewMethods, ViewProperties, SUBSCRIBE_OBSERVABLE,
};
use crate::view_compiler::expression_converter::ExpressionLowering;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use tracing::{debug, trace};

static NON_IDENTIFIER_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z_]").expect("valid event name regex"));

/// Replaces every character outside `[a-zA-Z_]` with `_`.
pub fn sanitize_event_name(name: &str) -> String {
    NON_IDENTIFIER_CHARS.replace_all(name, "_").into_owned()
}

/// What the last lowered statement of an action yields.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    Value(Box<o::Expression>),
    Void,
}

impl ActionResult {
    pub fn of(stmt: &o::Statement) -> Self {
        match stmt {
            o::Statement::Expression(stmt) => ActionResult::Value(stmt.expr.clone()),
            o::Statement::Return(stmt) => ActionResult::Value(stmt.value.clone()),
            _ => ActionResult::Void,
        }
    }
}

/// An event handler method under construction.
#[derive(Debug)]
pub struct CompileEventListener {
    node_index: usize,
    event_target: Option<String>,
    event_name: String,
    has_component_host_listener: bool,
    method: CompileMethod,
    method_name: String,
    event_param: o::FnParam,
    action_result_vars: SmallVec<[o::ReadVarExpr; 4]>,
}

impl CompileEventListener {
    pub fn new(
        element: &CompileElement,
        view: &CompileView,
        event_target: Option<String>,
        event_name: String,
        listener_index: usize,
    ) -> Self {
        let method_name = format!(
            "_handle_{}_{}_{}",
            sanitize_event_name(&event_name),
            element.node_index,
            listener_index
        );
        CompileEventListener {
            node_index: element.node_index,
            event_target,
            event_name,
            has_component_host_listener: false,
            method: CompileMethod::new(view.config.gen_debug_info),
            method_name,
            event_param: o::FnParam::new(EventHandlerVars::EVENT, Some(view.render_event_type())),
            action_result_vars: SmallVec::new(),
        }
    }

    /// The listener for `(event_target, event_name)` in `listeners`, created
    /// and appended when there is none. Its index in `listeners` is the
    /// listener index baked into the method name.
    pub fn get_or_create<'a>(
        element: &CompileElement,
        view: &CompileView,
        event_target: Option<&str>,
        event_name: &str,
        listeners: &'a mut Vec<CompileEventListener>,
    ) -> &'a mut CompileEventListener {
        let existing = listeners.iter().position(|listener| {
            listener.event_target.as_deref() == event_target && listener.event_name == event_name
        });
        let index = match existing {
            Some(index) => index,
            None => {
                let listener = CompileEventListener::new(
                    element,
                    view,
                    event_target.map(str::to_string),
                    event_name.to_string(),
                    listeners.len(),
                );
                trace!(method = %listener.method_name, "created event listener");
                listeners.push(listener);
                listeners.len() - 1
            }
        };
        &mut listeners[index]
    }

    pub fn event_target(&self) -> Option<&str> {
        self.event_target.as_deref()
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn has_component_host_listener(&self) -> bool {
        self.has_component_host_listener
    }

    /// Statements added so far, before the method is finished.
    pub fn statements(&self) -> &[o::Statement] {
        self.method.statements()
    }

    /// Lowers `host_event`'s handler against `directive_instance`, or the
    /// component context when there is none, and appends it to the method.
    pub fn add_action(
        &mut self,
        view: &CompileView,
        lowering: &mut dyn ExpressionLowering,
        host_event: &BoundEventAst,
        directive: Option<&CompileDirectiveMetadata>,
        directive_instance: Option<&o::Expression>,
    ) -> Result<()> {
        if directive.map_or(false, |dir| dir.is_component) {
            self.has_component_host_listener = true;
        }
        self.method
            .reset_debug_info(self.node_index, host_event.source_span.as_ref());

        let context = match directive_instance {
            Some(instance) => Box::new(instance.clone()),
            None => view.data_context(),
        };
        let mut action_stmts =
            lowering.lower_action(&context, &host_event.handler, host_event.source_span.as_ref())?;

        if let Some(last) = action_stmts.last_mut() {
            if let ActionResult::Value(value) = ActionResult::of(last) {
                let prevent_default_var =
                    o::ReadVarExpr::new(format!("pd_{}", self.action_result_vars.len()));
                // Handlers may be void; compare the untyped result.
                *last = prevent_default_var
                    .set(value.cast(o::dynamic_type()).not_identical(o::literal(false)))
                    .to_decl_stmt(None, o::StmtModifier::FINAL);
                self.action_result_vars.push(prevent_default_var);
            }
        }

        trace!(
            method = %self.method_name,
            event = %host_event.full_name(),
            statements = action_stmts.len(),
            "added action"
        );
        self.method.add_stmts(action_stmts);
        Ok(())
    }

    /// Emits the handler method onto `view` and freezes the listener.
    pub fn finish_method(self, view: &mut CompileView, element: &CompileElement) -> BoundEventListener {
        let mark_path_to_root_start = if self.has_component_host_listener {
            element.component_view()
        } else {
            o::this_expr()
        };
        let result_expr = self
            .action_result_vars
            .iter()
            .fold(o::literal(true), |acc, var| {
                acc.and(Box::new(o::Expression::ReadVar(var.clone())))
            });

        let mut stmts = Vec::with_capacity(self.method.statements().len() + 2);
        stmts.push(
            mark_path_to_root_start
                .call_method(ViewMethods::MARK_PATH_TO_ROOT_AS_CHECK_ONCE, vec![])
                .to_stmt(),
        );
        stmts.extend(self.method.finish());
        stmts.push(o::Statement::Return(o::ReturnStatement::new(result_expr)));

        debug!(
            method = %self.method_name,
            actions = self.action_result_vars.len(),
            component_host = self.has_component_host_listener,
            "finished event handler method"
        );
        view.event_handler_methods.push(o::ClassMethod::new(
            self.method_name.clone(),
            vec![self.event_param.clone()],
            stmts,
            Some(o::bool_type()),
            o::StmtModifier::PRIVATE,
        ));

        BoundEventListener {
            event_target: self.event_target,
            event_name: self.event_name,
            method_name: self.method_name,
            event_param: self.event_param,
            has_component_host_listener: self.has_component_host_listener,
        }
    }
}

/// A listener whose handler method has been emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundEventListener {
    event_target: Option<String>,
    event_name: String,
    method_name: String,
    event_param: o::FnParam,
    has_component_host_listener: bool,
}

impl BoundEventListener {
    pub fn event_target(&self) -> Option<&str> {
        self.event_target.as_deref()
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn has_component_host_listener(&self) -> bool {
        self.has_component_host_listener
    }

    /// `this.eventHandler(function($event) { [return] this.<method>($event); })`
    fn handler_fn(&self, returns_result: bool) -> Box<o::Expression> {
        let call = o::this_expr().call_method(self.method_name.as_str(), vec![*EventHandlerVars::event()]);
        let body = if returns_result {
            o::Statement::Return(o::ReturnStatement::new(call))
        } else {
            call.to_stmt()
        };
        o::this_expr().call_method(
            ViewMethods::EVENT_HANDLER,
            vec![*o::fn_expr(vec![self.event_param.clone()], vec![body], None)],
        )
    }

    /// Registers the handler with the renderer, on the element itself or on
    /// the global target, and records the returned disposable.
    pub fn listen_to_renderer(&self, view: &mut CompileView, element: &CompileElement) {
        let event_listener = self.handler_fn(true);
        let renderer = ViewProperties::renderer();
        let listen_expr = match &self.event_target {
            Some(target) => renderer.call_method(
                RendererMethods::LISTEN_GLOBAL,
                vec![
                    *o::literal(target.as_str()),
                    *o::literal(self.event_name.as_str()),
                    *event_listener,
                ],
            ),
            None => renderer.call_method(
                RendererMethods::LISTEN,
                vec![
                    (*element.render_node).clone(),
                    *o::literal(self.event_name.as_str()),
                    *event_listener,
                ],
            ),
        };

        let disposable = o::ReadVarExpr::new(format!("disposable_{}", view.disposables.len()));
        view.disposables.push(o::Expression::ReadVar(disposable.clone()));
        trace!(method = %self.method_name, disposable = %disposable.name, "listening on renderer");
        view.create_method.add_stmt(
            disposable
                .set(listen_expr)
                .to_decl_stmt(Some(o::function_type()), o::StmtModifier::PRIVATE),
        );
    }

    /// Subscribes the handler to `directive_instance.<observable_prop_name>`.
    pub fn listen_to_directive(
        &self,
        view: &mut CompileView,
        directive_instance: &o::Expression,
        observable_prop_name: &str,
    ) {
        let subscription = o::ReadVarExpr::new(format!("subscription_{}", view.subscriptions.len()));
        view.subscriptions.push(o::Expression::ReadVar(subscription.clone()));
        let event_listener = self.handler_fn(false);
        trace!(
            method = %self.method_name,
            output = observable_prop_name,
            subscription = %subscription.name,
            "subscribing to directive output"
        );
        view.create_method.add_stmt(
            subscription
                .set(
                    directive_instance
                        .prop(observable_prop_name)
                        .call_method(SUBSCRIBE_OBSERVABLE, vec![*event_listener]),
                )
                .to_decl_stmt(None, o::StmtModifier::FINAL),
        );
    }
}

/// Builds one handler method per distinct `(target, event)` among the
/// element's own bindings and its directives' host listeners, in first
/// occurrence order. Element bindings are collected before directive ones.
///
/// `element.directive_instances[i]` must be the instance of `dirs[i]`.
pub fn collect_event_listeners(
    host_events: &[BoundEventAst],
    dirs: &[DirectiveAst],
    element: &CompileElement,
    view: &mut CompileView,
    lowering: &mut dyn ExpressionLowering,
) -> Result<Vec<BoundEventListener>> {
    if dirs.len() != element.directive_instances.len() {
        return Err(CompileError::internal(format!(
            "element {} has {} directives but {} directive instances",
            element.node_index,
            dirs.len(),
            element.directive_instances.len()
        )));
    }

    let mut event_listeners: Vec<CompileEventListener> = Vec::new();

    for host_event in host_events {
        view.bindings
            .push(CompileBinding::new(element.node_index, host_event.clone()));
        let listener = CompileEventListener::get_or_create(
            element,
            view,
            host_event.target.as_deref(),
            &host_event.name,
            &mut event_listeners,
        );
        listener.add_action(view, lowering, host_event, None, None)?;
    }

    for (directive_ast, directive_instance) in dirs.iter().zip(&element.directive_instances) {
        for host_event in &directive_ast.host_events {
            view.bindings
                .push(CompileBinding::new(element.node_index, host_event.clone()));
            let listener = CompileEventListener::get_or_create(
                element,
                view,
                host_event.target.as_deref(),
                &host_event.name,
                &mut event_listeners,
            );
            listener.add_action(
                view,
                lowering,
                host_event,
                Some(&directive_ast.directive),
                Some(&**directive_instance),
            )?;
        }
    }

    debug!(
        node_index = element.node_index,
        listeners = event_listeners.len(),
        "collected event listeners"
    );
    Ok(event_listeners
        .into_iter()
        .map(|listener| listener.finish_method(view, element))
        .collect())
}

/// Subscribes listeners to every output of `directive_ast` whose event name
/// they handle, in the directive's output declaration order.
pub fn bind_directive_outputs(
    directive_ast: &DirectiveAst,
    directive_instance: &o::Expression,
    event_listeners: &[BoundEventListener],
    view: &mut CompileView,
) {
    for (event_name, observable_prop_name) in &directive_ast.directive.outputs {
        for listener in event_listeners
            .iter()
            .filter(|listener| listener.event_name == *event_name)
        {
            listener.listen_to_directive(view, directive_instance, observable_prop_name);
        }
    }
}

/// Registers every listener with the renderer.
pub fn bind_render_outputs(
    event_listeners: &[BoundEventListener],
    view: &mut CompileView,
    element: &CompileElement,
) {
    for listener in event_listeners {
        listener.listen_to_renderer(view, element);
    }
}
