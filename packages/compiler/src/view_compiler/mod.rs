//! View Compiler Module
//!
//! Generates the event handling part of a view class: handler methods, and
//! the creation statements that attach them to the renderer and to
//! directive outputs.

pub mod compile_binding;
pub mod compile_element;
pub mod compile_method;
pub mod compile_view;
pub mod constants;
pub mod event_binder;
pub mod expression_converter;
pub mod view_binder;

pub use compile_binding::CompileBinding;
pub use compile_element::CompileElement;
pub use compile_method::CompileMethod;
pub use compile_view::CompileView;
pub use event_binder::{
    bind_directive_outputs, bind_render_outputs, collect_event_listeners, ActionResult,
    BoundEventListener, CompileEventListener,
};
pub use expression_converter::{ActionConverter, ExpressionLowering};
pub use view_binder::{bind_element_events, bind_view_events};
