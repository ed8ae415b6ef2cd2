//! Names shared by the generated view classes.

use crate::output::output_ast as o;

/// Variables visible inside generated event handlers.
pub struct EventHandlerVars;

impl EventHandlerVars {
    pub const EVENT: &'static str = "$event";

    pub fn event() -> Box<o::Expression> {
        o::variable(Self::EVENT)
    }
}

/// Properties of the generated view class.
pub struct ViewProperties;

impl ViewProperties {
    pub const RENDERER: &'static str = "renderer";
    pub const CONTEXT: &'static str = "context";

    pub fn renderer() -> Box<o::Expression> {
        o::this_expr().prop(Self::RENDERER)
    }

    pub fn context() -> Box<o::Expression> {
        o::this_expr().prop(Self::CONTEXT)
    }
}

/// Runtime methods called by generated code.
pub struct ViewMethods;

impl ViewMethods {
    pub const MARK_PATH_TO_ROOT_AS_CHECK_ONCE: &'static str = "markPathToRootAsCheckOnce";
    pub const EVENT_HANDLER: &'static str = "eventHandler";
    pub const DEBUG: &'static str = "debug";
}

pub struct RendererMethods;

impl RendererMethods {
    pub const LISTEN: &'static str = "listen";
    pub const LISTEN_GLOBAL: &'static str = "listenGlobal";
}

/// Property of an app element holding the nested component view.
pub const COMPONENT_VIEW: &str = "componentView";

/// Subscribes to an observable output.
pub const SUBSCRIBE_OBSERVABLE: &str = "subscribe";
