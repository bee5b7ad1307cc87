//! The dispatch engine.
//!
//! A [`ComponentManager`] owns one resolved component for the duration of a
//! request and executes one action against it:
//!
//! ```text
//! action name
//!   → method or listener?        (ComponentMethodNotFound)
//!   → visibility gate            (NonPublicComponentMethodCall)
//!   → boot → mount
//!   → action body                (InvalidActionResult unless null/string)
//!   → before_render → render
//! ```
//!
//! Anonymous components skip routing and the gate: `boot → mount → render`.

use serde_json::Value;
use tracing::{debug, trace, warn};

use spindle_render::{RenderOutput, ViewProvider};

use crate::args::{parse_action_arguments, ActionArgs};
use crate::component::{is_base_method, Listeners, Props, Vars};
use crate::config::Config;
use crate::error::{DispatchError, LifecyclePhase};
use crate::implementation::{AnonymousComponent, DynamicComponent, Implementation};
use crate::request::RequestContext;
use crate::resolver::Resolver;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Request key holding the raw action argument string.
pub const ACTION_ARGS_KEY: &str = "actionArgs";

/// Request key holding the event payload for listener-routed actions.
pub const EVENT_PARAMS_KEY: &str = "eventParams";

/// The method an action name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    method: String,
    event_routed: bool,
}

/// Executes actions against one resolved component.
pub struct ComponentManager<'a> {
    request: &'a dyn RequestContext,
    views: &'a dyn ViewProvider,
    config: &'a Config,
    component: Implementation,
    spinning: bool,
}

impl<'a> ComponentManager<'a> {
    /// Resolves `name` and wraps the result.
    pub fn new(
        resolver: &Resolver<'a>,
        request: &'a dyn RequestContext,
        id: &str,
        name: &str,
        spinning: bool,
    ) -> Result<Self, DispatchError> {
        let component = resolver.resolve(id, name)?;
        Ok(Self::from_implementation(
            component,
            request,
            resolver.views(),
            resolver.config(),
            spinning,
        ))
    }

    /// Wraps an already-resolved component.
    pub fn from_implementation(
        component: Implementation,
        request: &'a dyn RequestContext,
        views: &'a dyn ViewProvider,
        config: &'a Config,
        spinning: bool,
    ) -> Self {
        Self {
            request,
            views,
            config,
            component,
            spinning,
        }
    }

    /// Executes `action` and renders the component.
    pub fn process(
        &mut self,
        action: &str,
        variables: &Vars,
        attributes: &Vars,
    ) -> Result<RenderOutput, DispatchError> {
        let props = Props {
            variables,
            attributes,
            spinning: self.spinning,
        };
        let (request, views) = (self.request, self.views);

        match &mut self.component {
            Implementation::Anonymous(component) => process_anonymous(component, views, &props),
            Implementation::Dynamic(component) => {
                let target = route(component, action)?;
                check_visibility(component, &target)?;

                run_mount(component, &props)?;
                let args = gather_arguments(request, &target);
                invoke(component, &target, &args)?;
                finish_render(component, views)
            }
        }
    }

    /// Re-renders the component without running an action.
    ///
    /// A plain refresh cannot be requested through `process`: `render` is a
    /// framework method and never passes the visibility gate.
    pub fn refresh(
        &mut self,
        variables: &Vars,
        attributes: &Vars,
    ) -> Result<RenderOutput, DispatchError> {
        let props = Props {
            variables,
            attributes,
            spinning: self.spinning,
        };
        let views = self.views;

        match &mut self.component {
            Implementation::Anonymous(component) => process_anonymous(component, views, &props),
            Implementation::Dynamic(component) => {
                run_mount(component, &props)?;
                finish_render(component, views)
            }
        }
    }

    /// True if the component is template-only.
    pub fn is_anonymous(&self) -> bool {
        matches!(self.component, Implementation::Anonymous(_))
    }

    /// True if the component is class-backed.
    pub fn is_dynamic(&self) -> bool {
        !self.is_anonymous()
    }

    /// State exposed to templates.
    ///
    /// For anonymous components this is the request input minus reserved keys,
    /// on read requests only.
    pub fn public_vars(&self) -> Vars {
        match &self.component {
            Implementation::Anonymous(_) => self.request_state(),
            Implementation::Dynamic(component) => component.public_vars(),
        }
    }

    /// Initial values of the exposed state.
    pub fn default_public_vars(&self) -> Vars {
        match &self.component {
            Implementation::Anonymous(_) => Vars::new(),
            Implementation::Dynamic(component) => component.default_public_vars(),
        }
    }

    /// Names of state entries mirrored into the query string.
    pub fn query_string(&self) -> Vec<String> {
        match &self.component {
            Implementation::Anonymous(_) => {
                self.request_state().into_iter().map(|(k, _)| k).collect()
            }
            Implementation::Dynamic(component) => component.query_string(),
        }
    }

    /// The component's listener map. Empty for anonymous components.
    pub fn listeners(&self) -> Listeners {
        match &self.component {
            Implementation::Anonymous(_) => Listeners::new(),
            Implementation::Dynamic(component) => component.listeners(),
        }
    }

    /// The wrapped component.
    pub fn component(&self) -> &Implementation {
        &self.component
    }

    /// Unwraps the component.
    pub fn into_component(self) -> Implementation {
        self.component
    }

    fn request_state(&self) -> Vars {
        if !self.request.is_read() {
            return Vars::new();
        }
        self.request.except(&self.config.reserved_keys())
    }
}

/// Event payload for listener-routed actions, parsed argument string otherwise.
fn gather_arguments(request: &dyn RequestContext, target: &Target) -> ActionArgs {
    if target.event_routed {
        return ActionArgs::from_event_params(
            request.input_or(EVENT_PARAMS_KEY, Value::Object(Vars::new())),
        );
    }
    let raw = request
        .input(ACTION_ARGS_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    ActionArgs::from(parse_action_arguments(raw))
}

fn process_anonymous(
    component: &mut AnonymousComponent,
    views: &dyn ViewProvider,
    props: &Props<'_>,
) -> Result<RenderOutput, DispatchError> {
    trace!(target: DISPATCH_TARGET, view = component.name(), "rendering anonymous component");
    component.boot(props);
    Ok(RenderOutput::Text(component.render(views)?))
}

/// Maps an action name to a method, re-routing through the listener map.
fn route(component: &DynamicComponent, action: &str) -> Result<Target, DispatchError> {
    if component.has_action(action) || is_base_method(action) {
        return Ok(Target {
            method: action.to_string(),
            event_routed: false,
        });
    }

    let listeners = component.listeners();
    let method = listeners
        .get(action)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| DispatchError::method_not_found(component.type_path(), action))?;

    if !component.has_action(method) && !is_base_method(method) {
        return Err(DispatchError::method_not_found(component.type_path(), method.as_str()));
    }

    debug!(
        target: DISPATCH_TARGET,
        component = component.type_path(),
        event = action,
        method = method.as_str(),
        "routing event to listener"
    );
    Ok(Target {
        method: method.clone(),
        event_routed: true,
    })
}

/// Rejects framework methods always, and non-public actions unless event-routed.
fn check_visibility(component: &DynamicComponent, target: &Target) -> Result<(), DispatchError> {
    let is_public = component
        .action_visibility(&target.method)
        .map(|v| v.is_public())
        .unwrap_or(false);

    if is_base_method(&target.method) || (!target.event_routed && !is_public) {
        warn!(
            target: DISPATCH_TARGET,
            component = component.type_path(),
            action = target.method.as_str(),
            event_routed = target.event_routed,
            "rejected non-public component method call"
        );
        return Err(DispatchError::non_public(
            component.type_path(),
            target.method.as_str(),
        ));
    }
    Ok(())
}

fn run_mount(component: &mut DynamicComponent, props: &Props<'_>) -> Result<(), DispatchError> {
    let type_path = component.type_path().to_string();
    let inner = component.inner_mut();

    trace!(target: DISPATCH_TARGET, component = %type_path, spinning = props.spinning, "boot");
    inner
        .boot(props)
        .map_err(|e| DispatchError::lifecycle(&type_path, LifecyclePhase::Boot, e))?;

    trace!(target: DISPATCH_TARGET, component = %type_path, "mount");
    inner
        .mount()
        .map_err(|e| DispatchError::lifecycle(&type_path, LifecyclePhase::Mount, e))
}

fn invoke(
    component: &mut DynamicComponent,
    target: &Target,
    args: &ActionArgs,
) -> Result<(), DispatchError> {
    let type_path = component.type_path().to_string();

    let response = component
        .inner_mut()
        .call_action(&target.method, args)
        .ok_or_else(|| DispatchError::method_not_found(&type_path, target.method.as_str()))?
        .map_err(|e| DispatchError::lifecycle(&type_path, LifecyclePhase::Action, e))?;

    match value_kind(&response) {
        None => {
            trace!(target: DISPATCH_TARGET, component = %type_path, action = target.method.as_str(), "action completed");
            Ok(())
        }
        Some(kind) => Err(DispatchError::InvalidActionResult {
            component: type_path,
            action: target.method.clone(),
            kind,
        }),
    }
}

/// Kind name of a disallowed action result; `None` for null and strings.
fn value_kind(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null | Value::String(_) => None,
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_f64() => Some("double"),
        Value::Number(_) => Some("integer"),
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
    }
}

fn finish_render(
    component: &mut DynamicComponent,
    views: &dyn ViewProvider,
) -> Result<RenderOutput, DispatchError> {
    let type_path = component.type_path().to_string();

    component
        .inner_mut()
        .before_render()
        .map_err(|e| DispatchError::lifecycle(&type_path, LifecyclePhase::BeforeRender, e))?;

    let output = component
        .inner_mut()
        .render()
        .map_err(|e| DispatchError::lifecycle(&type_path, LifecyclePhase::Render, e))?;

    match output {
        RenderOutput::Text(template) => {
            let data = Value::Object(component.public_vars());
            Ok(RenderOutput::Text(views.render_template_string(&template, &data)?))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&Value::Null), None);
        assert_eq!(value_kind(&json!("ok")), None);
        assert_eq!(value_kind(&json!(true)), Some("boolean"));
        assert_eq!(value_kind(&json!(3)), Some("integer"));
        assert_eq!(value_kind(&json!(3.5)), Some("double"));
        assert_eq!(value_kind(&json!([1])), Some("array"));
        assert_eq!(value_kind(&json!({"a": 1})), Some("object"));
    }
}
