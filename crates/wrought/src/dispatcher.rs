// File: src/dispatcher.rs
// Purpose: Request parsing, controller resolution, and action dispatch

use crate::argv::Argv;
use crate::config::Config;
use crate::controller::{ControllerRegistry, DataHandle};
use crate::request::{QueryParams, RouteRequest};
use crate::resolver::{ControllerIdentity, ControllerResolver};
use crate::value::Value;
use crate::view::View;

/// Canonical controller name: lower-cased with the first letter raised,
/// matching the `<Name>Controller.<ext>` artifact convention
fn canonical_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Routes one request to a controller and runs its action against the
/// ambient [`View`].
///
/// [`Dispatcher::route`] interprets the request (path segments or
/// explicit fields) into a resolved controller identity and an argument
/// vector; [`Dispatcher::dispatch`] constructs the controller, applies
/// the 404 substitutions, and executes the action. Misses degrade, they
/// never fail: an unresolvable controller becomes the 404 identity, an
/// unsupported action swaps in the 404 controller, and a registry with
/// no matching factory leaves the view untouched.
pub struct Dispatcher {
    resolver: ControllerResolver,
    default_action: String,
    template_ext: String,
    db: DataHandle,
    controller: ControllerIdentity,
    argv: Argv,
}

impl Dispatcher {
    pub fn new(cfg: &Config, db: DataHandle) -> Self {
        let resolver = ControllerResolver::new(
            cfg.controller_dirs(),
            &cfg.site.root,
            &cfg.routing.controller_404,
            &cfg.routing.controller_ext,
        );
        let controller = resolver.fallback().clone();

        Self {
            resolver,
            default_action: cfg.routing.default_action.clone(),
            template_ext: cfg.view.template_ext.clone(),
            db,
            controller,
            argv: Argv::new(),
        }
    }

    /// Interprets the request into the controller identity and argument
    /// vector used by [`Dispatcher::dispatch`].
    ///
    /// A path takes priority: it is trimmed of slashes, split on `/`,
    /// and percent-decoded per segment; the first segment names the
    /// controller and the remainder becomes the argument vector, whose
    /// keyed view is merged into `query` without overwriting. Without a
    /// path the explicit fields apply, `argv` over `params` + `action`.
    /// An empty vector is seeded with the configured default action.
    pub fn route(&mut self, request: &RouteRequest, query: &mut QueryParams) {
        let name = match &request.path {
            Some(path) => {
                let mut segments = path
                    .trim_matches('/')
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(|s| match urlencoding::decode(s) {
                        Ok(decoded) => decoded.into_owned(),
                        Err(_) => s.to_string(),
                    });

                let name = segments.next().unwrap_or_default();
                self.argv = Argv::from_segments(segments.collect());
                query.merge_absent(self.argv.keyed());
                name
            }
            None => {
                self.argv = request.explicit_argv();
                request.controller.clone().unwrap_or_default()
            }
        };

        if self.argv.is_empty() {
            self.argv = Argv::from_parts(Some(self.default_action.clone()), Vec::new());
        }

        self.controller = self.resolver.resolve(&canonical_name(&name));
    }

    /// The identity resolved by the last [`Dispatcher::route`] call
    pub fn controller(&self) -> &ControllerIdentity {
        &self.controller
    }

    pub fn argv(&self) -> &Argv {
        &self.argv
    }

    /// Constructs the routed controller and executes its action.
    ///
    /// The main template slot is bound to the requested
    /// `<Controller>.<action>.<ext>` pair before the capability check and
    /// is never rebound: when the controller does not support the action
    /// the 404 controller is substituted with the same argument vector
    /// but still renders the originally requested template if it exists.
    /// Afterwards `_action` is recorded on the view unless the action
    /// already set it. A controller returning a replacement view swaps it
    /// in wholesale.
    pub fn dispatch(&self, registry: &ControllerRegistry, mut view: View) -> View {
        let Some((mut identity, mut controller)) = self.build_with_fallback(registry) else {
            tracing::warn!(
                controller = %self.controller.name,
                "no controller factory registered, leaving view untouched"
            );
            return view;
        };

        let action = controller.action();
        view.set_template(
            "template",
            &format!("{}.{}.{}", identity.name, action, self.template_ext),
        );

        if !controller.supports_action(&action) {
            let fallback = self.resolver.fallback();
            if fallback.name != identity.name {
                if let Some(substitute) =
                    registry.build(&fallback.name, self.argv.clone(), self.db.clone())
                {
                    tracing::debug!(
                        controller = %identity.name,
                        action = %action,
                        "action unsupported, substituting 404 controller"
                    );
                    identity = fallback.clone();
                    controller = substitute;
                }
            }
        }

        view.set_attr("_controller", Value::from(identity.name.to_lowercase()));

        if let Some(replacement) = controller.act(&mut view) {
            view = replacement;
        }

        if !view.has_attr("_action") {
            view.set_attr("_action", Value::from(action));
        }

        view
    }

    fn build_with_fallback(
        &self,
        registry: &ControllerRegistry,
    ) -> Option<(ControllerIdentity, Box<dyn crate::controller::Controller>)> {
        if let Some(controller) =
            registry.build(&self.controller.name, self.argv.clone(), self.db.clone())
        {
            return Some((self.controller.clone(), controller));
        }

        let fallback = self.resolver.fallback();
        if fallback.name != self.controller.name {
            if let Some(controller) =
                registry.build(&fallback.name, self.argv.clone(), self.db.clone())
            {
                tracing::debug!(
                    controller = %self.controller.name,
                    "resolved controller has no factory, using 404 controller"
                );
                return Some((fallback.clone(), controller));
            }
        }

        None
    }
}
