// File: src/controller.rs
// Purpose: Controller contract and construction registry

use crate::argv::Argv;
use crate::view::View;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque data-access handle passed through to controllers.
/// None if no database is configured.
pub type DataHandle = Option<Arc<sqlx::AnyPool>>;

/// One request-handling unit, selected per request by name.
///
/// Controllers are constructed by a [`ControllerFactory`] from the
/// argument vector and the data handle, execute exactly one action per
/// request, and either mutate the shared [`View`] in place or return a
/// replacement.
pub trait Controller {
    /// Lower-case name of the requested action
    fn action(&self) -> String;

    /// Explicit capability query: does this controller handle `action`?
    fn supports_action(&self, action: &str) -> bool;

    /// Executes the requested action. Returning `Some(view)` replaces
    /// the ambient view wholesale.
    fn act(&mut self, view: &mut View) -> Option<View>;
}

/// Derives the action from the argument vector: lower-cased segment 0,
/// or the configured default when the vector is empty.
pub fn action_from_argv(argv: &Argv, default_action: &str) -> String {
    argv.action()
        .filter(|a| !a.is_empty())
        .unwrap_or(default_action)
        .to_lowercase()
}

/// Factory constructing a controller from per-request inputs
pub type ControllerFactory =
    Box<dyn Fn(Argv, DataHandle) -> Box<dyn Controller> + Send + Sync>;

/// Name-to-factory registry: the narrow construction interface the
/// dispatcher uses to instantiate resolved controllers.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a controller name (builder style)
    pub fn with_controller<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Argv, DataHandle) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Constructs the named controller, or None if no factory is
    /// registered under that name
    pub fn build(&self, name: &str, argv: Argv, db: DataHandle) -> Option<Box<dyn Controller>> {
        self.factories.get(name).map(|factory| factory(argv, db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_argv() {
        let argv = Argv::from_segments(vec!["Edit".to_string(), "id".to_string()]);
        assert_eq!(action_from_argv(&argv, "index"), "edit");

        let empty = Argv::new();
        assert_eq!(action_from_argv(&empty, "index"), "index");

        let blank = Argv::from_segments(vec![String::new()]);
        assert_eq!(action_from_argv(&blank, "list"), "list");
    }

    struct Probe {
        action: String,
    }

    impl Controller for Probe {
        fn action(&self) -> String {
            self.action.clone()
        }

        fn supports_action(&self, action: &str) -> bool {
            action == "index"
        }

        fn act(&mut self, _view: &mut View) -> Option<View> {
            None
        }
    }

    #[test]
    fn test_registry_builds_by_name() {
        let registry = ControllerRegistry::new().with_controller("Probe", |argv, _db| {
            Box::new(Probe {
                action: action_from_argv(&argv, "index"),
            })
        });

        assert!(registry.contains("Probe"));
        assert!(!registry.contains("Ghost"));

        let controller = registry
            .build("Probe", Argv::from_segments(vec!["Index".into()]), None)
            .unwrap();
        assert_eq!(controller.action(), "index");
        assert!(controller.supports_action("index"));
        assert!(!controller.supports_action("delete"));

        assert!(registry.build("Ghost", Argv::new(), None).is_none());
    }
}
