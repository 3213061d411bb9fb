// File: src/request.rs
// Purpose: Route request descriptor and ambient query parameters

use crate::argv::Argv;
use std::collections::HashMap;

/// One inbound routing request: either a raw path, or explicit
/// controller/action/params/argv fields.
///
/// Path-based interpretation takes priority when a path is present.
/// Among the explicit fields, `argv` overrides `params` + `action`.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub path: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
    pub params: Vec<String>,
    pub argv: Option<Vec<String>>,
}

impl RouteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn with_argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = Some(argv.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Resolves the explicit fields into an argument vector, honoring
    /// the `argv` > `params`+`action` precedence. Path parsing happens
    /// in the dispatcher instead.
    pub fn explicit_argv(&self) -> Argv {
        match &self.argv {
            Some(argv) => Argv::from_parts(None, argv.clone()),
            None => Argv::from_parts(self.action.clone(), self.params.clone()),
        }
    }
}

/// Ambient query-parameter store for one request.
///
/// Keyed arguments parsed from the request path are merged in without
/// overwriting pre-existing entries; controllers and templates may rely
/// on that side effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Inserts every entry whose key is not already present; existing
    /// entries are never overwritten.
    pub fn merge_absent(&mut self, incoming: &HashMap<String, String>) {
        for (key, value) in incoming {
            self.params
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}
