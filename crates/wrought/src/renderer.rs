// File: src/renderer.rs
// Purpose: Template interpolation against a value scope

use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Executes template text against an explicit variable scope.
///
/// Substitutes `{name}` and `{a.b.c}` references with the rendered form
/// of the matching [`Value`]; unknown names are left literal so template
/// authors can spot them in output.
pub struct Renderer {
    scope: HashMap<String, Value>,
}

impl Renderer {
    pub fn new(scope: HashMap<String, Value>) -> Self {
        Self { scope }
    }

    /// Renders template content, capturing the output as a string
    pub fn render(&self, content: &str) -> String {
        static VAR_REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_\.]*)\}").unwrap());

        VAR_REGEX
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                self.lookup(name)
                    .map(Value::render)
                    .unwrap_or_else(|| format!("{{{}}}", name))
            })
            .to_string()
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.scope.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }
}
