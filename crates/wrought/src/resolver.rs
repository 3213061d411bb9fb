// File: src/resolver.rs
// Purpose: Controller name resolution against the include path

use std::path::{Path, PathBuf};
use wrought_paths::resolve_within;

/// A resolved controller: its name and the include-path directory that
/// holds its artifact
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerIdentity {
    pub name: String,
    pub base: PathBuf,
}

impl ControllerIdentity {
    pub fn new(name: impl Into<String>, base: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
        }
    }

    /// Hard-coded last-resort identity used when even the configured
    /// 404 controller cannot be found
    pub fn builtin(root: &Path) -> Self {
        Self::new("Default", root.join("default").join("controllers"))
    }
}

/// Resolves controller names to identities over an ordered list of
/// candidate directories, falling back to a preconfigured 404 identity.
pub struct ControllerResolver {
    dirs: Vec<PathBuf>,
    ext: String,
    fallback: ControllerIdentity,
}

impl ControllerResolver {
    /// Builds a resolver over `dirs` (priority order) with artifact
    /// extension `ext`.
    ///
    /// The configured 404 controller name is itself resolved against
    /// `dirs` here, at configuration time; when it is found nowhere the
    /// built-in default identity remains the fallback.
    pub fn new(dirs: Vec<PathBuf>, root: &Path, controller_404: &str, ext: &str) -> Self {
        let mut resolver = Self {
            dirs,
            ext: ext.to_string(),
            fallback: ControllerIdentity::builtin(root),
        };

        if let Some(identity) = resolver.find(controller_404) {
            resolver.fallback = identity;
        } else {
            tracing::debug!(
                controller = controller_404,
                "configured 404 controller not found, keeping built-in default"
            );
        }

        resolver
    }

    /// First-match resolution: the earliest directory containing the
    /// containment-checked artifact wins. Exhausting the candidates
    /// yields the 404 identity; resolution never fails.
    pub fn resolve(&self, name: &str) -> ControllerIdentity {
        if let Some(identity) = self.find(name) {
            return identity;
        }
        tracing::debug!(controller = name, "controller not found, using 404 identity");
        self.fallback.clone()
    }

    /// The identity substituted on resolution misses
    pub fn fallback(&self) -> &ControllerIdentity {
        &self.fallback
    }

    /// Expected artifact filename for a controller name
    pub fn artifact_name(&self, name: &str) -> String {
        format!("{}Controller.{}", name, self.ext)
    }

    fn find(&self, name: &str) -> Option<ControllerIdentity> {
        let artifact = self.artifact_name(name);
        for dir in &self.dirs {
            if resolve_within(dir, &artifact).is_some() {
                return Some(ControllerIdentity::new(name, dir.clone()));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, file: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), "").unwrap();
    }

    fn resolver_over(root: &Path, segments: &[&str], not_found: &str) -> ControllerResolver {
        let dirs = segments
            .iter()
            .map(|s| root.join(s).join("controllers"))
            .collect();
        ControllerResolver::new(dirs, root, not_found, "rs")
    }

    #[test]
    fn test_first_match_wins_over_later_dirs() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a/controllers"), "BlogController.rs");
        touch(&tmp.path().join("b/controllers"), "BlogController.rs");
        touch(&tmp.path().join("b/controllers"), "DefaultController.rs");

        let resolver = resolver_over(tmp.path(), &["a", "b"], "Default");
        let identity = resolver.resolve("Blog");
        assert_eq!(identity.name, "Blog");
        assert!(identity.base.ends_with("a/controllers"));
    }

    #[test]
    fn test_match_in_any_position_is_found() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a/controllers"), "DefaultController.rs");
        touch(&tmp.path().join("b/controllers"), "ShopController.rs");

        let resolver = resolver_over(tmp.path(), &["a", "b"], "Default");
        let identity = resolver.resolve("Shop");
        assert_eq!(identity.name, "Shop");
        assert!(identity.base.ends_with("b/controllers"));
    }

    #[test]
    fn test_miss_falls_back_to_configured_404() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a/controllers"), "DefaultController.rs");

        let resolver = resolver_over(tmp.path(), &["a"], "Default");
        let identity = resolver.resolve("Ghost");
        assert_eq!(identity.name, "Default");
        assert!(identity.base.ends_with("a/controllers"));
    }

    #[test]
    fn test_unresolvable_404_keeps_builtin_default() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a/controllers"), "HomeController.rs");

        let resolver = resolver_over(tmp.path(), &["a"], "Missing404");
        let identity = resolver.resolve("Ghost");
        assert_eq!(identity, ControllerIdentity::builtin(tmp.path()));
    }

    #[test]
    fn test_traversal_style_name_cannot_escape() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a/controllers"), "DefaultController.rs");
        // artifact outside the candidate dir
        touch(&tmp.path().join("outside"), "EvilController.rs");

        let resolver = resolver_over(tmp.path(), &["a"], "Default");
        let identity = resolver.resolve("../../outside/Evil");
        assert_eq!(identity.name, "Default");
    }
}
