//! # Wrought Paths
//!
//! Containment-checked path resolution for the Wrought framework.
//!
//! Every controller and template lookup in Wrought goes through
//! [`resolve_within`] before any file is read or executed. The check
//! canonicalizes both the base directory and the candidate, so `..`
//! segments and symlinks that point outside the base are rejected the
//! same way a plain miss is: with `None`. Callers fall back to their
//! configured substitute (404 controller, previous template slot) and
//! never see a distinct traversal error.

use std::path::Path;

/// Resolves `relative` against `base` and verifies the result stays
/// inside `base`.
///
/// Returns the canonical path *relative to* `base` (with `/` separators)
/// when the file exists and is contained. An empty `relative` is an
/// explicit no-op success and yields an empty string.
///
/// Returns `None` when:
/// - `base` does not exist or cannot be canonicalized,
/// - the candidate does not exist,
/// - the candidate canonicalizes outside `base` (`..` escape or a
///   symlink resolving elsewhere).
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use wrought_paths::resolve_within;
///
/// let hit = resolve_within(Path::new("/srv/site/templates"), "header.html");
/// let miss = resolve_within(Path::new("/srv/site/templates"), "../secrets.toml");
/// assert!(miss.is_none());
/// ```
pub fn resolve_within(base: &Path, relative: &str) -> Option<String> {
    if relative.is_empty() {
        return Some(String::new());
    }

    let canonical_base = base.canonicalize().ok()?;
    let candidate = canonical_base.join(relative);
    // canonicalize fails on missing files, so existence and symlink
    // resolution are handled in one step
    let canonical = candidate.canonicalize().ok()?;

    if !canonical.starts_with(&canonical_base) {
        return None;
    }

    let rel = canonical
        .strip_prefix(&canonical_base)
        .ok()?
        .to_path_buf();

    Some(to_slash(&rel))
}

/// Checks whether `path` exists and lies inside `base` after symlink
/// resolution. Convenience predicate over [`resolve_within`].
pub fn is_contained(base: &Path, relative: &str) -> bool {
    resolve_within(base, relative).is_some()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
