// File: src/argv.rs
// Purpose: Argument vector with coexisting positional and keyed views

use std::collections::HashMap;

/// Arguments passed to a controller for one request.
///
/// Holds the ordered positional segments (action at index 0) and a keyed
/// map built by pairing the post-action segments two at a time. The same
/// data appearing in both views is intentional; controllers read whichever
/// form suits the action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Argv {
    positional: Vec<String>,
    keyed: HashMap<String, String>,
}

impl Argv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the argument vector from decoded request-path segments
    /// (everything after the controller segment).
    ///
    /// Segments after the action are paired (key, value); the first
    /// pairing for a key wins. An odd trailing segment is dropped - a
    /// quirk of the original request format, kept as specified behavior.
    pub fn from_segments(segments: Vec<String>) -> Self {
        let mut keyed = HashMap::new();

        if segments.len() > 1 {
            let mut rest = segments[1..].iter();
            while let (Some(k), Some(v)) = (rest.next(), rest.next()) {
                keyed.entry(k.clone()).or_insert_with(|| v.clone());
            }
        }

        Self {
            positional: segments,
            keyed,
        }
    }

    /// Builds the argument vector from explicit action/params fields,
    /// with the action prepended at position 0. Keyed pairing only
    /// applies to path-derived arguments, so the keyed view stays empty.
    pub fn from_parts(action: Option<String>, params: Vec<String>) -> Self {
        let mut positional = params;
        if let Some(action) = action {
            positional.insert(0, action);
        }
        Self {
            positional,
            keyed: HashMap::new(),
        }
    }

    /// The requested action: positional segment 0
    pub fn action(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.keyed.get(key).map(String::as_str)
    }

    pub fn keyed(&self) -> &HashMap<String, String> {
        &self.keyed
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairing_after_action() {
        let argv = Argv::from_segments(segs(&["edit", "k1", "v1", "k2", "v2"]));

        assert_eq!(argv.action(), Some("edit"));
        assert_eq!(argv.positional().len(), 5);
        assert_eq!(argv.get("k1"), Some("v1"));
        assert_eq!(argv.get("k2"), Some("v2"));
    }

    #[test]
    fn test_odd_leftover_segment_is_dropped() {
        // Documented quirk: "v2" has no value partner and vanishes from
        // the keyed view while staying positional
        let argv = Argv::from_segments(segs(&["edit", "k1", "v1", "orphan"]));

        assert_eq!(argv.get("k1"), Some("v1"));
        assert_eq!(argv.get("orphan"), None);
        assert_eq!(argv.positional().last().map(String::as_str), Some("orphan"));
    }

    #[test]
    fn test_first_pairing_wins_on_duplicate_key() {
        let argv = Argv::from_segments(segs(&["list", "k", "first", "k", "second"]));
        assert_eq!(argv.get("k"), Some("first"));
    }

    #[rstest]
    #[case(&[], None, 0)]
    #[case(&["view"], Some("view"), 0)]
    #[case(&["view", "id", "9"], Some("view"), 1)]
    fn test_shapes(
        #[case] parts: &[&str],
        #[case] action: Option<&str>,
        #[case] keyed_len: usize,
    ) {
        let argv = Argv::from_segments(segs(parts));
        assert_eq!(argv.action(), action);
        assert_eq!(argv.keyed().len(), keyed_len);
    }

    #[test]
    fn test_from_parts_prepends_action_without_pairing() {
        let argv = Argv::from_parts(Some("save".to_string()), segs(&["id", "7"]));
        assert_eq!(argv.action(), Some("save"));
        assert_eq!(argv.positional(), &segs(&["save", "id", "7"])[..]);
        // pairing is a path-parsing behavior only
        assert!(argv.keyed().is_empty());

        let bare = Argv::from_parts(None, segs(&["a", "b"]));
        assert_eq!(bare.action(), Some("a"));
    }
}
