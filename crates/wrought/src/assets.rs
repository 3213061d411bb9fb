// File: src/assets.rs
// Purpose: Head-asset registries and minified-name helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// One LINK tag registered for the document head
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTag {
    pub rel: String,
    pub ty: String,
    pub href: String,
    pub title: String,
}

/// Ordered registries of head assets populated by controllers
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    meta: Vec<(String, String)>,
    scripts: Vec<String>,
    links: Vec<LinkTag>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_meta(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.meta.push((name.into(), content.into()));
    }

    pub fn add_script(&mut self, src: impl Into<String>) {
        self.scripts.push(src.into());
    }

    pub fn add_link(
        &mut self,
        rel: impl Into<String>,
        ty: impl Into<String>,
        href: impl Into<String>,
        title: impl Into<String>,
    ) {
        self.links.push(LinkTag {
            rel: rel.into(),
            ty: ty.into(),
            href: href.into(),
            title: title.into(),
        });
    }

    pub fn meta(&self) -> &[(String, String)] {
        &self.meta
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn scripts_mut(&mut self) -> &mut [String] {
        &mut self.scripts
    }

    pub fn links(&self) -> &[LinkTag] {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut [LinkTag] {
        &mut self.links
    }

    /// Hrefs of every registered stylesheet link, in order
    pub fn stylesheet_urls(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|link| link.rel == "stylesheet")
            .map(|link| link.href.clone())
            .collect()
    }
}

/// Matches namespaced script paths like `/js/app.widget.js` that
/// receive a cache-busting version suffix
pub fn is_namespaced_script(src: &str) -> bool {
    static SCRIPT_ASSET: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^/[^/].*/\w+\.\w+\.js$").unwrap());
    SCRIPT_ASSET.is_match(src)
}

/// Matches namespaced stylesheet paths like `/css/site.print.css`
pub fn is_namespaced_style(src: &str) -> bool {
    static STYLE_ASSET: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^/[^/].*/\w+\.\w+\.css$").unwrap());
    STYLE_ASSET.is_match(src)
}

/// Minified counterpart of an asset filename: `app.widget.js` becomes
/// `app.widget.min.js`; names already carrying `.min.<ext>` pass through.
pub fn min_name(filename: &str) -> String {
    let basename = filename.rsplit('/').next().unwrap_or(filename);
    let ext = match basename.rfind('.') {
        Some(idx) => &basename[idx..],
        None => return basename.to_string(),
    };

    if basename.ends_with(&format!(".min{}", ext)) {
        basename.to_string()
    } else {
        let stem = &basename[..basename.len() - ext.len()];
        format!("{}.min{}", stem, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/js/app.widget.js", "app.widget.min.js")]
    #[case("/js/lib/app.widget.min.js", "app.widget.min.js")]
    #[case("site.css", "site.min.css")]
    #[case("noext", "noext")]
    fn test_min_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(min_name(input), expected);
    }

    #[rstest]
    #[case("/js/app.widget.js", true)]
    #[case("/deep/dir/name.sub.js", true)]
    #[case("/app.js", false)] // no directory segment
    #[case("//host/app.widget.js", false)] // protocol-relative
    #[case("/js/plain.js", false)] // no namespaced name.sub
    fn test_namespaced_script_pattern(#[case] src: &str, #[case] expected: bool) {
        assert_eq!(is_namespaced_script(src), expected);
    }

    #[test]
    fn test_namespaced_style_pattern() {
        assert!(is_namespaced_style("/css/site.print.css"));
        assert!(!is_namespaced_style("/css/site.css"));
        assert!(!is_namespaced_style("/js/app.widget.js"));
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut assets = AssetRegistry::new();
        assets.add_script("/js/a.core.js");
        assets.add_script("/js/b.core.js");
        assets.add_link("stylesheet", "text/css", "/css/one.css", "");
        assets.add_link("icon", "image/png", "/favicon.png", "");
        assets.add_link("stylesheet", "text/css", "/css/two.css", "");
        assets.add_meta("author", "someone");

        assert_eq!(assets.scripts(), ["/js/a.core.js", "/js/b.core.js"]);
        assert_eq!(assets.stylesheet_urls(), ["/css/one.css", "/css/two.css"]);
        assert_eq!(assets.meta().len(), 1);
    }
}
