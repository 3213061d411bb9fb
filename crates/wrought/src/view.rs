// File: src/view.rs
// Purpose: View model - template slots, attribute bag, asset registries, rendering

use crate::assets::{self, AssetRegistry};
use crate::config::Config;
use crate::pdf::PdfBackend;
use crate::renderer::Renderer;
use crate::session::Session;
use crate::value::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use wrought_paths::resolve_within;

/// Attribute names that alias template slots; writes and reads on these
/// are redirected to the slot accessors instead of the open bag
const RESERVED_SLOTS: &[(&str, &str)] = &[
    ("_header", "header"),
    ("_footer", "footer"),
    ("_template", "template"),
];

fn reserved_slot(name: &str) -> Option<&'static str> {
    RESERVED_SLOTS
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, slot)| *slot)
}

/// Requested output format for one response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Pdf,
}

/// Final rendered response body
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Html(String),
    Pdf(Vec<u8>),
}

/// Per-request view model.
///
/// Holds the named template slots, the open attribute bag controllers
/// populate, and the head-asset registries. Constructed once per request,
/// mutated by the acting controller, and consumed exactly once by
/// [`View::output`].
pub struct View {
    templates: HashMap<String, String>,
    include_path: Vec<PathBuf>,
    site_root: PathBuf,
    production: bool,
    version: String,
    vals: HashMap<String, Value>,
    assets: AssetRegistry,
    session: Session,
    format: OutputFormat,
}

impl View {
    pub fn new(cfg: &Config, session: Session) -> Self {
        let ext = &cfg.view.template_ext;
        let templates = HashMap::from([
            ("header".to_string(), format!("header.{}", ext)),
            ("footer".to_string(), format!("footer.{}", ext)),
            ("template".to_string(), format!("404.{}", ext)),
            ("login".to_string(), format!("login.{}", ext)),
        ]);

        Self {
            templates,
            include_path: cfg.template_dirs(),
            site_root: cfg.site.root.clone(),
            production: cfg.is_production(),
            version: cfg.view.version.clone(),
            vals: HashMap::new(),
            assets: AssetRegistry::new(),
            session,
            format: OutputFormat::Html,
        }
    }

    /// Constructs a view and applies a seed bag: reserved slot aliases
    /// route to `set_template`, `_meta`/`_script`/`_link` seed the asset
    /// registries, everything else lands in the attribute bag.
    pub fn with_seed(cfg: &Config, session: Session, seed: HashMap<String, Value>) -> Self {
        let mut view = Self::new(cfg, session);
        for (key, value) in seed {
            match key.as_str() {
                "_meta" => {
                    if let Value::Map(map) = value {
                        for (name, content) in map {
                            view.add_meta(name, content.render());
                        }
                    }
                }
                "_script" => {
                    if let Value::List(items) = value {
                        for item in items {
                            view.add_script(item.render());
                        }
                    }
                }
                "_link" => {
                    if let Value::List(items) = value {
                        for item in items {
                            if let Value::Map(link) = item {
                                let field = |k: &str| {
                                    link.get(k).map(Value::render).unwrap_or_default()
                                };
                                view.add_link(
                                    field("rel"),
                                    field("type"),
                                    field("href"),
                                    field("title"),
                                );
                            }
                        }
                    }
                }
                _ => view.set_attr(&key, value),
            }
        }
        view
    }

    // ------------------------------------------------------------------
    // Template slots
    // ------------------------------------------------------------------

    /// Binds a slot to a template file, searching the include path in
    /// priority order through the containment check.
    ///
    /// On total failure the previously stored value is left untouched.
    /// Returns whatever the slot holds after the attempt.
    pub fn set_template(&mut self, slot: &str, file: &str) -> Option<String> {
        for dir in &self.include_path {
            if let Some(rel) = resolve_within(dir, file) {
                self.templates.insert(slot.to_string(), rel);
                break;
            }
        }
        self.templates.get(slot).cloned()
    }

    pub fn get_template(&self, slot: &str) -> Option<&str> {
        self.templates.get(slot).map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Attribute bag with reserved-name redirect
    // ------------------------------------------------------------------

    /// Writes an attribute. Reserved slot aliases (`_header`, `_footer`,
    /// `_template`) are redirected to [`View::set_template`]; all other
    /// names go into the open bag.
    pub fn set_attr(&mut self, name: &str, value: Value) {
        if let Some(slot) = reserved_slot(name) {
            self.set_template(slot, &value.render());
            return;
        }
        self.vals.insert(name.to_string(), value);
    }

    /// Reads an attribute. Reserved slot aliases read the bound template
    /// path; unset names yield `Value::Null` with a non-fatal diagnostic.
    pub fn get_attr(&self, name: &str) -> Value {
        if let Some(slot) = reserved_slot(name) {
            return match self.templates.get(slot) {
                Some(path) => Value::Str(path.clone()),
                None => Value::Null,
            };
        }
        match self.vals.get(name) {
            Some(value) => value.clone(),
            None => {
                tracing::warn!(attribute = name, "undefined view attribute read");
                Value::Null
            }
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.vals.contains_key(name)
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.vals.remove(name)
    }

    // ------------------------------------------------------------------
    // Head assets
    // ------------------------------------------------------------------

    pub fn add_meta(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.assets.add_meta(name, content);
    }

    /// Registers a script URL; namespaced sources get the cache-busting
    /// version suffix at registration time
    pub fn add_script(&mut self, src: impl Into<String>) {
        let mut src = src.into();
        if assets::is_namespaced_script(&src) {
            src = format!("{}?v={}", src, self.version);
        }
        self.assets.add_script(src);
    }

    pub fn add_link(
        &mut self,
        rel: impl Into<String>,
        ty: impl Into<String>,
        href: impl Into<String>,
        title: impl Into<String>,
    ) {
        self.assets.add_link(rel, ty, href, title);
    }

    /// Stylesheet convenience wrapper over `add_link`
    pub fn add_style(&mut self, href: impl Into<String>) {
        let mut href = href.into();
        if assets::is_namespaced_style(&href) {
            href = format!("{}?v={}", href, self.version);
        }
        self.add_link("stylesheet", "text/css", href, "");
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Production-only pre-output pass: rewrites every script URL and
    /// every stylesheet href to its `/min/` counterpart when that
    /// artifact exists under the site root; others are left untouched.
    pub fn pre_render(&mut self) {
        if !self.production {
            return;
        }

        let script_rewrites: Vec<Option<String>> = self
            .assets
            .scripts()
            .iter()
            .map(|src| self.minified_rewrite(src))
            .collect();
        for (src, rewrite) in self.assets.scripts_mut().iter_mut().zip(script_rewrites) {
            if let Some(minified) = rewrite {
                *src = minified;
            }
        }

        let link_rewrites: Vec<Option<String>> = self
            .assets
            .links()
            .iter()
            .map(|link| {
                if link.ty == "text/css" {
                    self.minified_rewrite(&link.href)
                } else {
                    None
                }
            })
            .collect();
        for (link, rewrite) in self.assets.links_mut().iter_mut().zip(link_rewrites) {
            if let Some(minified) = rewrite {
                link.href = minified;
            }
        }
    }

    fn minified_rewrite(&self, url: &str) -> Option<String> {
        let path = url.split('?').next().unwrap_or(url);
        let min = assets::min_name(path);
        if self.site_root.join("min").join(&min).is_file() {
            Some(format!("/min/{}?ver={}", min, self.version))
        } else {
            None
        }
    }

    /// Renders the template bound to `slot` with the attribute-bag scope
    pub fn render(&self, slot: &str) -> Option<String> {
        self.render_with(slot, None)
    }

    /// Renders with an explicit scope override.
    ///
    /// The login identity values are injected after the scope is
    /// assembled, so controller- or caller-supplied names can never
    /// shadow them. Returns `None` when no include-path directory
    /// contains the slot's template file.
    pub fn render_with(
        &self,
        slot: &str,
        scope_override: Option<&HashMap<String, Value>>,
    ) -> Option<String> {
        let mut scope = match scope_override {
            Some(scope) => scope.clone(),
            None => self.render_scope(),
        };

        // Set last, on purpose: these two cannot be overridden
        let (login_id, login_name) = self.session.render_identity();
        scope.insert("_login_id".to_string(), Value::Int(login_id));
        scope.insert("_login_name".to_string(), Value::Str(login_name));

        let file = self.templates.get(slot)?;
        let renderer = Renderer::new(scope);
        for dir in &self.include_path {
            let candidate = dir.join(file);
            if candidate.is_file() {
                match fs::read_to_string(&candidate) {
                    Ok(content) => return Some(renderer.render(&content)),
                    Err(err) => {
                        tracing::warn!(?candidate, %err, "template unreadable, trying next dir");
                    }
                }
            }
        }

        None
    }

    fn render_scope(&self) -> HashMap<String, Value> {
        let mut scope = self.vals.clone();

        let meta: HashMap<String, Value> = self
            .assets
            .meta()
            .iter()
            .map(|(name, content)| (name.clone(), Value::from(content.clone())))
            .collect();
        scope.insert("_meta".to_string(), Value::Map(meta));

        let scripts: Vec<Value> = self
            .assets
            .scripts()
            .iter()
            .map(|src| Value::from(src.clone()))
            .collect();
        scope.insert("_script".to_string(), Value::List(scripts));

        let links: Vec<Value> = self
            .assets
            .links()
            .iter()
            .map(|link| {
                Value::Map(HashMap::from([
                    ("rel".to_string(), Value::from(link.rel.clone())),
                    ("type".to_string(), Value::from(link.ty.clone())),
                    ("href".to_string(), Value::from(link.href.clone())),
                    ("title".to_string(), Value::from(link.title.clone())),
                ]))
            })
            .collect();
        scope.insert("_link".to_string(), Value::List(links));

        scope
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Runs the pre-render pass and renders the main template.
    ///
    /// When the PDF format is requested and a backend is available, every
    /// registered stylesheet is read from the site root and fed to the
    /// backend ahead of the HTML; `body.<controller>-<action>` and
    /// `body.<controller>` selectors are collapsed to bare `body` so
    /// body-level styling survives the PDF's isolated rendering context.
    ///
    /// Returns `None` when the main template cannot be found, leaving the
    /// decision to degrade further to the caller.
    pub fn output(&mut self, pdf: Option<&mut dyn PdfBackend>) -> Option<Rendered> {
        self.pre_render();
        let html = self.render("template")?;

        if self.format == OutputFormat::Pdf {
            if let Some(backend) = pdf {
                for href in self.assets.stylesheet_urls() {
                    let rel = href
                        .split('?')
                        .next()
                        .unwrap_or(&href)
                        .trim_start_matches('/');
                    match fs::read_to_string(self.site_root.join(rel)) {
                        Ok(css) => backend.write_css(&self.rewrite_body_selectors(&css)),
                        Err(err) => {
                            tracing::warn!(href = %href, %err, "stylesheet unreadable, skipping");
                        }
                    }
                }
                backend.write_html(&html);
                return Some(Rendered::Pdf(backend.finish()));
            }
            tracing::debug!("pdf requested but no backend available, emitting html");
        }

        Some(Rendered::Html(html))
    }

    fn rewrite_body_selectors(&self, css: &str) -> String {
        if let (Some(Value::Str(controller)), Some(Value::Str(action))) =
            (self.vals.get("_controller"), self.vals.get("_action"))
        {
            css.replace(&format!("body.{}-{}", controller, action), "body")
                .replace(&format!("body.{}", controller), "body")
        } else {
            css.to_string()
        }
    }
}
