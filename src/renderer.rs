//! Template rendering for go-web-starter.
//! Binds a [`Config`] into MiniJinja templates with strict variable lookup:
//! a template naming a variable the configuration does not define fails to
//! render instead of producing empty text.

use cruet::Inflector;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::config::Config;
use crate::error::{Error, Result};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Template path, used in error messages
    /// * `template` - Template source to render
    /// * `context` - Context variables for rendering
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with strict undefined handling, no auto-escaping and
    /// the case conversion filters.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("snake_case", |value: String| value.to_snake_case());
        env.add_filter("kebab_case", |value: String| value.to_kebab_case());
        env.add_filter("camel_case", |value: String| value.to_camel_case());
        env.add_filter("pascal_case", |value: String| value.to_pascal_case());
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::Parse` if the template has invalid syntax
    /// * `Error::Render` if rendering fails, including references to
    ///   variables missing from `context`
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), template.to_string())
            .map_err(|e| Error::Parse { path: name.to_string(), source: e })?;

        let tmpl = env
            .get_template(name)
            .map_err(|e| Error::Parse { path: name.to_string(), source: e })?;

        tmpl.render(context)
            .map_err(|e| Error::Render { path: name.to_string(), source: e })
    }
}

/// Renders the raw bytes of the template at `path` against `config`.
pub fn render_template(
    renderer: &dyn TemplateRenderer,
    path: &str,
    raw: &[u8],
    config: &Config,
) -> Result<Vec<u8>> {
    let source = std::str::from_utf8(raw)
        .map_err(|_| Error::NonUtf8Template { path: path.to_string() })?;
    let context = serde_json::to_value(config)?;
    renderer
        .render(path, source, &context)
        .map(String::into_bytes)
}
