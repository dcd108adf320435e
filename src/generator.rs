//! Project generation.
//! Validates a configuration, prepares the output directory, selects the
//! template entries enabled for the configuration and writes them out.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::constants::TEMPLATE_SUFFIX;
use crate::destination::{create_dir_all, prepare_output_dir};
use crate::error::{Error, Result};
use crate::renderer::{render_template, MiniJinjaRenderer, TemplateRenderer};
use crate::selector::{default_rules, FeatureRule, Selector};
use crate::templates::{EmbeddedTemplates, EntryKind, TemplateSource};

/// What a successful generation wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Directories created, relative to `output_dir`, in traversal order.
    pub directories: Vec<PathBuf>,
    /// Files written, relative to `output_dir`, in traversal order.
    pub files: Vec<PathBuf>,
}

/// Generates projects from a template source.
pub struct Generator<'a> {
    source: &'a dyn TemplateSource,
    renderer: &'a dyn TemplateRenderer,
    rules: Vec<FeatureRule>,
}

impl<'a> Generator<'a> {
    /// Creates a generator using the rules of the bundled template tree.
    pub fn new(source: &'a dyn TemplateSource, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { source, renderer, rules: default_rules() }
    }

    pub fn with_rules(mut self, rules: Vec<FeatureRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Generates a project into `output_dir`.
    ///
    /// Nothing is written unless the configuration is valid and the output
    /// directory is absent or empty (apart from `.git`). A failure after that
    /// point leaves the files written so far in place.
    pub fn generate<P: AsRef<Path>>(&self, output_dir: P, config: Config) -> Result<GenerateReport> {
        let output_dir = output_dir.as_ref();
        let config = config.with_defaults();
        config.validate().map_err(|e| Error::InvalidConfig(Box::new(e)))?;

        let selector = Selector::new(&self.rules)?;
        prepare_output_dir(output_dir)?;

        let mut report = GenerateReport {
            output_dir: output_dir.to_path_buf(),
            ..GenerateReport::default()
        };

        for entry in selector.select(self.source, &config)? {
            match entry.kind {
                EntryKind::Dir => {
                    let relative = to_relative_path(&entry.relative);
                    create_dir_all(&output_dir.join(&relative), "create directory")?;
                    debug!("Created directory: {}", relative.display());
                    report.directories.push(relative);
                }
                EntryKind::File => {
                    let relative = to_relative_path(strip_template_suffix(&entry.relative));
                    let raw = self.source.read_file(&entry.path)?;
                    let rendered = render_template(self.renderer, &entry.path, &raw, &config)?;
                    write_file(&output_dir.join(&relative), &rendered)?;
                    debug!("Writing file: {}", relative.display());
                    report.files.push(relative);
                }
            }
        }

        info!(
            "Generated {} files in {}",
            report.files.len(),
            output_dir.display()
        );
        Ok(report)
    }
}

/// Generates a project from the bundled templates.
///
/// # Example
/// ```no_run
/// use go_web_starter::{config::Config, generator::generate};
///
/// let config = Config::new("github.com/acme/demo", "demo", "demo")
///     .with_feature(go_web_starter::config::Feature::Mysql, true);
/// generate("demo", config)?;
/// # Ok::<(), go_web_starter::error::Error>(())
/// ```
pub fn generate<P: AsRef<Path>>(output_dir: P, config: Config) -> Result<GenerateReport> {
    let renderer = MiniJinjaRenderer::new();
    Generator::new(&EmbeddedTemplates, &renderer).generate(output_dir, config)
}

/// Removes the templating suffix from a file path, if present.
pub fn strip_template_suffix(path: &str) -> &str {
    path.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(path)
}

fn to_relative_path(path: &str) -> PathBuf {
    path.split('/').collect()
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent, "create output parent directory")?;
    }
    fs::write(path, content).map_err(|e| Error::io("write output file", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_template_suffix() {
        assert_eq!(strip_template_suffix("app/main.go.tmpl"), "app/main.go");
        assert_eq!(strip_template_suffix("README.md"), "README.md");
        assert_eq!(strip_template_suffix("a.tmpl.bak"), "a.tmpl.bak");
    }

    #[test]
    fn test_to_relative_path() {
        assert_eq!(
            to_relative_path("internal/lib/gorm"),
            PathBuf::from("internal").join("lib").join("gorm")
        );
    }
}
