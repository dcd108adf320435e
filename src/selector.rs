//! Template tree walking and feature gating.
//!
//! The walk is depth-first with parents before children and siblings in
//! lexical order. Every entry below the root marker is checked against a set
//! of [`FeatureRule`]s; an entry matched by a rule whose feature is disabled
//! is dropped, and a dropped directory is never descended into.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;

use crate::config::{Config, Feature};
use crate::constants::{TEMPLATE_ROOT, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use crate::templates::{EntryKind, TemplateSource};

/// How a rule pattern is compared with an entry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The path equals the pattern.
    Exact,
    /// The path equals the pattern or lies below it.
    Subtree,
}

/// Marks the entries matching `pattern` as existing only for `feature`.
///
/// Patterns are relative to the template root and use glob syntax; plain
/// paths match themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRule {
    pub pattern: String,
    pub feature: Feature,
    pub mode: MatchMode,
}

impl FeatureRule {
    pub fn new(pattern: impl Into<String>, feature: Feature, mode: MatchMode) -> Self {
        Self { pattern: pattern.into(), feature, mode }
    }

    /// Builds a rule from a path prefix: template files match exactly,
    /// anything else gates its whole subtree.
    pub fn from_prefix(prefix: &str, feature: Feature) -> Self {
        let mode = if prefix.ends_with(TEMPLATE_SUFFIX) {
            MatchMode::Exact
        } else {
            MatchMode::Subtree
        };
        Self::new(prefix, feature, mode)
    }
}

const MYSQL_ONLY: [&str; 7] = [
    "internal/lib/gorm",
    "internal/lib/log/silent.go.tmpl",
    "internal/repository/mysql",
    "internal/models/do/mysql",
    "internal/controller/example_controller/user_handler.go.tmpl",
    "internal/service/example_srv/user_service.go.tmpl",
    "docs/schema",
];

const MONGODB_ONLY: [&str; 5] = [
    "internal/lib/mongodb",
    "internal/repository/mongo",
    "internal/models/do/mongo",
    "internal/controller/example_controller/user_mongo_handler.go.tmpl",
    "internal/service/example_srv/user_mongo_service.go.tmpl",
];

/// Rules for the bundled template tree.
pub fn default_rules() -> Vec<FeatureRule> {
    MYSQL_ONLY
        .iter()
        .map(|prefix| FeatureRule::from_prefix(prefix, Feature::Mysql))
        .chain(
            MONGODB_ONLY
                .iter()
                .map(|prefix| FeatureRule::from_prefix(prefix, Feature::Mongodb)),
        )
        .collect()
}

/// Feature rules compiled into one glob set per feature.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    sets: Vec<(Feature, GlobSet)>,
}

impl FeatureGate {
    pub fn new(rules: &[FeatureRule]) -> Result<Self> {
        let mut builders: Vec<(Feature, GlobSetBuilder)> = Vec::new();
        for rule in rules {
            let index = match builders.iter().position(|(f, _)| *f == rule.feature) {
                Some(index) => index,
                None => {
                    builders.push((rule.feature, GlobSetBuilder::new()));
                    builders.len() - 1
                }
            };
            let builder = &mut builders[index].1;
            builder.add(build_glob(&rule.pattern, &rule.pattern)?);
            if rule.mode == MatchMode::Subtree {
                let nested = format!("{}/**", rule.pattern.trim_end_matches('/'));
                builder.add(build_glob(&nested, &rule.pattern)?);
            }
        }

        let mut sets = Vec::with_capacity(builders.len());
        for (feature, builder) in builders {
            let set = builder.build().map_err(|e| Error::InvalidRule {
                pattern: feature.to_string(),
                source: e,
            })?;
            sets.push((feature, set));
        }
        Ok(Self { sets })
    }

    /// Returns the disabled feature that excludes `path`, if any.
    pub fn excluded_by(&self, path: &str, config: &Config) -> Option<Feature> {
        self.sets
            .iter()
            .find(|(feature, set)| !config.has(*feature) && set.is_match(path))
            .map(|(feature, _)| *feature)
    }
}

fn build_glob(glob: &str, pattern: &str) -> Result<Glob> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidRule { pattern: pattern.to_string(), source: e })
}

/// An entry chosen for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    /// Path in the template source, including the root marker.
    pub path: String,
    /// Path below the root marker.
    pub relative: String,
    pub kind: EntryKind,
}

/// Walks a template tree and keeps the entries enabled for a configuration.
#[derive(Debug, Clone)]
pub struct Selector {
    gate: FeatureGate,
}

impl Selector {
    pub fn new(rules: &[FeatureRule]) -> Result<Self> {
        Ok(Self { gate: FeatureGate::new(rules)? })
    }

    /// Returns the selected entries in traversal order.
    ///
    /// The root marker itself is never part of the result.
    pub fn select(&self, source: &dyn TemplateSource, config: &Config) -> Result<Vec<SelectedEntry>> {
        let mut selected = Vec::new();
        self.visit(source, TEMPLATE_ROOT, config, &mut selected)?;
        Ok(selected)
    }

    fn visit(
        &self,
        source: &dyn TemplateSource,
        dir: &str,
        config: &Config,
        selected: &mut Vec<SelectedEntry>,
    ) -> Result<()> {
        let mut entries = source.list_dir(dir)?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        for entry in entries {
            let relative = relative_path(&entry.path);
            if let Some(feature) = self.gate.excluded_by(relative, config) {
                debug!("Skipping {} ({} disabled)", entry, feature);
                continue;
            }

            selected.push(SelectedEntry {
                path: entry.path.clone(),
                relative: relative.to_string(),
                kind: entry.kind,
            });
            if entry.is_dir() {
                self.visit(source, &entry.path, config, selected)?;
            }
        }
        Ok(())
    }
}

fn relative_path(path: &str) -> &str {
    path.strip_prefix(TEMPLATE_ROOT)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}
