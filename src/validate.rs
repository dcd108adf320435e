//! Validation rules for [`Config`].
//!
//! Checks run in a fixed order and the first failure wins: module path,
//! binary name, project name, Go version, then the database selection.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::module_path::check_path;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid regex"));
static GO_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+(?:\.\d+)?$").expect("valid regex"));

const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];
const QUOTES: [char; 2] = ['"', '\''];
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

impl Config {
    /// Validates every field, returning the first failure.
    ///
    /// Call [`Config::with_defaults`] first: an empty `go_version` is
    /// rejected here, and so is whitespace around any of the names.
    pub fn validate(&self) -> Result<()> {
        validate_module_path(&self.module_name)?;
        validate_binary_name(&self.binary_name)?;
        validate_project_name(&self.project_name)?;
        validate_go_version(&self.go_version)?;
        if !self.mysql && !self.mongodb {
            return Err(Error::validation("db", "at least one database must be enabled"));
        }
        Ok(())
    }
}

pub fn validate_module_path(module_name: &str) -> Result<()> {
    let v = module_name;
    if v.trim().is_empty() {
        return Err(Error::validation("module", "module cannot be empty"));
    }
    if v.contains(WHITESPACE) {
        return Err(Error::validation(
            "module",
            format!("module cannot contain whitespace: {module_name:?}"),
        ));
    }
    if v.contains('\\') {
        return Err(Error::validation(
            "module",
            format!("module cannot contain backslash: {module_name:?}"),
        ));
    }
    if v.contains(QUOTES) {
        return Err(Error::validation(
            "module",
            format!("module cannot contain quotes: {module_name:?}"),
        ));
    }
    check_path(v).map_err(|e| {
        Error::validation("module", format!("invalid module path {module_name:?}: {e}"))
    })
}

pub fn validate_binary_name(binary_name: &str) -> Result<()> {
    let v = binary_name;
    if v.trim().is_empty() {
        return Err(Error::validation("binary", "binary cannot be empty"));
    }
    if v.contains(WHITESPACE) {
        return Err(Error::validation(
            "binary",
            format!("binary cannot contain whitespace: {binary_name:?}"),
        ));
    }
    if v.contains(PATH_SEPARATORS) {
        return Err(Error::validation(
            "binary",
            format!("binary cannot contain path separators: {binary_name:?}"),
        ));
    }
    if v.contains(QUOTES) {
        return Err(Error::validation(
            "binary",
            format!("binary cannot contain quotes: {binary_name:?}"),
        ));
    }
    if v == "." || v == ".." {
        return Err(Error::validation("binary", format!("binary cannot be {binary_name:?}")));
    }
    if !NAME_PATTERN.is_match(v) {
        return Err(Error::validation(
            "binary",
            format!(
                "binary contains invalid characters: {binary_name:?} \
                 (allowed: letters, digits, dot, underscore, hyphen)"
            ),
        ));
    }
    Ok(())
}

pub fn validate_project_name(project_name: &str) -> Result<()> {
    let v = project_name;
    if v.trim().is_empty() {
        return Err(Error::validation("project", "project name cannot be empty"));
    }
    if v == "." || v == ".." {
        return Err(Error::validation(
            "project",
            format!("project name cannot be {project_name:?}"),
        ));
    }
    if v.contains(PATH_SEPARATORS) {
        return Err(Error::validation(
            "project",
            format!("project name cannot contain path separators: {project_name:?}"),
        ));
    }
    if v.contains(WHITESPACE) {
        return Err(Error::validation(
            "project",
            format!("project name cannot contain whitespace: {project_name:?}"),
        ));
    }
    if v.contains(QUOTES) {
        return Err(Error::validation(
            "project",
            format!("project name cannot contain quotes: {project_name:?}"),
        ));
    }
    if !NAME_PATTERN.is_match(v) {
        return Err(Error::validation(
            "project",
            format!(
                "project name contains invalid characters: {project_name:?} \
                 (allowed: letters, digits, dot, underscore, hyphen)"
            ),
        ));
    }
    Ok(())
}

pub fn validate_go_version(go_version: &str) -> Result<()> {
    let v = go_version;
    if v.trim().is_empty() {
        return Err(Error::validation("go_version", "go version cannot be empty"));
    }
    if !is_valid_go_version(v) {
        return Err(Error::validation(
            "go_version",
            format!("go version contains invalid format: {go_version:?} (example: 1.26.0)"),
        ));
    }
    Ok(())
}

/// Reports whether `version` has the form `MAJOR.MINOR[.PATCH]`.
pub fn is_valid_go_version(version: &str) -> bool {
    GO_VERSION_PATTERN.is_match(version)
}
