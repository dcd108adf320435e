//! Generation parameters.
//! A [`Config`] is built once per invocation by the caller, has its defaults
//! filled, is validated, and is then bound by field name into every template.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::version::default_go_version;

/// Optional database integrations that gate parts of the template tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Mysql,
    Mongodb,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Mysql => "mysql",
            Feature::Mongodb => "mongodb",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values bound into the templates.
///
/// Field names are the variable names templates refer to, e.g.
/// `{{ module_name }}` or `{% if mysql %}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Go module path written to `go.mod`.
    pub module_name: String,
    /// Name of the produced executable.
    pub binary_name: String,
    /// Human-facing project name.
    pub project_name: String,
    /// Go toolchain version, `MAJOR.MINOR[.PATCH]`.
    #[serde(default)]
    pub go_version: String,
    #[serde(default)]
    pub mysql: bool,
    #[serde(default)]
    pub mongodb: bool,
}

impl Config {
    pub fn new(
        module_name: impl Into<String>,
        binary_name: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            binary_name: binary_name.into(),
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    pub fn with_go_version(mut self, go_version: impl Into<String>) -> Self {
        self.go_version = go_version.into();
        self
    }

    pub fn with_feature(mut self, feature: Feature, enabled: bool) -> Self {
        match feature {
            Feature::Mysql => self.mysql = enabled,
            Feature::Mongodb => self.mongodb = enabled,
        }
        self
    }

    /// Reports whether the given integration is enabled.
    pub fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::Mysql => self.mysql,
            Feature::Mongodb => self.mongodb,
        }
    }

    /// Returns the configuration with surrounding whitespace trimmed from the
    /// string fields and unset fields filled in.
    ///
    /// Only `go_version` has a default: the version reported by the local Go
    /// toolchain, or [`crate::constants::FALLBACK_GO_VERSION`].
    pub fn with_defaults(mut self) -> Self {
        for field in [
            &mut self.module_name,
            &mut self.binary_name,
            &mut self.project_name,
            &mut self.go_version,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }

        if self.go_version.is_empty() {
            self.go_version = default_go_version();
            debug!("Defaulted go version to {}", self.go_version);
        }
        self
    }
}

/// Parses a comma separated database list such as `mysql,mongodb`.
///
/// Tokens are case-insensitive and blank tokens are ignored. At least one
/// database has to be selected.
pub fn parse_db_flag(value: &str) -> Result<(bool, bool)> {
    let mut mysql = false;
    let mut mongodb = false;

    for raw_token in value.split(',') {
        let token = raw_token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }

        match token.as_str() {
            "mysql" => mysql = true,
            "mongodb" => mongodb = true,
            _ => {
                return Err(Error::validation(
                    "db",
                    format!("invalid db value {raw_token:?}: allowed values are mysql,mongodb"),
                ))
            }
        }
    }

    if !mysql && !mongodb {
        return Err(Error::validation(
            "db",
            "at least one database must be selected: mysql,mongodb",
        ));
    }

    Ok((mysql, mongodb))
}
