//! Error handling for go-web-starter.
//! Defines the error type shared by validation, destination preparation,
//! template selection, rendering and output writing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while generating a project.
///
/// Every variant names the phase that failed together with the offending
/// field, template path or output path.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration field failed validation.
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    /// Validation failure surfaced by the generator.
    #[error("invalid template data")]
    InvalidConfig(#[source] Box<Error>),

    /// The output path exists but is not a directory.
    #[error("output path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The output directory contains entries other than `.git`.
    #[error("output directory is not empty: {}", path.display())]
    OutputDirNotEmpty { path: PathBuf },

    /// Filesystem failure during a named phase.
    #[error("{phase} {}", path.display())]
    Io {
        phase: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template path is missing from the template source.
    #[error("template not found: {path}")]
    TemplateNotFound { path: String },

    /// Template content could not be decoded as UTF-8 text.
    #[error("template {path} is not valid UTF-8")]
    NonUtf8Template { path: String },

    /// Template syntax could not be compiled.
    #[error("parse template {path}")]
    Parse {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// Rendering failed, e.g. on a variable the context does not define.
    #[error("execute template {path}")]
    Render {
        path: String,
        #[source]
        source: minijinja::Error,
    },

    /// A feature rule pattern could not be compiled.
    #[error("invalid template rule {pattern:?}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The configuration could not be turned into a template context.
    #[error("build template context")]
    Context(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation { field, message: message.into() }
    }

    pub(crate) fn io(phase: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { phase, path: path.into(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
