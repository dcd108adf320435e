//! go-web-starter generates ready-to-run Go web projects from a bundled
//! template tree. It validates the generation parameters, selects the
//! templates enabled by the chosen database integrations, renders them and
//! writes the result into an empty output directory.

/// Command-line interface module for the go-web-starter binary
pub mod cli;

/// Generation parameters and database feature flags
pub mod config;

/// Common constants
pub mod constants;

/// Output directory preparation
/// Refuses to write into directories holding anything but `.git`
pub mod destination;

/// Error types and handling
pub mod error;

/// Core generation orchestration
/// Combines validation, selection, rendering and writing
pub mod generator;

/// Logger setup
pub mod logger;

/// Go module path syntax checks
pub mod module_path;

/// MiniJinja rendering with strict variable binding
pub mod renderer;

/// Template tree walking and feature gating
pub mod selector;

/// Template sources: bundled, on-disk and in-memory trees
pub mod templates;

/// Configuration validation rules
pub mod validate;

/// Go toolchain version detection
pub mod version;
