//! Common constants used throughout go-web-starter.

/// Application name printed by the `version` command.
pub const APP_NAME: &str = "go-web-starter";

/// Name of the root directory of the template tree.
pub const TEMPLATE_ROOT: &str = "_template";

/// Suffix marking a file as template source; stripped on output.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Go version used when the local toolchain cannot be queried.
pub const FALLBACK_GO_VERSION: &str = "1.26.0";

/// Environment variable naming the Go binary probed for the default version.
pub const GO_BINARY_ENV: &str = "GO_WEB_STARTER_GO";

/// The only entry tolerated inside a pre-existing output directory.
pub const GIT_DIR: &str = ".git";

/// Default value of the `--db` option.
pub const DEFAULT_DB_FLAG: &str = "mysql,mongodb";
