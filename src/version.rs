//! Detection of the Go version written into generated projects.

use std::env;
use std::ffi::{OsStr, OsString};
use std::process::Command;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::constants::{FALLBACK_GO_VERSION, GO_BINARY_ENV};

static GO_VERSION_EXTRACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+)?)").expect("valid regex"));

/// Returns the version of the local Go toolchain, or [`FALLBACK_GO_VERSION`].
///
/// The binary is `go` unless `GO_WEB_STARTER_GO` names another one.
pub fn default_go_version() -> String {
    let program = env::var_os(GO_BINARY_ENV).unwrap_or_else(|| OsString::from("go"));
    probe_go_version(&program).unwrap_or_else(|| FALLBACK_GO_VERSION.to_string())
}

/// Runs `<program> env GOVERSION` and extracts the version number.
pub fn probe_go_version(program: &OsStr) -> Option<String> {
    let output = match Command::new(program).args(["env", "GOVERSION"]).output() {
        Ok(output) => output,
        Err(e) => {
            debug!("Cannot run {}: {}", program.to_string_lossy(), e);
            return None;
        }
    };
    if !output.status.success() {
        debug!(
            "{} env GOVERSION exited with {}",
            program.to_string_lossy(),
            output.status
        );
        return None;
    }

    extract_go_version(&String::from_utf8_lossy(&output.stdout))
}

/// Extracts `MAJOR.MINOR[.PATCH]` from toolchain output such as `go1.22.3`.
pub fn extract_go_version(text: &str) -> Option<String> {
    GO_VERSION_EXTRACT
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
