//! Go module path syntax.
//!
//! Mirrors the rules the Go toolchain applies to the `module` directive of a
//! `go.mod` file: `/`-separated elements of ASCII letters, digits and `-._~`,
//! a first element that looks like a lower-case domain name, and an optional
//! `/vN` major version suffix.

use thiserror::Error;

const WINDOWS_RESERVED: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModulePathError {
    #[error("empty string")]
    Empty,
    #[error("leading slash")]
    LeadingSlash,
    #[error("leading dash")]
    LeadingDash,
    #[error("double slash")]
    DoubleSlash,
    #[error("trailing slash")]
    TrailingSlash,
    #[error("invalid path element {0:?}")]
    DotsOnly(String),
    #[error("leading dot in path element")]
    LeadingDot,
    #[error("trailing dot in path element")]
    TrailingDot,
    #[error("invalid char {0:?}")]
    InvalidChar(char),
    #[error("{0:?} disallowed as path element component on Windows")]
    WindowsReserved(String),
    #[error("trailing tilde and digits in path element")]
    ShortName,
    #[error("missing dot in first path element")]
    MissingDot,
    #[error("leading dash in first path element")]
    LeadingDashFirstElement,
    #[error("invalid char {0:?} in first path element")]
    InvalidFirstChar(char),
    #[error("invalid version")]
    InvalidVersion,
}

/// Checks that `path` is a valid Go module path.
pub fn check_path(path: &str) -> Result<(), ModulePathError> {
    if path.is_empty() {
        return Err(ModulePathError::Empty);
    }
    if path.starts_with('-') {
        return Err(ModulePathError::LeadingDash);
    }
    if path.contains("//") {
        return Err(ModulePathError::DoubleSlash);
    }
    if path.ends_with('/') {
        return Err(ModulePathError::TrailingSlash);
    }
    if path.starts_with('/') {
        return Err(ModulePathError::LeadingSlash);
    }
    for elem in path.split('/') {
        check_elem(elem)?;
    }

    let first = path.split('/').next().unwrap_or(path);
    if !first.contains('.') {
        return Err(ModulePathError::MissingDot);
    }
    if first.starts_with('-') {
        return Err(ModulePathError::LeadingDashFirstElement);
    }
    if let Some(c) = first
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '.'))
    {
        return Err(ModulePathError::InvalidFirstChar(c));
    }

    if split_path_version(path).is_none() {
        return Err(ModulePathError::InvalidVersion);
    }

    Ok(())
}

fn check_elem(elem: &str) -> Result<(), ModulePathError> {
    if elem.chars().all(|c| c == '.') {
        return Err(ModulePathError::DotsOnly(elem.to_string()));
    }
    if elem.starts_with('.') {
        return Err(ModulePathError::LeadingDot);
    }
    if elem.ends_with('.') {
        return Err(ModulePathError::TrailingDot);
    }
    if let Some(c) = elem.chars().find(|c| !is_path_char(*c)) {
        return Err(ModulePathError::InvalidChar(c));
    }

    let short = elem.split('.').next().unwrap_or(elem);
    if WINDOWS_RESERVED
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(short))
    {
        return Err(ModulePathError::WindowsReserved(short.to_string()));
    }
    if let Some(tilde) = short.rfind('~') {
        let suffix = &short[tilde + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModulePathError::ShortName);
        }
    }

    Ok(())
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Splits `path` into its prefix and major version suffix (`/v2`, `.v3`).
///
/// Returns `None` when the suffix is malformed, e.g. `/v1`, `/v02` or a
/// `gopkg.in` path without `.vN`.
pub fn split_path_version(path: &str) -> Option<(&str, &str)> {
    if path.starts_with("gopkg.in/") {
        return split_gopkg_in(path);
    }

    let (i, dot) = trailing_version_start(path);
    let bytes = path.as_bytes();
    if i <= 1 || i == path.len() || bytes[i - 1] != b'v' || bytes[i - 2] != b'/' {
        return Some((path, ""));
    }

    let (prefix, major) = path.split_at(i - 2);
    if dot || major.len() <= 2 || major.as_bytes()[2] == b'0' || major == "/v1" {
        return None;
    }
    Some((prefix, major))
}

/// `gopkg.in` paths end in `.vN`, optionally followed by `-unstable`.
fn split_gopkg_in(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    let mut i = path.strip_suffix("-unstable").unwrap_or(path).len();
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i <= 1 || bytes[i - 1] != b'v' || bytes[i - 2] != b'.' {
        return None;
    }

    let (prefix, major) = path.split_at(i - 2);
    if major.len() <= 2 || (major.as_bytes()[2] == b'0' && major != ".v0") {
        return None;
    }
    Some((prefix, major))
}

/// Index where the trailing run of digits and dots begins, and whether the run
/// contains a dot.
fn trailing_version_start(path: &str) -> (usize, bool) {
    let bytes = path.as_bytes();
    let mut i = bytes.len();
    let mut dot = false;
    while i > 0 && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.') {
        if bytes[i - 1] == b'.' {
            dot = true;
        }
        i -= 1;
    }
    (i, dot)
}
