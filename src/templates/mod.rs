//! Read-only access to template trees.
//!
//! The generator never touches template files directly; it goes through a
//! [`TemplateSource`], so the same walk runs against the tree compiled into
//! the binary, a directory on disk, or an in-memory fixture.
//!
//! Paths are `/`-separated and start with the root marker
//! [`TEMPLATE_ROOT`](crate::constants::TEMPLATE_ROOT), e.g.
//! `_template/app/main.go.tmpl`.

use std::borrow::Cow;
use std::fmt;

use crate::error::Result;

pub mod embedded;
pub mod local;
pub mod memory;

pub use embedded::EmbeddedTemplates;
pub use local::DirTemplates;
pub use memory::MemoryTemplates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// A directory or file node in a template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: String,
    pub kind: EntryKind,
}

impl TemplateEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self { path: path.into(), kind }
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

impl fmt::Display for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Dir => write!(f, "{}/", self.path),
            EntryKind::File => f.write_str(&self.path),
        }
    }
}

/// A read-only virtual filesystem holding a template tree.
pub trait TemplateSource {
    /// Lists the immediate children of the directory at `path`.
    ///
    /// Order is unspecified; callers sort.
    fn list_dir(&self, path: &str) -> Result<Vec<TemplateEntry>>;

    /// Returns the raw bytes of the file at `path`.
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>>;
}

/// Joins a parent path and a child name with `/`.
pub(crate) fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
