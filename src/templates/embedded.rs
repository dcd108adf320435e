//! The template tree compiled into the binary.

use std::borrow::Cow;
use std::path::{Component, Path};

use include_dir::{include_dir, Dir, DirEntry};

use super::{EntryKind, TemplateEntry, TemplateSource};
use crate::error::{Error, Result};

static TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Templates bundled from `templates/_template` at build time.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn list_dir(&self, path: &str) -> Result<Vec<TemplateEntry>> {
        let dir = TEMPLATES
            .get_dir(path)
            .ok_or_else(|| Error::TemplateNotFound { path: path.to_string() })?;

        Ok(dir
            .entries()
            .iter()
            .map(|entry| match entry {
                DirEntry::Dir(d) => TemplateEntry::new(slash_path(d.path()), EntryKind::Dir),
                DirEntry::File(f) => TemplateEntry::new(slash_path(f.path()), EntryKind::File),
            })
            .collect())
    }

    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        TEMPLATES
            .get_file(path)
            .map(|file| Cow::Borrowed(file.contents()))
            .ok_or_else(|| Error::TemplateNotFound { path: path.to_string() })
    }
}

// Embedded paths use the separator of the build host.
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
