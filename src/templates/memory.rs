//! In-memory template trees, used as fixtures.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use super::{EntryKind, TemplateEntry, TemplateSource};
use crate::error::{Error, Result};

/// A template tree held in memory.
///
/// Directories are implied by file paths; empty directories are added with
/// [`MemoryTemplates::with_dir`].
///
/// ```
/// use go_web_starter::templates::{MemoryTemplates, TemplateSource};
///
/// let source = MemoryTemplates::new().with_file("_template/go.mod.tmpl", "module x\n");
/// assert_eq!(source.list_dir("_template").unwrap().len(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryTemplates {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        self.register_parents(&path);
        self.files.insert(path, content.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.register_parents(&path);
        self.dirs.insert(path);
        self
    }

    fn register_parents(&mut self, path: &str) {
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            self.dirs.insert(parent.to_string());
            current = parent;
        }
    }
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

impl TemplateSource for MemoryTemplates {
    fn list_dir(&self, path: &str) -> Result<Vec<TemplateEntry>> {
        if !self.dirs.contains(path) {
            return Err(Error::TemplateNotFound { path: path.to_string() });
        }

        let dirs = self
            .dirs
            .iter()
            .filter(|dir| parent_of(dir) == Some(path))
            .map(|dir| TemplateEntry::new(dir.clone(), EntryKind::Dir));
        let files = self
            .files
            .keys()
            .filter(|file| parent_of(file) == Some(path))
            .map(|file| TemplateEntry::new(file.clone(), EntryKind::File));

        Ok(dirs.chain(files).collect())
    }

    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.files
            .get(path)
            .map(|content| Cow::Borrowed(content.as_slice()))
            .ok_or_else(|| Error::TemplateNotFound { path: path.to_string() })
    }
}
