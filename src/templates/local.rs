//! Template trees read from a local directory.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::{join, EntryKind, TemplateEntry, TemplateSource};
use crate::constants::TEMPLATE_ROOT;
use crate::error::{Error, Result};

/// A template tree stored on disk.
///
/// `root` plays the part of the root marker: `_template/app/main.go.tmpl`
/// resolves to `<root>/app/main.go.tmpl`.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::TemplateNotFound { path: root.display().to_string() });
        }
        debug!("Using templates from {}", root.display());
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path == TEMPLATE_ROOT {
            return Ok(self.root.clone());
        }
        path.strip_prefix(TEMPLATE_ROOT)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| rest.split('/').fold(self.root.clone(), |acc, part| acc.join(part)))
            .ok_or_else(|| Error::TemplateNotFound { path: path.to_string() })
    }
}

impl TemplateSource for DirTemplates {
    fn list_dir(&self, path: &str) -> Result<Vec<TemplateEntry>> {
        let dir = self.resolve(path)?;
        if !dir.is_dir() {
            return Err(Error::TemplateNotFound { path: path.to_string() });
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry =
                entry.map_err(|e| Error::io("list template directory", &dir, e.into()))?;
            let kind = if entry.file_type().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            let name = entry.file_name().to_string_lossy();
            entries.push(TemplateEntry::new(join(path, &name), kind));
        }
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        let file = self.resolve(path)?;
        fs::read(&file)
            .map(Cow::Owned)
            .map_err(|e| Error::io("read template file", file, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_and_reads() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("app")).unwrap();
        fs::write(temp_dir.path().join("app").join("main.go.tmpl"), "package main\n").unwrap();
        fs::write(temp_dir.path().join("README.md.tmpl"), "# {{ project_name }}\n").unwrap();

        let source = DirTemplates::new(temp_dir.path()).unwrap();
        let mut root = source.list_dir(TEMPLATE_ROOT).unwrap();
        root.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(
            root,
            vec![
                TemplateEntry::new("_template/README.md.tmpl", EntryKind::File),
                TemplateEntry::new("_template/app", EntryKind::Dir),
            ]
        );

        let content = source.read_file("_template/app/main.go.tmpl").unwrap();
        assert_eq!(&*content, b"package main\n");
    }

    #[test]
    fn test_rejects_paths_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirTemplates::new(temp_dir.path()).unwrap();
        assert!(matches!(
            source.read_file("other/file.tmpl"),
            Err(Error::TemplateNotFound { .. })
        ));
        assert!(matches!(
            source.list_dir("_templateX"),
            Err(Error::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        assert!(DirTemplates::new(temp_dir.path().join("missing")).is_err());
    }
}
