//! Output directory preparation.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::constants::GIT_DIR;
use crate::error::{Error, Result};

/// Ensures `output_dir` is safe to generate into.
///
/// A missing directory is created along with its ancestors. An existing
/// directory must be empty apart from a `.git` entry, so generation can run
/// inside a fresh checkout but never over user content.
pub fn prepare_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    match fs::metadata(output_dir) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(Error::NotADirectory { path: output_dir.to_path_buf() });
            }
            if has_visible_entries(output_dir)? {
                return Err(Error::OutputDirNotEmpty { path: output_dir.to_path_buf() });
            }
            debug!("Using existing output directory {}", output_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Creating output directory {}", output_dir.display());
            create_dir_all(output_dir, "create output directory")
        }
        Err(e) => Err(Error::io("stat output directory", output_dir, e)),
    }
}

fn has_visible_entries(dir: &Path) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io("read output directory", dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("read output directory", dir, e))?;
        if entry.file_name() == GIT_DIR {
            continue;
        }
        return Ok(true);
    }
    Ok(false)
}

/// Creates `path` and its missing ancestors with mode `0o755` on Unix.
pub(crate) fn create_dir_all(path: &Path, phase: &'static str) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path).map_err(|e| Error::io(phase, path, e))
}
