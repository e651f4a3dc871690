//! Scoped in-place editing of a dump on disk.

use std::{fs, io::Write, path::Path};

use tempfile::NamedTempFile;

use super::DumpFile;
use crate::error::{Error, Result};

impl DumpFile {
    /// Read the dump at `path`, apply `edit` and write the result back.
    ///
    /// The new contents go to a temporary file next to `path` which then
    /// replaces it, so the dump on disk is either the old or the new one. If
    /// `edit` fails nothing is written.
    pub fn edit<T, F>(path: &Path, edit: F) -> Result<T>
    where
        F: FnOnce(&mut DumpFile) -> Result<T>,
    {
        let mut dump = DumpFile::open(path)?;
        let out = edit(&mut dump)?;
        dump.save_in_place()?;

        Ok(out)
    }

    fn save_in_place(&self) -> Result<()> {
        let path = self.path.as_path();
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&self.bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        let permissions = fs::metadata(path)?.permissions();
        fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        log::debug!("Rewrote `{}`", path.display());

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------
