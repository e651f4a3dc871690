//! Locations of the input data.

use std::path::{Path, PathBuf};

/// Directories the container reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    /// Planetary constants, one `<case>.json` per case.
    pub const_dir: PathBuf,
    /// Case directories, each holding `<case>_malbec.txt`.
    pub data_dir: PathBuf,
    /// UM start dumps.
    pub start_dump_dir: PathBuf,
}

impl Paths {
    pub fn new(const_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Paths {
            const_dir: const_dir.into(),
            data_dir: data_dir.into(),
            start_dump_dir: default_start_dump_dir(),
        }
    }

    /// Layout of a checkout: constants next to the tooling, cases one level up.
    pub fn default_for(root: &Path) -> Self {
        let data_dir = root
            .parent()
            .map(|p| p.join("cases"))
            .unwrap_or_else(|| root.join("cases"));

        Paths {
            const_dir: root.join("const"),
            data_dir,
            start_dump_dir: default_start_dump_dir(),
        }
    }

    pub fn with_start_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dump_dir = dir.into();
        self
    }

    pub fn case_dir(&self, case_id: &str) -> PathBuf {
        self.data_dir.join(case_id)
    }

    pub fn malbec_file(&self, case_id: &str) -> PathBuf {
        self.case_dir(case_id).join(format!("{case_id}_malbec.txt"))
    }

    pub fn const_file(&self, case_id: &str) -> PathBuf {
        self.const_dir.join(format!("{case_id}.json"))
    }
}

fn default_start_dump_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join("start_dumps")
        .join("malbec")
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_case_paths() {
        let paths = Paths::new("/c", "/d");

        assert_eq!(paths.malbec_file("T1A"), PathBuf::from("/d/T1A/T1A_malbec.txt"));
        assert_eq!(paths.const_file("T1A"), PathBuf::from("/c/T1A.json"));
    }

    #[test]
    fn should_default_to_checkout_layout() {
        let paths = Paths::default_for(Path::new("/work/um_setup"));

        assert_eq!(paths.const_dir, PathBuf::from("/work/um_setup/const"));
        assert_eq!(paths.data_dir, PathBuf::from("/work/cases"));
        assert!(paths.start_dump_dir.ends_with("start_dumps/malbec"));
    }
}
