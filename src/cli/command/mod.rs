pub mod export;
pub mod patch;
pub mod psg;
pub mod vertlevs;

use std::path::{Path, PathBuf};

pub use export::export;
pub use patch::{fill, patch};
pub use psg::psg_config;
pub use vertlevs::vertlevs;

/// A dump given by a relative path that does not exist here is looked up in
/// the start dump directory.
pub fn resolve_dump_path(dump: &Path, start_dump_dir: &Path) -> PathBuf {
    if dump.is_absolute() || dump.exists() {
        dump.to_path_buf()
    } else {
        start_dump_dir.join(dump)
    }
}

// -- Tests -------------------------------------------------------------------
