use std::path::Path;

use anyhow::Result;
use malbec_um::{Paths, ProfileContainer};

use super::resolve_dump_path;
use crate::cli::create_spinner;

/// Patch one column per index, one after the other, on the same dump.
pub fn patch(paths: Paths, case: &str, dump: &Path, indices: &[i64], field: &str) -> Result<String> {
    let dump = resolve_dump_path(dump, &paths.start_dump_dir);
    let container = ProfileContainer::create(case, paths)?;

    for index in indices {
        let bar = create_spinner(format!("Patching {field} at index {index}..."));
        let summary = container.patch_state_file(&dump, *index, field)?;
        bar.finish_with_message(format!(
            "Patched {} levels of STASH {} at index {index}",
            summary.values.len(),
            summary.stash
        ));
    }

    Ok(dump.to_string_lossy().to_string())
}

pub fn fill(paths: Paths, case: &str, dump: &Path, field: &str) -> Result<String> {
    let dump = resolve_dump_path(dump, &paths.start_dump_dir);
    let container = ProfileContainer::create(case, paths)?;

    let bar = create_spinner(format!("Filling {field}..."));
    let summary = container.fill_state_file_levels(&dump, field)?;
    bar.finish_with_message(format!(
        "Filled {} levels of STASH {}",
        summary.values.len(),
        summary.stash
    ));

    Ok(dump.to_string_lossy().to_string())
}
