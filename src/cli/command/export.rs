use std::path::Path;

use anyhow::Result;
use malbec_um::{Paths, ProfileContainer};

use crate::cli::create_spinner;

pub fn export(paths: Paths, case: &str, outdir: Option<&Path>) -> Result<String> {
    let container = ProfileContainer::create(case, paths)?;

    let bar = create_spinner(format!("Writing {case} P-T profile..."));
    let file_path = container.export_profile(outdir)?;
    bar.finish_with_message("P-T profile written");

    Ok(file_path.to_string_lossy().to_string())
}
