use std::path::Path;

use anyhow::Result;
use malbec_um::reading::read_psg_cfg;

pub fn psg_config(config: &Path, output: &Path) -> Result<String> {
    let psg = read_psg_cfg(config)?;
    psg.write_summary(output)?;
    log::info!("{} keys from `{}`", psg.len(), config.display());

    Ok(output.to_string_lossy().to_string())
}
