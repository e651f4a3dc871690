use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use malbec_um::{Paths, ProfileContainer, VerticalLevelSet};

use crate::cli::LevelType;

pub struct VertlevsArgs<'a> {
    pub case: &'a str,
    pub level_type: LevelType,
    pub nlevs: Option<usize>,
    pub z_top_of_model: Option<f64>,
    pub first_const_r_rho_lev: i64,
    pub outfile: Option<&'a Path>,
}

pub fn vertlevs(paths: Paths, args: VertlevsArgs<'_>) -> Result<String> {
    let default_file = paths
        .case_dir(args.case)
        .join(format!("vertlevs_{}", args.case));

    let file_path = match args.level_type {
        LevelType::Malbec => {
            let container = ProfileContainer::create(args.case, paths)?;
            match args.outfile {
                Some(outfile) => {
                    container
                        .vertical_levels(args.first_const_r_rho_lev)
                        .write(outfile)?;
                    outfile.to_path_buf()
                }
                None => container.derive_vertical_levels(args.first_const_r_rho_lev, None)?.1,
            }
        }
        LevelType::Uniform => {
            let nlevs = args.nlevs.ok_or_else(|| anyhow!("--nlevs is required"))?;
            let z_top = args
                .z_top_of_model
                .ok_or_else(|| anyhow!("--z-top-of-model is required"))?;
            let file_path: PathBuf = args.outfile.map(Path::to_path_buf).unwrap_or(default_file);
            VerticalLevelSet::uniform(nlevs, z_top, args.first_const_r_rho_lev).write(&file_path)?;
            file_path
        }
    };

    Ok(file_path.to_string_lossy().to_string())
}
