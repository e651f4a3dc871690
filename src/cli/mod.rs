//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Directory of planetary constants (`<case>.json`)
    #[arg(long, global = true)]
    pub const_dir: Option<PathBuf>,

    /// Directory of MALBEC cases (`<case>/<case>_malbec.txt`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory searched for dumps given by a relative path
    #[arg(long, global = true)]
    pub start_dump_dir: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LevelType {
    /// Evenly spaced levels up to a given lid
    Uniform,
    /// Levels at the heights of a MALBEC profile
    Malbec,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the VERTLEVS namelist for the UM
    Vertlevs {
        /// MALBEC case
        #[arg(short, long)]
        case: String,
        /// Type of vertical levels
        #[arg(short = 't', long = "type", value_enum, default_value_t = LevelType::Malbec)]
        level_type: LevelType,
        /// Number of levels (uniform)
        #[arg(short, long, required_if_eq("level_type", "uniform"))]
        nlevs: Option<usize>,
        /// Model lid height in metres (uniform)
        #[arg(short, long, required_if_eq("level_type", "uniform"))]
        z_top_of_model: Option<f64>,
        /// First constant R rho level
        #[arg(short = 'r', long, default_value_t = 1)]
        first_const_r_rho_lev: i64,
        /// Output file, defaults to `vertlevs_<case>` in the case directory
        #[arg(short, long)]
        outfile: Option<PathBuf>,
    },
    /// Write the P-T profile of a case for the idealised reconfiguration
    Export {
        /// MALBEC case
        #[arg(short, long)]
        case: String,
        /// Output directory, defaults to the case directory
        #[arg(short, long)]
        outdir: Option<PathBuf>,
    },
    /// Set one column of a dump field to the profile, once per index
    Patch {
        /// MALBEC case
        #[arg(short, long)]
        case: String,
        /// Dump to modify in place
        #[arg(short, long)]
        dump: PathBuf,
        /// Flat horizontal index of the column
        #[arg(short, long, required = true, allow_negative_numbers = true)]
        index: Vec<i64>,
        /// Field name or STASH code
        #[arg(short, long, default_value = "humidity_mixing_ratio")]
        field: String,
    },
    /// Set a dump field to the profile, uniform on each level
    Fill {
        /// MALBEC case
        #[arg(short, long)]
        case: String,
        /// Dump to modify in place
        #[arg(short, long)]
        dump: PathBuf,
        /// Field name or STASH code
        #[arg(short, long, default_value = "humidity_mixing_ratio")]
        field: String,
    },
    /// Rewrite a PSG configuration file as `key = value` lines
    PsgConfig {
        /// PSG configuration file
        config: PathBuf,
        /// Output file
        #[arg(short, long, default_value = "output_config.txt")]
        output: PathBuf,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------
