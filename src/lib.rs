//! Prepare UM initial conditions from PSG/MALBEC atmosphere profiles.
//!
//! A [`ProfileContainer`] loads the profile and constants of one case and
//! writes the inputs of the UM reconfiguration: the `&VERTLEVS` namelist,
//! the P-T profile file, and patched start dumps.

pub mod config;
pub mod constants;
pub mod container;
pub mod dump;
pub mod error;
pub mod interpolate;
pub mod levels;
pub mod namelist;
pub mod parquet;
pub mod profile;
pub mod reading;
pub mod stash;

pub use config::Paths;
pub use container::{PatchSummary, ProfileContainer};
pub use error::{Error, Result};
pub use levels::VerticalLevelSet;
pub use profile::{Profile, Variable};
