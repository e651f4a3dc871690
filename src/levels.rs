//! Vertical level sets for the UM `&VERTLEVS` namelist.

use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    namelist::{Group, Value},
};

/// Normalised theta and rho level heights under a model lid.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLevelSet {
    /// m
    pub z_top_of_model: f64,
    pub first_constant_r_rho_level: i64,
    /// Theta level heights divided by the lid height, from 0 to 1.
    pub eta_theta: Vec<f64>,
    /// Midpoints of consecutive theta levels.
    pub eta_rho: Vec<f64>,
}

impl VerticalLevelSet {
    /// Levels at the given heights (m), the last one being the model lid.
    pub fn from_heights(heights: &[f64], first_constant_r_rho_level: i64) -> Self {
        let z_top = heights.last().copied().unwrap_or(0.0);
        let eta_theta: Vec<f64> = heights.iter().map(|z| z / z_top).collect();

        Self::from_eta(z_top, eta_theta, first_constant_r_rho_level)
    }

    /// `nlevs` evenly spaced theta levels between the surface and `z_top`.
    pub fn uniform(nlevs: usize, z_top: f64, first_constant_r_rho_level: i64) -> Self {
        let eta_theta = match nlevs {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
        };

        Self::from_eta(z_top, eta_theta, first_constant_r_rho_level)
    }

    fn from_eta(z_top_of_model: f64, eta_theta: Vec<f64>, first_constant_r_rho_level: i64) -> Self {
        let eta_rho = eta_theta.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

        VerticalLevelSet {
            z_top_of_model,
            first_constant_r_rho_level,
            eta_theta,
            eta_rho,
        }
    }

    /// Theta level heights in metres.
    pub fn theta_heights(&self) -> Vec<f64> {
        self.eta_theta.iter().map(|eta| eta * self.z_top_of_model).collect()
    }

    pub fn to_namelist(&self) -> String {
        Group::new("VERTLEVS")
            .with("z_top_of_model", Value::Real(self.z_top_of_model))
            .with(
                "first_constant_r_rho_level",
                Value::Int(self.first_constant_r_rho_level),
            )
            .with("eta_theta", Value::RealArray(self.eta_theta.clone()))
            .with("eta_rho", Value::RealArray(self.eta_rho.clone()))
            .render()
    }

    /// Write the namelist, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_namelist()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Vertical levels written to `{}`", path.display());

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------
