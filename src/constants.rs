//! Planetary and atmospheric constants for a case.
//!
//! Constants live in `<const_dir>/<case>.json` as a map of name to
//! `{"value": ..., "units": ...}`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScalarConstant {
    pub value: f64,
    #[serde(default)]
    pub units: String,
}

#[derive(Debug, Clone)]
pub struct Constants {
    source: PathBuf,
    values: BTreeMap<String, ScalarConstant>,
    /// Ratio of the dry air gas constant to the specific heat at constant pressure.
    pub kappa: f64,
}

impl Constants {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DataNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;

        Self::from_json(&text, path)
    }

    pub fn from_json(text: &str, source: &Path) -> Result<Self> {
        let values: BTreeMap<String, ScalarConstant> = serde_json::from_str(text)?;
        let mut constants = Constants {
            source: source.to_path_buf(),
            values,
            kappa: 0.0,
        };
        constants.kappa =
            constants.get("dry_air_gas_constant")? / constants.get("dry_air_spec_heat_press")?;

        Ok(constants)
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .map(|c| c.value)
            .ok_or_else(|| Error::Constants {
                name: name.to_string(),
                path: self.source.clone(),
            })
    }

    pub fn units(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|c| c.units.as_str())
    }

    pub fn reference_surface_pressure(&self) -> Result<f64> {
        self.get("reference_surface_pressure")
    }

    pub fn gravity(&self) -> Result<f64> {
        self.get("gravity")
    }
}

// -- Tests -------------------------------------------------------------------
