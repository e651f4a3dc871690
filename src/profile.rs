//! Atmosphere profile of one MALBEC case and the variables derived from it.

use std::fmt;

use crate::{
    constants::Constants,
    error::{Error, Result},
    reading::{malbec::ALTITUDE_COLUMN, Table},
};

const BAR_TO_PA: f64 = 1.0e5;
const KM_TO_M: f64 = 1.0e3;
/// Molar mass of water vapour in g/mol.
const WATER_MOLAR_MASS: f64 = 18.01528;

/// Quantities the container can hand out, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Height,
    Pressure,
    Temperature,
    /// H2O mole fraction, written as is.
    HumidityMixingRatio,
    /// H2O mole fraction scaled by the molar masses of water and air.
    MassMixingRatio,
    Exner,
    PotentialTemperature,
}

impl Variable {
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Height => "level_height",
            Variable::Pressure => "air_pressure",
            Variable::Temperature => "air_temperature",
            Variable::HumidityMixingRatio => "humidity_mixing_ratio",
            Variable::MassMixingRatio => "water_vapour_mass_mixing_ratio",
            Variable::Exner => "dimensionless_exner_function",
            Variable::PotentialTemperature => "air_potential_temperature",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Variable::Height => "m",
            Variable::Pressure => "Pa",
            Variable::Temperature | Variable::PotentialTemperature => "K",
            Variable::HumidityMixingRatio | Variable::MassMixingRatio => "kg kg-1",
            Variable::Exner => "1",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Samples ordered by increasing height, hence monotonic pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub case_id: String,
    /// m
    pub height: Vec<f64>,
    /// Pa
    pub pressure: Vec<f64>,
    /// K
    pub temperature: Vec<f64>,
    /// g/mol
    pub mean_molecular_weight: Option<Vec<f64>>,
    /// Mole fractions (mol/mol) by species column name.
    pub species: Vec<(String, Vec<f64>)>,
}

impl Profile {
    pub fn from_table(case_id: &str, table: &Table) -> Result<Self> {
        let source = format!("{case_id}_malbec.txt");
        let required = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| Error::parse(&source, 0, format!("missing column `{name}`")))
        };

        let pressure: Vec<f64> = required("P")?.iter().map(|p| p * BAR_TO_PA).collect();
        let temperature = required("T")?;
        let height: Vec<f64> = table
            .column_at(ALTITUDE_COLUMN)
            .iter()
            .map(|z| z * KM_TO_M)
            .collect();
        let mean_molecular_weight = table.column("MMW");

        let species = table
            .columns
            .iter()
            .enumerate()
            .filter(|(idx, name)| {
                *idx != ALTITUDE_COLUMN && !matches!(name.as_str(), "P" | "T" | "MMW")
            })
            .map(|(idx, name)| (name.clone(), table.column_at(idx)))
            .collect();

        let profile = Profile {
            case_id: case_id.to_string(),
            height,
            pressure,
            temperature,
            mean_molecular_weight,
            species,
        };
        profile.validate(&source)?;

        Ok(profile)
    }

    fn validate(&self, source: &str) -> Result<()> {
        if self.len() < 2 {
            return Err(Error::parse(source, 0, "profile needs at least two levels"));
        }
        if !is_strictly_increasing(&self.height) {
            return Err(Error::parse(source, 0, "altitude is not strictly increasing"));
        }
        if !is_strictly_monotonic(&self.pressure) {
            return Err(Error::parse(source, 0, "pressure is not strictly monotonic"));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.height.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_empty()
    }

    pub fn species(&self, name: &str) -> Option<&[f64]> {
        self.species
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Values of `variable` on the profile levels.
    pub fn values(&self, variable: Variable, constants: &Constants) -> Result<Vec<f64>> {
        match variable {
            Variable::Height => Ok(self.height.clone()),
            Variable::Pressure => Ok(self.pressure.clone()),
            Variable::Temperature => Ok(self.temperature.clone()),
            Variable::HumidityMixingRatio => Ok(self.required_species("H2O")?.to_vec()),
            Variable::MassMixingRatio => self.mass_mixing_ratio(),
            Variable::Exner => self.exner(constants),
            Variable::PotentialTemperature => {
                let exner = self.exner(constants)?;
                Ok(self
                    .temperature
                    .iter()
                    .zip(exner)
                    .map(|(t, pi)| t / pi)
                    .collect())
            }
        }
    }

    fn exner(&self, constants: &Constants) -> Result<Vec<f64>> {
        let p_ref = constants.reference_surface_pressure()?;
        Ok(self
            .pressure
            .iter()
            .map(|p| (p / p_ref).powf(constants.kappa))
            .collect())
    }

    fn required_species(&self, name: &str) -> Result<&[f64]> {
        self.species(name).ok_or_else(|| self.missing_column(name))
    }

    fn missing_column(&self, name: &str) -> Error {
        Error::parse(
            &format!("{}_malbec.txt", self.case_id),
            0,
            format!("missing column `{name}`"),
        )
    }

    fn mass_mixing_ratio(&self) -> Result<Vec<f64>> {
        let h2o = self.required_species("H2O")?;
        let mmw = self
            .mean_molecular_weight
            .as_ref()
            .ok_or_else(|| self.missing_column("MMW"))?;

        Ok(h2o
            .iter()
            .zip(mmw)
            .map(|(x, m)| x * WATER_MOLAR_MASS / m)
            .collect())
    }
}

pub(crate) fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

pub(crate) fn is_strictly_monotonic(values: &[f64]) -> bool {
    is_strictly_increasing(values) || values.windows(2).all(|w| w[0] > w[1])
}

// -- Tests -------------------------------------------------------------------
