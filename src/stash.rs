//! Field names, STASH codes and the profile variables that feed them.

use crate::profile::Variable;

/// A dump field the container knows how to fill from a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// STASH item code, stored in `LBUSER4`.
    pub stash: i64,
    pub variable: Variable,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "humidity_mixing_ratio",
        stash: 10,
        variable: Variable::HumidityMixingRatio,
    },
    FieldSpec {
        name: "specific_humidity",
        stash: 10,
        variable: Variable::HumidityMixingRatio,
    },
    FieldSpec {
        name: "water_vapour_mass_mixing_ratio",
        stash: 10,
        variable: Variable::MassMixingRatio,
    },
    FieldSpec {
        name: "air_potential_temperature",
        stash: 4,
        variable: Variable::PotentialTemperature,
    },
    FieldSpec {
        name: "dimensionless_exner_function",
        stash: 255,
        variable: Variable::Exner,
    },
    FieldSpec {
        name: "air_pressure",
        stash: 408,
        variable: Variable::Pressure,
    },
    FieldSpec {
        name: "air_temperature",
        stash: 16004,
        variable: Variable::Temperature,
    },
];

impl FieldSpec {
    /// Look up a field by name, by item code (`10`) or by full STASH string
    /// (`m01s00i010`).
    pub fn lookup(name: &str) -> Option<FieldSpec> {
        let name = name.trim();
        if let Some(spec) = FIELDS.iter().find(|f| f.name == name) {
            return Some(*spec);
        }
        let code = parse_stash(name)?;
        FIELDS.iter().find(|f| f.stash == code).copied()
    }
}

/// `m01s00i010` or `10` to the item code `10`; section codes fold in as
/// `section * 1000 + item`.
pub fn parse_stash(text: &str) -> Option<i64> {
    if let Ok(code) = text.parse::<i64>() {
        return Some(code);
    }
    let rest = text.strip_prefix('m')?;
    let (_model, rest) = rest.split_once('s')?;
    let (section, item) = rest.split_once('i')?;

    section
        .parse::<i64>()
        .ok()?
        .checked_mul(1000)?
        .checked_add(item.parse::<i64>().ok()?)
}

// -- Tests -------------------------------------------------------------------
