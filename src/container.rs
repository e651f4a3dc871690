//! Container for one MALBEC case: its profile, its constants and the
//! operations that turn them into UM inputs.

use std::path::{Path, PathBuf};

use crate::{
    config::Paths,
    constants::Constants,
    dump::{DumpFile, FieldHeader, VerticalCoordinate},
    error::{Error, Result},
    interpolate::{interpolate, Scale},
    levels::VerticalLevelSet,
    parquet,
    profile::{Profile, Variable},
    reading::read_malbec_profiles,
    stash::FieldSpec,
};

/// Hectopascal to pascal, for `BLEV` on pressure levels.
const HPA_TO_PA: f64 = 100.0;

/// What a dump edit changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSummary {
    pub stash: i64,
    pub variable: Variable,
    /// Values written, one per level field in lookup order.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ProfileContainer {
    case_id: String,
    paths: Paths,
    constants: Constants,
    profile: Profile,
}

impl ProfileContainer {
    /// Load the constants and the profile of `case_id`.
    pub fn create(case_id: &str, paths: Paths) -> Result<Self> {
        let constants = Constants::load(&paths.const_file(case_id))?;
        let table = read_malbec_profiles(&paths.malbec_file(case_id))?;
        let profile = Profile::from_table(case_id, &table)?;

        log::info!(
            "{case_id}: {} levels, {:.1} to {:.1} m",
            profile.len(),
            profile.height[0],
            profile.height[profile.len() - 1]
        );

        Ok(ProfileContainer {
            case_id: case_id.to_string(),
            paths,
            constants,
            profile,
        })
    }

    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn values(&self, variable: Variable) -> Result<Vec<f64>> {
        self.profile.values(variable, &self.constants)
    }

    fn output_dir(&self, outdir: Option<&Path>) -> PathBuf {
        outdir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.paths.case_dir(&self.case_id))
    }

    /// Theta levels at the profile heights, lid at the top sample.
    pub fn vertical_levels(&self, first_constant_r_rho_level: i64) -> VerticalLevelSet {
        VerticalLevelSet::from_heights(&self.profile.height, first_constant_r_rho_level)
    }

    /// Write the `&VERTLEVS` namelist to `vertlevs_<case>`, by default in the
    /// case directory.
    pub fn derive_vertical_levels(
        &self,
        first_constant_r_rho_level: i64,
        outdir: Option<&Path>,
    ) -> Result<(VerticalLevelSet, PathBuf)> {
        let levels = self.vertical_levels(first_constant_r_rho_level);
        let path = self
            .output_dir(outdir)
            .join(format!("vertlevs_{}", self.case_id));
        levels.write(&path)?;

        Ok((levels, path))
    }

    /// Write `<case>_p_t_profile.parquet`, by default in the case directory.
    pub fn export_profile(&self, outdir: Option<&Path>) -> Result<PathBuf> {
        let path = self
            .output_dir(outdir)
            .join(format!("{}_p_t_profile.parquet", self.case_id));
        parquet::save_profile(&self.profile, &path)?;

        Ok(path)
    }

    /// Overwrite the column at `flat_index` of `field_name` with the profile
    /// interpolated onto the levels of that field. The dump is rewritten in
    /// place; on error it is left as it was.
    pub fn patch_state_file(
        &self,
        path: &Path,
        flat_index: i64,
        field_name: &str,
    ) -> Result<PatchSummary> {
        let spec = FieldSpec::lookup(field_name).ok_or_else(|| Error::FieldNotFound {
            name: field_name.to_string(),
        })?;
        let profile_values = self.values(spec.variable)?;

        let summary = DumpFile::edit(path, |dump| {
            let fields = level_fields(dump, &spec, field_name)?;
            let point = horizontal_point(flat_index, &fields)?;

            let values = fields
                .iter()
                .map(|field| self.value_on_level(field, &profile_values, dump.path()))
                .collect::<Result<Vec<f64>>>()?;

            for (field, value) in fields.iter().zip(&values) {
                dump.write_point(field, point, *value)?;
            }

            Ok(PatchSummary {
                stash: spec.stash,
                variable: spec.variable,
                values,
            })
        })?;

        log::info!(
            "Patched {} levels of STASH {} at point {} in `{}`",
            summary.values.len(),
            spec.stash,
            flat_index,
            path.display()
        );

        Ok(summary)
    }

    /// Set each level field of `field_name` to a horizontally uniform value:
    /// the i-th field takes the i-th profile sample. Fields beyond the
    /// profile are left as they are.
    pub fn fill_state_file_levels(&self, path: &Path, field_name: &str) -> Result<PatchSummary> {
        let spec = FieldSpec::lookup(field_name).ok_or_else(|| Error::FieldNotFound {
            name: field_name.to_string(),
        })?;
        let profile_values = self.values(spec.variable)?;

        DumpFile::edit(path, |dump| {
            let fields = level_fields(dump, &spec, field_name)?;
            let mut values = Vec::with_capacity(fields.len());

            for (ilev, field) in fields.iter().enumerate() {
                match profile_values.get(ilev) {
                    Some(&value) => {
                        dump.fill_field(field, value)?;
                        values.push(value);
                    }
                    None => log::warn!("Skipping level {ilev:>3}"),
                }
            }

            Ok(PatchSummary {
                stash: spec.stash,
                variable: spec.variable,
                values,
            })
        })
    }

    fn value_on_level(&self, field: &FieldHeader, values: &[f64], dump_path: &Path) -> Result<f64> {
        let (levels, target, scale) = match field.coordinate {
            VerticalCoordinate::Height => (&self.profile.height, field.blev, Scale::Linear),
            VerticalCoordinate::Pressure => {
                (&self.profile.pressure, field.blev * HPA_TO_PA, Scale::Log)
            }
            VerticalCoordinate::Other(lbvc) => {
                return Err(Error::state_file(
                    dump_path,
                    format!("unsupported vertical coordinate LBVC {lbvc} in field {}", field.index),
                ))
            }
        };
        let value = interpolate(levels, values, &[target], scale)?[0];
        log::debug!("level {} ({}): {value}", field.lblev, field.blev);

        Ok(value)
    }
}

fn level_fields(dump: &DumpFile, spec: &FieldSpec, field_name: &str) -> Result<Vec<FieldHeader>> {
    let fields = dump.fields_with_stash(spec.stash);
    if fields.is_empty() {
        return Err(Error::FieldNotFound {
            name: field_name.to_string(),
        });
    }
    Ok(fields)
}

// Every level of a field shares the same horizontal grid.
fn horizontal_point(flat_index: i64, fields: &[FieldHeader]) -> Result<usize> {
    let size = fields.iter().map(FieldHeader::size).min().unwrap_or(0);
    match usize::try_from(flat_index) {
        Ok(point) if point < size => Ok(point),
        _ => Err(Error::IndexOutOfRange {
            index: flat_index,
            size,
        }),
    }
}

// -- Tests -------------------------------------------------------------------
