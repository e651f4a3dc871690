//! Save the pressure-temperature profile for the idealised UM reconfiguration.

use std::{collections::HashMap, fs::File, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, Float64Array, RecordBatch},
    datatypes::{DataType, Field, Schema},
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use crate::{
    error::{Error, Result},
    profile::Profile,
};

/// Write altitude, temperature and pressure columns, top of the atmosphere first.
pub fn save_profile(profile: &Profile, file_path: &Path) -> Result<()> {
    let file = File::create(file_path).map_err(|source| Error::Write {
        path: file_path.to_path_buf(),
        source,
    })?;

    let schema = Arc::new(
        Schema::new(vec![
            column_field("altitude", "m"),
            column_field("temperature", "K"),
            column_field("pressure_si", "Pa"),
        ])
        .with_metadata(single_entry("case_id", &profile.case_id)),
    );

    let reversed = |values: &[f64]| values.iter().rev().copied().collect::<Vec<f64>>();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(reversed(&profile.height))),
        Arc::new(Float64Array::from(reversed(&profile.temperature))),
        Arc::new(Float64Array::from(reversed(&profile.pressure))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    log::info!("P-T profile written to `{}`", file_path.display());

    Ok(())
}

fn column_field(name: &str, units: &str) -> Field {
    Field::new(name, DataType::Float64, false).with_metadata(single_entry("units", units))
}

// Metadata maps hold one entry each: map iteration order is not stable
// between instances and would leak into the written bytes.
fn single_entry(key: &str, value: &str) -> HashMap<String, String> {
    HashMap::from([(key.to_string(), value.to_string())])
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use arrow::array::AsArray;
    use arrow::datatypes::Float64Type;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::TempDir;

    use super::*;

    fn profile_fixture() -> Profile {
        Profile {
            case_id: "T1A".to_string(),
            height: vec![0.0, 1000.0, 2000.0],
            pressure: vec![1.0e5, 9.0e4, 8.0e4],
            temperature: vec![300.0, 290.0, 280.0],
            mean_molecular_weight: None,
            species: vec![],
        }
    }

    #[test]
    fn should_write_reversed_columns_with_units() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("T1A_p_t_profile.parquet");
        save_profile(&profile_fixture(), &path).unwrap();

        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
        let schema = builder.schema().clone();
        let batch = builder.build().unwrap().next().unwrap().unwrap();

        assert_eq!(schema.metadata().get("case_id").map(String::as_str), Some("T1A"));
        let units = schema.field_with_name("pressure_si").unwrap().metadata().get("units");
        assert_eq!(units.map(String::as_str), Some("Pa"));

        let altitude = batch.column(0).as_primitive::<Float64Type>();
        assert_eq!(altitude.values().to_vec(), vec![2000.0, 1000.0, 0.0]);
        let temperature = batch.column(1).as_primitive::<Float64Type>();
        assert_eq!(temperature.value(0), 280.0);
    }

    #[test]
    fn should_write_identical_bytes_twice() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.parquet");
        let second = dir.path().join("b.parquet");
        save_profile(&profile_fixture(), &first).unwrap();
        save_profile(&profile_fixture(), &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
