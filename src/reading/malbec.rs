//! MALBEC atmosphere profile files (`<case>_malbec.txt`).
//!
//! Comment lines start with `#`. Column names come from the
//! `# Atmosphere-columns: ` line; without it columns are named `col00`,
//! `col01`, ... The fourth column holds the altitude.

use std::{fs, path::Path};

use crate::error::{Error, Result};

use super::{parse_row, Table};

const COLUMNS_LABEL: &str = "# Atmosphere-columns: ";

/// Position of the altitude column in a MALBEC file.
pub const ALTITUDE_COLUMN: usize = 3;

pub fn read_malbec_profiles(path: &Path) -> Result<Table> {
    if !path.is_file() {
        return Err(Error::DataNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown File".to_owned());

    parse_malbec(&text, &file_name)
}

pub fn parse_malbec(text: &str, file_name: &str) -> Result<Table> {
    let mut columns: Option<Vec<String>> = None;
    let mut data_lines = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if let Some(names) = line.strip_prefix(COLUMNS_LABEL) {
            columns = Some(names.split_whitespace().map(str::to_string).collect());
        } else if !line.starts_with('#') && !line.trim().is_empty() {
            data_lines.push((idx + 1, line));
        }
    }

    let columns = match columns {
        Some(c) => c,
        None => {
            let ncol = data_lines
                .last()
                .map(|(_, line)| line.split_whitespace().count())
                .unwrap_or(0);
            (0..ncol).map(|i| format!("col{i:02}")).collect()
        }
    };

    if columns.len() <= ALTITUDE_COLUMN {
        return Err(Error::parse(
            file_name,
            0,
            format!("expected at least {} columns", ALTITUDE_COLUMN + 1),
        ));
    }

    let rows = data_lines
        .into_iter()
        .map(|(line_no, line)| parse_row(line, columns.len(), file_name, line_no))
        .collect::<Result<Vec<_>>>()?;

    Ok(Table { columns, rows })
}

// -- Tests -------------------------------------------------------------------
