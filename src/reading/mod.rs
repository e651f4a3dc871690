pub mod malbec;
pub mod psg;

pub use malbec::read_malbec_profiles;
pub use psg::{read_psg_cfg, read_psg_lyr_atm_prof, PsgConfig, PsgValue};

use crate::error::{Error, Result};

/// A whitespace separated numeric table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.column_index(name).map(|idx| self.column_at(idx))
    }

    pub fn column_at(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[idx]).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse one row of numbers, checking the number of columns.
pub(crate) fn parse_row(line: &str, ncols: usize, file: &str, line_no: usize) -> Result<Vec<f64>> {
    let values = line
        .split_whitespace()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|e| Error::parse(file, line_no, format!("`{v}`: {e}")))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != ncols {
        return Err(Error::parse(
            file,
            line_no,
            format!("expected {} columns, found {}", ncols, values.len()),
        ));
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_row() {
        let row = parse_row(" 1.0  2.5e-3 -4 ", 3, "t.txt", 1).unwrap();
        assert_eq!(row, vec![1.0, 2.5e-3, -4.0]);
    }

    #[test]
    fn should_reject_short_row() {
        let err = parse_row("1.0 2.0", 3, "t.txt", 7).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 7, .. }));
    }
}
