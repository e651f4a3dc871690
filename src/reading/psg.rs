//! NASA-GSFC PSG configuration files and layer-by-layer profiles.

use std::{
    fmt,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::error::{Error, Result};

use super::{parse_row, Table};

#[derive(Debug, Clone, PartialEq)]
pub enum PsgValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl PsgValue {
    fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            PsgValue::Int(v)
        } else if let Ok(v) = trimmed.parse::<f64>() {
            PsgValue::Float(v)
        } else {
            PsgValue::Text(raw.to_string())
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PsgValue::Int(v) => Some(*v as f64),
            PsgValue::Float(v) => Some(*v),
            PsgValue::Text(_) => None,
        }
    }
}

impl fmt::Display for PsgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsgValue::Int(v) => write!(f, "{v}"),
            PsgValue::Float(v) => write!(f, "{v:?}"),
            PsgValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// `<KEY>value` pairs in file order. A repeated key keeps its first position
/// and takes the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsgConfig {
    entries: Vec<(String, PsgValue)>,
}

impl PsgConfig {
    pub fn parse(text: &str) -> Self {
        let mut config = PsgConfig::default();
        for line in text.lines() {
            if let Some((key, value)) = split_entry(line) {
                config.insert(key.to_string(), PsgValue::from_raw(value));
            }
        }
        config
    }

    pub fn insert(&mut self, key: String, value: PsgValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PsgValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `key = value` lines, one per entry.
    pub fn write_summary(&self, path: &Path) -> Result<()> {
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
        for (key, value) in &self.entries {
            writeln!(out, "{key} = {value}").map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;

        Ok(())
    }
}

// `<` then a non-empty key up to the next `>`, value is the rest of the line
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let open = line.find('<')?;
    let rest = &line[open + 1..];
    let first = rest.chars().next()?;
    let close = rest[first.len_utf8()..].find('>')? + first.len_utf8();

    Some((&rest[..close], &rest[close + 1..]))
}

pub fn read_psg_cfg(path: &Path) -> Result<PsgConfig> {
    if !path.is_file() {
        return Err(Error::DataNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(PsgConfig::parse(&fs::read_to_string(path)?))
}

pub fn read_psg_lyr_atm_prof(path: &Path) -> Result<Table> {
    if !path.is_file() {
        return Err(Error::DataNotFound {
            path: path.to_path_buf(),
        });
    }
    let file_name = path.to_string_lossy().to_string();

    parse_layer_profile(&fs::read_to_string(path)?, &file_name)
}

/// The table header is the line containing `Alt[km]`, data start three lines
/// below it and end two lines above the `Curtis-Godson` line.
pub fn parse_layer_profile(text: &str, file_name: &str) -> Result<Table> {
    let lines: Vec<&str> = text.lines().collect();

    let mut header_idx = None;
    let mut end_idx = None;
    for (idx, line) in lines.iter().enumerate() {
        if line.contains("Alt[km]") {
            header_idx = Some(idx);
        }
        if line.contains("Curtis-Godson") {
            end_idx = idx.checked_sub(2);
        }
    }
    let (header_idx, end_idx) = match (header_idx, end_idx) {
        (Some(h), Some(e)) if e >= h + 3 => (h, e),
        _ => return Err(Error::parse(file_name, 0, "cannot identify data lines")),
    };

    let columns: Vec<String> = strip_comment(lines[header_idx])
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, line) in lines.iter().enumerate().take(end_idx + 1).skip(header_idx + 3) {
        let line = strip_comment(line);
        if line.starts_with('-') || line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(line, columns.len(), file_name, idx + 1)?);
    }

    Ok(Table { columns, rows })
}

fn strip_comment(line: &str) -> &str {
    line.strip_prefix("# ").unwrap_or(line)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_config_values() {
        let text = "<OBJECT>Exoplanet\n<OBJECT-DIAMETER>12742\n<OBJECT-GRAVITY>9.81\n<ATMOSPHERE-LAYERS>50\n";
        let config = PsgConfig::parse(text);

        assert_eq!(config.len(), 4);
        assert_eq!(config.get("OBJECT"), Some(&PsgValue::Text("Exoplanet".to_string())));
        assert_eq!(config.get("OBJECT-DIAMETER"), Some(&PsgValue::Int(12742)));
        assert_eq!(config.get("OBJECT-GRAVITY"), Some(&PsgValue::Float(9.81)));
        assert_eq!(
            config.keys().collect::<Vec<_>>(),
            vec!["OBJECT", "OBJECT-DIAMETER", "OBJECT-GRAVITY", "ATMOSPHERE-LAYERS"]
        );
    }

    #[test]
    fn should_keep_first_position_of_repeated_key() {
        let config = PsgConfig::parse("<A>1\n<B>2\n<A>3\n");

        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(config.get("A"), Some(&PsgValue::Int(3)));
    }

    #[test]
    fn should_ignore_lines_without_key() {
        let config = PsgConfig::parse("plain text\n<>empty\n<K>v\n");

        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["K"]);
    }

    #[test]
    fn should_write_summary() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        PsgConfig::parse("<A>1\n<B>2.5\n<C>text\n").write_summary(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A = 1\nB = 2.5\nC = text\n");
    }

    #[test]
    fn should_parse_layer_profile() {
        let text = "\
# PSG layer-by-layer
# Alt[km] Pressure[bar] Temperature[K]
# --------------------------------
# units line
0.0 1.0 288.0
5.0 0.5 255.0
10.0 0.25 223.0

# Curtis-Godson averages
";
        let table = parse_layer_profile(text, "lyr.txt").unwrap();

        assert_eq!(table.columns, vec!["Alt[km]", "Pressure[bar]", "Temperature[K]"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.column("Temperature[K]").unwrap(), vec![288.0, 255.0, 223.0]);
    }

    #[test]
    fn should_fail_without_table_markers() {
        let err = parse_layer_profile("nothing here\n", "lyr.txt").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
