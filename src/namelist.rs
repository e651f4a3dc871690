//! Fortran namelist output.

/// Width of a formatted real.
const REAL_WIDTH: usize = 16;
const VALUES_PER_LINE: usize = 5;
/// Shorter lines are padded out to this width; a full line runs past it.
const LINE_LENGTH: usize = 85;

/// A namelist value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    RealArray(Vec<f64>),
}

/// One `&NAME ... /` group. Entries are written sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub entries: Vec<(String, Value)>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Group {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.entries.push((key.to_string(), value));
        self
    }

    pub fn render(&self) -> String {
        let mut entries: Vec<&(String, Value)> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let key_width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        let mut lines = vec![format!("&{}", self.name)];
        for (key, value) in entries {
            match value {
                Value::Int(v) => lines.push(format!(" {key:<key_width$} = {v},")),
                Value::Real(v) => lines.push(format!(" {key:<key_width$} = {},", format_real(*v))),
                Value::RealArray(values) => {
                    lines.extend(format_array(values, &format!(" {key} = ")))
                }
            }
        }
        lines.push("/".to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Format a real like Fortran `ES16.7`: `   8.5000000e+04`.
pub fn format_real(value: f64) -> String {
    let formatted = format!("{value:.7e}");
    let real = match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    };
    format!("{real:>width$}", width = REAL_WIDTH)
}

/// Declaration line followed by comma separated values, a fixed number per
/// line, each line padded to the same width.
pub fn format_array(values: &[f64], decl_line: &str) -> Vec<String> {
    let mut lines = vec![decl_line.to_string()];

    for chunk in values.chunks(VALUES_PER_LINE) {
        let joined = chunk
            .iter()
            .map(|v| format_real(*v))
            .collect::<Vec<_>>()
            .join(",");
        let body = format!("{joined},");
        lines.push(format!(" {body:<width$}", width = LINE_LENGTH - 1));
    }

    lines
}

// -- Tests -------------------------------------------------------------------
