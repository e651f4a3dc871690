//! Error types for profile loading, export and dump patching.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no data found at `{}`", path.display())]
    DataNotFound { path: PathBuf },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("field `{name}` not found in dump")]
    FieldNotFound { name: String },

    #[error("index {index} is outside the horizontal grid of {size} points")]
    IndexOutOfRange { index: i64, size: usize },

    #[error("target level {target} is outside the profile range [{min}, {max}]")]
    Interpolation { target: f64, min: f64, max: f64 },

    #[error("{levels} levels but {values} values to interpolate")]
    LengthMismatch { levels: usize, values: usize },

    #[error("{file}, line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("malformed dump `{}`: {message}", path.display())]
    StateFile { path: PathBuf, message: String },

    #[error("constant `{name}` missing from `{}`", path.display())]
    Constants { name: String, path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(file: &str, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn state_file(path: &std::path::Path, message: impl Into<String>) -> Self {
        Error::StateFile {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
