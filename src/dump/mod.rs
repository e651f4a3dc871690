//! Reading and patching UM dumps.
//!
//! A dump is a sequence of 64-bit big-endian words: a fixed length header of
//! 256 words, constants tables, a lookup table with one 64-word entry per 2-D
//! field, and the field data. Only the fixed length header, the lookup table
//! and unpacked real data are interpreted here; every other byte is carried
//! through untouched.

mod session;

use std::{
    fs,
    path::{Path, PathBuf},
};

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

const WORD: usize = 8;
const FIXED_HEADER_LEN: usize = 256;
const LOOKUP_ENTRY_LEN: usize = 64;
/// Marks an unused lookup entry.
const MISSING: i64 = -99;

// Fixed length header words, zero based.
const FH_LOOKUP_START: usize = 149;
const FH_LOOKUP_DIM1: usize = 150;
const FH_LOOKUP_DIM2: usize = 151;

// Lookup entry words, zero based.
const LBYR: usize = 0;
const LBROW: usize = 17;
const LBNPT: usize = 18;
const LBPACK: usize = 20;
const LBVC: usize = 25;
const LBEGIN: usize = 28;
const LBLEV: usize = 32;
const LBUSER1: usize = 38;
const LBUSER4: usize = 41;
const BLEV: usize = 51;

/// `LBUSER1` value of real fields.
const REAL_DATA: i64 = 1;

/// Vertical coordinate of a field, from `LBVC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalCoordinate {
    /// `BLEV` is a height in metres.
    Height,
    /// `BLEV` is a pressure in hPa.
    Pressure,
    Other(i64),
}

impl VerticalCoordinate {
    fn from_lbvc(lbvc: i64) -> Self {
        match lbvc {
            1 | 65 => VerticalCoordinate::Height,
            8 => VerticalCoordinate::Pressure,
            other => VerticalCoordinate::Other(other),
        }
    }
}

/// The parts of a lookup entry needed to find and patch one 2-D field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldHeader {
    /// Position in the lookup table.
    pub index: usize,
    pub stash: i64,
    pub lblev: i64,
    pub blev: f64,
    pub coordinate: VerticalCoordinate,
    pub rows: usize,
    pub columns: usize,
    pub lbpack: i64,
    pub data_type: i64,
    data_offset: usize,
}

impl FieldHeader {
    /// Number of horizontal points.
    pub fn size(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    fn is_patchable(&self) -> bool {
        self.lbpack == 0 && self.data_type == REAL_DATA
    }

    fn point_offset(&self, point: usize) -> usize {
        self.data_offset + point * WORD
    }
}

/// A dump held in memory as the raw file bytes plus its parsed lookup.
#[derive(Debug, Clone)]
pub struct DumpFile {
    path: PathBuf,
    bytes: Vec<u8>,
    fields: Vec<FieldHeader>,
}

impl DumpFile {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DataNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path)?;

        Self::from_bytes(bytes, path)
    }

    pub fn from_bytes(bytes: Vec<u8>, path: &Path) -> Result<Self> {
        if bytes.len() % WORD != 0 || bytes.len() < FIXED_HEADER_LEN * WORD {
            return Err(Error::state_file(path, "file too short for a fixed length header"));
        }
        let mut dump = DumpFile {
            path: path.to_path_buf(),
            bytes,
            fields: Vec::new(),
        };
        dump.fields = dump.parse_lookup()?;

        Ok(dump)
    }

    fn parse_lookup(&self) -> Result<Vec<FieldHeader>> {
        let start = self.int_at(FH_LOOKUP_START);
        let dim1 = self.int_at(FH_LOOKUP_DIM1);
        let dim2 = self.int_at(FH_LOOKUP_DIM2);

        if dim1 != LOOKUP_ENTRY_LEN as i64 {
            return Err(Error::state_file(
                &self.path,
                format!("lookup entries of {dim1} words, expected {LOOKUP_ENTRY_LEN}"),
            ));
        }
        let first_word = usize::try_from(start).ok().and_then(|s| s.checked_sub(1));
        let (Some(first_word), Ok(n_entries)) = (first_word, usize::try_from(dim2)) else {
            return Err(Error::state_file(&self.path, "no lookup table"));
        };
        let lookup_end = n_entries
            .checked_mul(LOOKUP_ENTRY_LEN)
            .and_then(|len| len.checked_add(first_word));
        if !lookup_end.is_some_and(|end| end <= self.n_words()) {
            return Err(Error::state_file(&self.path, "lookup table runs past end of file"));
        }

        let mut fields = Vec::new();
        for index in 0..n_entries {
            let base = first_word + index * LOOKUP_ENTRY_LEN;
            if self.int_at(base + LBYR) == MISSING {
                continue;
            }
            fields.push(self.field_header(index, base)?);
        }

        Ok(fields)
    }

    fn field_header(&self, index: usize, base: usize) -> Result<FieldHeader> {
        let invalid = |what: &str| Error::state_file(&self.path, format!("{what} in field {index}"));
        let dimension = |word: usize| {
            usize::try_from(self.int_at(base + word)).map_err(|_| invalid("negative dimension"))
        };

        let rows = dimension(LBROW)?;
        let columns = dimension(LBNPT)?;
        let data_offset = dimension(LBEGIN)?
            .checked_mul(WORD)
            .ok_or_else(|| invalid("data start out of range"))?;
        let data_end = rows
            .checked_mul(columns)
            .and_then(|size| size.checked_mul(WORD))
            .and_then(|len| len.checked_add(data_offset));
        if !data_end.is_some_and(|end| end <= self.bytes.len()) {
            return Err(invalid("data runs past end of file"));
        }

        Ok(FieldHeader {
            index,
            stash: self.int_at(base + LBUSER4),
            lblev: self.int_at(base + LBLEV),
            blev: self.real_at(base + BLEV),
            coordinate: VerticalCoordinate::from_lbvc(self.int_at(base + LBVC)),
            rows,
            columns,
            lbpack: self.int_at(base + LBPACK),
            data_type: self.int_at(base + LBUSER1),
            data_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn fields(&self) -> &[FieldHeader] {
        &self.fields
    }

    /// Level fields of one STASH code, in lookup order.
    pub fn fields_with_stash(&self, stash: i64) -> Vec<FieldHeader> {
        self.fields
            .iter()
            .filter(|f| f.stash == stash)
            .cloned()
            .collect()
    }

    pub fn read_field(&self, field: &FieldHeader) -> Vec<f64> {
        (0..field.size())
            .map(|point| read_real(&self.bytes, field.point_offset(point)))
            .collect()
    }

    pub fn read_point(&self, field: &FieldHeader, point: usize) -> Option<f64> {
        (point < field.size()).then(|| read_real(&self.bytes, field.point_offset(point)))
    }

    /// Overwrite one horizontal point of an unpacked real field.
    pub fn write_point(&mut self, field: &FieldHeader, point: usize, value: f64) -> Result<()> {
        self.check_patchable(field)?;
        if point >= field.size() {
            return Err(Error::IndexOutOfRange {
                index: point as i64,
                size: field.size(),
            });
        }
        let offset = field.point_offset(point);
        BigEndian::write_f64(&mut self.bytes[offset..offset + WORD], value);

        Ok(())
    }

    /// Overwrite every point of an unpacked real field.
    pub fn fill_field(&mut self, field: &FieldHeader, value: f64) -> Result<()> {
        self.check_patchable(field)?;
        for point in 0..field.size() {
            let offset = field.point_offset(point);
            BigEndian::write_f64(&mut self.bytes[offset..offset + WORD], value);
        }

        Ok(())
    }

    fn check_patchable(&self, field: &FieldHeader) -> Result<()> {
        if field.is_patchable() {
            Ok(())
        } else {
            Err(Error::state_file(
                &self.path,
                format!(
                    "field {} (STASH {}) is packed or not real (LBPACK {}, LBUSER1 {})",
                    field.index, field.stash, field.lbpack, field.data_type
                ),
            ))
        }
    }

    fn n_words(&self) -> usize {
        self.bytes.len() / WORD
    }

    fn int_at(&self, word: usize) -> i64 {
        BigEndian::read_i64(&self.bytes[word * WORD..])
    }

    fn real_at(&self, word: usize) -> f64 {
        read_real(&self.bytes, word * WORD)
    }
}

fn read_real(bytes: &[u8], offset: usize) -> f64 {
    BigEndian::read_f64(&bytes[offset..offset + WORD])
}

// -- Tests -------------------------------------------------------------------
