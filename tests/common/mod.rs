#![allow(dead_code)]

use std::{fs, path::Path};

use byteorder::{BigEndian, ByteOrder};
use malbec_um::Paths;
use tempfile::TempDir;

pub const CASE: &str = "T1A";

/// Five levels from the surface to 25 km; H2O in mol/mol.
pub const MALBEC: &str = "\
# MALBEC atmosphere for T1A
# Atmosphere-columns: P T MMW Alt H2O CO2
1.00000e+00 300.0 18.01528  0.0 2.0e-2 4.0e-4
7.00000e-01 280.0 18.01528  3.0 1.0e-2 4.0e-4
4.00000e-01 250.0 18.01528  8.0 4.0e-3 4.0e-4
1.50000e-01 220.0 18.01528 15.0 5.0e-4 4.0e-4
5.00000e-02 210.0 18.01528 25.0 1.0e-5 4.0e-4
";

pub const CONSTANTS: &str = r#"{
    "gravity": {"value": 9.80665, "units": "m s-2"},
    "dry_air_gas_constant": {"value": 287.05, "units": "J kg-1 K-1"},
    "dry_air_spec_heat_press": {"value": 1005.0, "units": "J kg-1 K-1"},
    "reference_surface_pressure": {"value": 100000.0, "units": "Pa"}
}"#;

/// Case directory and constants for `T1A` under a temporary root.
pub fn case_fixture() -> (TempDir, Paths) {
    let root = TempDir::new().unwrap();
    let case_dir = root.path().join("cases").join(CASE);
    let const_dir = root.path().join("const");
    fs::create_dir_all(&case_dir).unwrap();
    fs::create_dir_all(&const_dir).unwrap();
    fs::write(case_dir.join(format!("{CASE}_malbec.txt")), MALBEC).unwrap();
    fs::write(const_dir.join(format!("{CASE}.json")), CONSTANTS).unwrap();

    let paths = Paths::new(const_dir, root.path().join("cases"))
        .with_start_dump_dir(root.path().join("start_dumps"));
    (root, paths)
}

pub struct FieldFixture {
    pub stash: i64,
    pub lbvc: i64,
    pub blev: f64,
    pub rows: usize,
    pub columns: usize,
}

/// A synthetic dump plus the word address of each field's data.
pub struct DumpFixture {
    pub bytes: Vec<u8>,
    pub data_words: Vec<usize>,
}

const FIXED_HEADER_LEN: usize = 256;
const LOOKUP_ENTRY_LEN: usize = 64;
const CONSTANTS_LEN: usize = 40;

/// Fixed length header, a block of constants, the lookup table, then data.
/// Every data word holds a distinct value so stray writes are visible.
pub fn build_dump(fields: &[FieldFixture]) -> DumpFixture {
    let lookup_start = FIXED_HEADER_LEN + CONSTANTS_LEN;
    let data_start = lookup_start + fields.len() * LOOKUP_ENTRY_LEN;
    let data_len: usize = fields.iter().map(|f| f.rows * f.columns).sum();
    let mut words = vec![0u64; data_start + data_len];

    words[0] = 20;
    words[4] = 1;
    words[99] = (FIXED_HEADER_LEN + 1) as u64;
    words[100] = CONSTANTS_LEN as u64;
    words[149] = (lookup_start + 1) as u64;
    words[150] = LOOKUP_ENTRY_LEN as u64;
    words[151] = fields.len() as u64;
    words[159] = (data_start + 1) as u64;
    words[160] = data_len as u64;
    for (i, w) in words[FIXED_HEADER_LEN..lookup_start].iter_mut().enumerate() {
        *w = (1.5 * i as f64).to_bits();
    }

    let mut data_words = Vec::new();
    let mut offset = data_start;
    for (i, f) in fields.iter().enumerate() {
        let base = lookup_start + i * LOOKUP_ENTRY_LEN;
        let size = f.rows * f.columns;
        words[base] = 2000;
        words[base + 14] = size as u64;
        words[base + 17] = f.rows as u64;
        words[base + 18] = f.columns as u64;
        words[base + 25] = f.lbvc as u64;
        words[base + 28] = offset as u64;
        words[base + 29] = size as u64;
        words[base + 32] = (i + 1) as u64;
        words[base + 38] = 1;
        words[base + 41] = f.stash as u64;
        words[base + 51] = f.blev.to_bits();
        for (p, w) in words[offset..offset + size].iter_mut().enumerate() {
            *w = (1000.0 * i as f64 + p as f64).to_bits();
        }
        data_words.push(offset);
        offset += size;
    }

    let mut bytes = vec![0u8; words.len() * 8];
    BigEndian::write_u64_into(&words, &mut bytes);

    DumpFixture { bytes, data_words }
}

/// Humidity on hybrid height levels plus potential temperature, 20 x 24 points.
pub fn um_dump(dir: &Path) -> (std::path::PathBuf, DumpFixture) {
    let heights = [0.0, 1500.0, 6000.0, 12000.0, 20000.0];
    let mut fields: Vec<FieldFixture> = heights
        .iter()
        .map(|&blev| FieldFixture {
            stash: 10,
            lbvc: 65,
            blev,
            rows: 20,
            columns: 24,
        })
        .collect();
    fields.extend(heights.iter().map(|&blev| FieldFixture {
        stash: 4,
        lbvc: 65,
        blev,
        rows: 20,
        columns: 24,
    }));

    let fixture = build_dump(&fields);
    let path = dir.join("atmos.astart");
    fs::write(&path, &fixture.bytes).unwrap();

    (path, fixture)
}

/// Indices of the 8-byte words that differ between two equally long buffers.
pub fn changed_words(before: &[u8], after: &[u8]) -> Vec<usize> {
    assert_eq!(before.len(), after.len());
    before
        .chunks(8)
        .zip(after.chunks(8))
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect()
}

pub fn read_word_f64(bytes: &[u8], word: usize) -> f64 {
    BigEndian::read_f64(&bytes[word * 8..word * 8 + 8])
}
