//! Handles serialising and saving profiles to disk in the _parquet_ file format.

pub mod profile;

pub use profile::save_profile;
