mod common;

use std::fs;

use malbec_um::{Error, Paths, ProfileContainer};

use common::{case_fixture, CASE};

#[test]
fn should_fail_for_missing_case() {
    let (_root, paths) = case_fixture();

    let err = ProfileContainer::create("T3B", paths).unwrap_err();
    assert!(matches!(err, Error::DataNotFound { .. }));
}

#[test]
fn should_derive_levels_spanning_profile() {
    let (root, paths) = case_fixture();
    let container = ProfileContainer::create(CASE, paths).unwrap();

    let (levels, path) = container.derive_vertical_levels(1, None).unwrap();

    assert_eq!(path, root.path().join("cases").join(CASE).join("vertlevs_T1A"));
    assert!(levels.eta_theta.windows(2).all(|w| w[0] < w[1]));
    assert!(levels.eta_rho.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(levels.z_top_of_model, 25000.0);
    assert_eq!(levels.eta_theta.first(), Some(&0.0));
    assert_eq!(levels.eta_theta.last(), Some(&1.0));
    assert_eq!(levels.eta_theta.len(), container.profile().len());

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("&VERTLEVS\n"));
    assert!(text.contains(" z_top_of_model             =    2.5000000e+04,"));
}

#[test]
fn should_report_unwritable_level_destination() {
    let (root, paths) = case_fixture();
    let container = ProfileContainer::create(CASE, paths).unwrap();
    let missing = root.path().join("no").join("such").join("dir");

    let err = container.derive_vertical_levels(1, Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
}

#[test]
fn should_export_identical_profile_files() {
    let (root, paths) = case_fixture();
    let container = ProfileContainer::create(CASE, paths).unwrap();
    let other = root.path().join("other");
    fs::create_dir_all(&other).unwrap();

    let first = container.export_profile(None).unwrap();
    let second = container.export_profile(Some(&other)).unwrap();

    assert_eq!(first.file_name(), second.file_name());
    assert_eq!(first.file_name().unwrap(), "T1A_p_t_profile.parquet");
    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn should_fail_without_constants() {
    let (root, _) = case_fixture();
    let paths = Paths::new(root.path().join("no_const"), root.path().join("cases"));

    let err = ProfileContainer::create(CASE, paths).unwrap_err();
    assert!(matches!(err, Error::DataNotFound { ref path } if path.ends_with("T1A.json")));
}
