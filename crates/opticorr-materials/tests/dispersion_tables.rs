//! Scenario tests for dispersion-table parsing, interpolation, and the
//! on-disk store.

use approx::assert_relative_eq;

use opticorr_materials::provider::{MaterialError, SubstrateOptics};
use opticorr_materials::store::MaterialStore;
use opticorr_materials::table::DispersionTable;

const GLASS_TABLE: &str = "\
wavelength\tn\tk
400.0\t1.5350\t0.0001
500.0\t1.5270\t0.00005
600.0\t1.5220\t0.00002
700.0\t1.5190\t0.00001
";

#[test]
fn test_parses_header_and_rows() {
    let table = DispersionTable::parse("glass", GLASS_TABLE).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.name(), "glass");
    assert_eq!(table.wavelength_range(), (400.0, 700.0));
}

#[test]
fn test_interpolates_onto_the_requested_grid() {
    let table = DispersionTable::parse("glass", GLASS_TABLE).unwrap();
    let grid = [450.0, 500.0, 650.0];
    let n = table.refractive_index(&grid).unwrap();

    // Output is exactly grid-length, in grid order.
    assert_eq!(n.len(), grid.len());

    // Knot hit.
    assert_relative_eq!(n[1].re, 1.5270, max_relative = 1e-12);
    assert_relative_eq!(n[1].im, -0.00005, max_relative = 1e-12);

    // Linear midpoints, k carried with a negative imaginary sign.
    assert_relative_eq!(n[0].re, (1.5350 + 1.5270) / 2.0, max_relative = 1e-12);
    assert_relative_eq!(n[2].im, -(0.00002 + 0.00001) / 2.0, max_relative = 1e-12);
}

#[test]
fn test_extrapolation_clamps_to_edge_values() {
    let table = DispersionTable::parse("glass", GLASS_TABLE).unwrap();
    let n = table.refractive_index(&[300.0, 900.0]).unwrap();
    assert_relative_eq!(n[0].re, 1.5350, max_relative = 1e-12);
    assert_relative_eq!(n[1].re, 1.5190, max_relative = 1e-12);
}

#[test]
fn test_repeated_calls_are_independent() {
    // The raw table is immutable: a second call with a different grid must
    // not be affected by the first.
    let table = DispersionTable::parse("glass", GLASS_TABLE).unwrap();
    let first = table.refractive_index(&[450.0]).unwrap();
    let second = table.refractive_index(&[450.0, 550.0, 650.0]).unwrap();
    assert_eq!(first[0], second[0]);
    assert_eq!(second.len(), 3);
}

#[test]
fn test_transposed_table_is_rejected() {
    // Three long rows instead of three columns: the historical transposed
    // storage layout.
    let content = "\
header
400.0 500.0 600.0 700.0
1.5350 1.5270 1.5220 1.5190
0.0001 0.00005 0.00002 0.00001
";
    let err = DispersionTable::parse("glass", content).unwrap_err();
    match err {
        MaterialError::Format(msg) => assert!(msg.contains("transposed"), "got: {msg}"),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn test_ragged_and_non_numeric_rows_are_rejected() {
    let ragged = "header\n400.0 1.5 0.0\n500.0 1.5\n600.0 1.5 0.0\n";
    assert!(matches!(
        DispersionTable::parse("glass", ragged),
        Err(MaterialError::Format(_))
    ));

    let non_numeric = "header\n400.0 n/a 0.0\n500.0 1.5 0.0\n600.0 1.5 0.0\n";
    let err = DispersionTable::parse("glass", non_numeric).unwrap_err();
    assert!(err.to_string().contains("n/a"));
}

#[test]
fn test_short_tables_are_ambiguous() {
    let two_rows = "header\n400.0 1.5 0.0\n500.0 1.5 0.0\n";
    assert!(matches!(
        DispersionTable::parse("glass", two_rows),
        Err(MaterialError::Format(_))
    ));
}

#[test]
fn test_non_increasing_wavelengths_are_rejected() {
    let unsorted = "header\n500.0 1.5 0.0\n400.0 1.5 0.0\n600.0 1.5 0.0\n";
    assert!(matches!(
        DispersionTable::parse("glass", unsorted),
        Err(MaterialError::Format(_))
    ));
}

#[test]
fn test_invalid_grids_are_rejected() {
    let table = DispersionTable::parse("glass", GLASS_TABLE).unwrap();
    assert!(matches!(
        table.refractive_index(&[]),
        Err(MaterialError::InvalidGrid)
    ));
    assert!(matches!(
        table.refractive_index(&[600.0, 500.0]),
        Err(MaterialError::InvalidGrid)
    ));
}

#[test]
fn test_missing_substrate_reports_not_found() {
    let store = MaterialStore::open("/nonexistent/db");
    let err = store.load("B270").unwrap_err();
    match err {
        MaterialError::NotFound(name) => assert_eq!(name, "B270"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_store_resolves_suffixed_file_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("floatglass_nk.txt"), GLASS_TABLE).unwrap();

    let store = MaterialStore::open(dir.path());
    assert!(store.table_path("floatglass").ends_with("floatglass_nk.txt"));

    let table = store.load("floatglass").unwrap();
    assert_eq!(table.len(), 4);

    let n = store.refractive_index("floatglass", &[500.0]).unwrap();
    assert_relative_eq!(n[0].re, 1.5270, max_relative = 1e-12);

    assert_eq!(store.available().unwrap(), vec!["floatglass".to_string()]);
}
