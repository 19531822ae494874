//! The tour end to end.

use ndarray::{array, Array2, ArrayD};
use ndarray_explorer::demo::{reshape, storage};
use ndarray_explorer::{explorer, read_npy, ExplorerConfig, ExplorerError, NpzReader};
use std::fs::File;

fn small_config(dir: &tempfile::TempDir) -> ExplorerConfig {
    ExplorerConfig {
        output_dir: dir.path().to_path_buf(),
        perf_size: 1000,
        seed: Some(42),
        compress: false,
    }
}

#[test]
fn full_run_writes_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(&dir);
    let mut out = Vec::new();
    let files = explorer::run(&config, &mut out).unwrap();
    assert_eq!(
        files,
        vec![
            dir.path().join(storage::NPY_FILE),
            dir.path().join(storage::NPZ_FILE),
            dir.path().join(storage::TXT_FILE),
        ]
    );

    let text = String::from_utf8(out).unwrap();
    for title in [
        "1. ARRAY CREATION, INDEXING & SLICING",
        "2. MATHEMATICAL & STATISTICAL OPERATIONS",
        "3. RESHAPING & BROADCASTING",
        "4. SAVE/LOAD OPERATIONS",
        "5. PERFORMANCE COMPARISON: NDARRAY VS VEC",
        "Files created:",
        "Next steps:",
    ] {
        assert!(text.contains(title), "missing {:?}", title);
    }
    assert!(text.contains("Testing with 1,000 elements..."));
}

#[test]
fn same_seed_same_output_up_to_timings() {
    let strip_timings = |text: String| -> Vec<String> {
        text.lines()
            .filter(|line| !line.contains("seconds") && !line.contains("faster"))
            .filter(|line| !line.starts_with("ratio:"))
            .map(str::to_owned)
            .collect()
    };
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(&dir);
    let mut first = Vec::new();
    let mut second = Vec::new();
    explorer::run(&config, &mut first).unwrap();
    explorer::run(&config, &mut second).unwrap();
    assert_eq!(
        strip_timings(String::from_utf8(first).unwrap()),
        strip_timings(String::from_utf8(second).unwrap()),
    );
}

#[test]
fn reshape_then_flatten_keeps_order() {
    let reshaped = reshape::reshaping_broadcasting(&mut Vec::new()).unwrap();
    assert_eq!(reshaped.dim(), (3, 4));
    let flat = reshape::flatten(&reshaped);
    assert_eq!(flat.to_vec(), (0..12).collect::<Vec<i64>>());
}

#[test]
fn saved_files_match_reshaped_array() {
    let dir = tempfile::tempdir().unwrap();
    let config = small_config(&dir);
    explorer::run(&config, &mut Vec::new()).unwrap();

    let expected = array![[0i64, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11]];
    let npy: Array2<i64> = read_npy(dir.path().join(storage::NPY_FILE)).unwrap();
    assert_eq!(npy, expected);

    let file = File::open(dir.path().join(storage::NPZ_FILE)).unwrap();
    let mut npz = NpzReader::new(file).unwrap();
    assert_eq!(npz.names(), storage::NPZ_NAMES);
    let array3: ArrayD<i64> = npz.by_name("array3").unwrap();
    assert_eq!(array3.shape(), &[2, 2]);
    assert_eq!(array3, array![[7i64, 8], [9, 10]].into_dyn());
}

#[test]
fn invalid_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExplorerConfig {
        perf_size: 0,
        ..small_config(&dir)
    };
    assert!(matches!(
        explorer::run(&config, &mut Vec::new()),
        Err(ExplorerError::Config(_))
    ));
    assert!(!dir.path().join(storage::NPY_FILE).exists());
}
