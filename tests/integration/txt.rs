//! Text table round trips.

use ndarray::{array, Array1, Array2};
use ndarray_explorer::{read_txt, write_txt, ReadTxtError, TxtFormat, TxtOptions};
use std::fs;

#[test]
fn integers_reload_as_floats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_array.txt");
    let arr = array![[0i64, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11]];
    write_txt(&path, &arr, &TxtOptions::default().with_format(TxtFormat::Plain)).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "0 1 2 3\n4 5 6 7\n8 9 10 11\n"
    );
    let read: Array2<f64> = read_txt(&path).unwrap();
    assert_eq!(read, arr.mapv(|x| x as f64));
}

#[test]
fn default_format_is_exact_for_floats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floats.txt");
    let arr = array![[0.1f64, -2.5e-7], [1. / 3., 6.02e23]];
    write_txt(&path, &arr, &TxtOptions::default().with_header("two rows")).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("# two rows\n"));
    let read: Array2<f64> = read_txt(&path).unwrap();
    assert_eq!(read, arr);
}

#[test]
fn one_dimensional_from_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("column.txt");
    fs::write(&path, "1\n2\n\n# comment\n3\n").unwrap();
    let read: Array1<i64> = read_txt(&path).unwrap();
    assert_eq!(read, array![1, 2, 3]);
}

#[test]
fn ragged_rows_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.txt");
    fs::write(&path, "1 2 3\n4 5\n").unwrap();
    match read_txt::<_, Array2<f64>>(&path) {
        Err(ReadTxtError::RaggedRow {
            line,
            expected,
            found,
        }) => {
            assert_eq!((line, expected, found), (2, 3, 2));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
