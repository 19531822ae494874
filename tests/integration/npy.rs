//! `.npy` round trips and malformed input.

use ndarray::prelude::*;
use ndarray::Slice;
use ndarray_explorer::header::Header;
use ndarray_explorer::{
    read_npy, write_npy, ReadNpyError, ReadNpyExt, ReadableElement, WritableElement, WriteNpyExt,
};
use py_literal::Value as PyValue;
use std::fmt::Debug;

fn write_to_vec<A, S, D>(array: &ArrayBase<S, D>) -> Vec<u8>
where
    A: WritableElement,
    S: ndarray::Data<Elem = A>,
    D: Dimension,
{
    let mut buf = Vec::new();
    array.write_npy(&mut buf).unwrap();
    buf
}

/// Writes `original` in standard layout, Fortran layout and (for ndim > 2) a
/// permuted layout, checking that each reads back unchanged.
fn round_trip_layouts<A, D>(original: ArrayView<'_, A, D>)
where
    A: Clone + Debug + PartialEq + ReadableElement + WritableElement,
    D: Dimension,
{
    let standard =
        Array::from_shape_vec(original.raw_dim(), original.iter().cloned().collect()).unwrap();
    let read = Array::<A, D>::read_npy(&write_to_vec(&standard)[..]).unwrap();
    assert_eq!(read, original);

    let mut fortran = Array::from_elem(original.raw_dim().f(), original.first().unwrap().clone());
    fortran.assign(&original);
    let bytes = write_to_vec(&fortran);
    let header = Header::from_reader(&bytes[..]).unwrap();
    assert_eq!(header.fortran_order, original.ndim() > 1);
    let read = Array::<A, D>::read_npy(&bytes[..]).unwrap();
    assert_eq!(read, original);

    if original.ndim() > 2 {
        let mut permuted = original.to_owned();
        permuted.swap_axes(0, 2);
        let read = Array::<A, D>::read_npy(&write_to_vec(&permuted)[..]).unwrap();
        assert_eq!(read, permuted);
    }
}

#[test]
fn round_trip_i64() {
    let arr: Array1<i64> = (-12..12).collect();
    let arr = arr.into_shape((2, 3, 4)).unwrap();
    round_trip_layouts(arr.view());
}

#[test]
fn round_trip_f64() {
    let arr = Array2::from_shape_fn((3, 5), |(i, j)| i as f64 * 0.5 - j as f64 * 1e-3);
    round_trip_layouts(arr.view());
}

#[test]
fn round_trip_f32_and_i32() {
    round_trip_layouts(array![[1.5f32, -2.25], [f32::MAX, f32::MIN_POSITIVE]].view());
    round_trip_layouts(array![[[i32::MIN, 0], [1, i32::MAX]]].view());
}

#[test]
fn round_trip_dynamic_dimension() {
    let arr = array![[1i64, 2], [3, 4]].into_dyn();
    let read = ArrayD::<i64>::read_npy(&write_to_vec(&arr)[..]).unwrap();
    assert_eq!(read, arr);
}

#[test]
fn write_discontiguous_in_logical_order() {
    let mut arr = Array2::<i64>::zeros((4, 6));
    for (i, elem) in arr.iter_mut().enumerate() {
        *elem = i as i64;
    }
    arr.slice_axis_inplace(Axis(1), Slice::new(0, None, 2));
    let read = Array2::<i64>::read_npy(&write_to_vec(&arr)[..]).unwrap();
    assert_eq!(read, arr);
    assert!(read.is_standard_layout());
}

#[test]
fn header_and_data_bytes() {
    let arr = array![[1i64, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]];
    let bytes = write_to_vec(&arr);
    assert_eq!(&bytes[..8], b"\x93NUMPY\x01\x00");
    let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    let data_start = 10 + header_len;
    assert_eq!(data_start % 64, 0);
    assert_eq!(bytes[data_start - 1], b'\n');
    let dict = std::str::from_utf8(&bytes[10..data_start]).unwrap();
    assert!(dict.starts_with('{'));
    assert!(dict.contains("'descr': '<i8'"));
    assert!(dict.contains("'fortran_order': False"));
    assert!(dict.contains("'shape': (3, 4)"));

    let data = &bytes[data_start..];
    assert_eq!(data.len(), 12 * 8);
    assert_eq!(&data[..8], &1i64.to_le_bytes());
    assert_eq!(&data[88..], &12i64.to_le_bytes());

    let header = Header::from_reader(&bytes[..]).unwrap();
    assert_eq!(header.type_descriptor, PyValue::String("<i8".into()));
    assert_eq!(header.shape, vec![3, 4]);
}

#[test]
fn read_big_endian_data() {
    let header = Header {
        type_descriptor: PyValue::String(">i4".into()),
        fortran_order: false,
        shape: vec![3],
    };
    let mut bytes = Vec::new();
    header.write(&mut bytes).unwrap();
    for x in [1i32, -2, 300] {
        bytes.extend_from_slice(&x.to_be_bytes());
    }
    let read = Array1::<i32>::read_npy(&bytes[..]).unwrap();
    assert_eq!(read, array![1, -2, 300]);
}

#[test]
fn wrong_ndim() {
    let bytes = write_to_vec(&array![[1i64, 2], [3, 4]]);
    match Array1::<i64>::read_npy(&bytes[..]) {
        Err(ReadNpyError::WrongNdim(Some(1), 2)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn wrong_descriptor() {
    let bytes = write_to_vec(&array![1i64, 2]);
    match Array1::<f64>::read_npy(&bytes[..]) {
        Err(ReadNpyError::WrongDescriptor(PyValue::String(descr))) => assert_eq!(descr, "<i8"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn missing_and_extra_data() {
    let mut bytes = write_to_vec(&array![1i64, 2, 3]);
    bytes.extend_from_slice(&[0; 5]);
    match Array1::<i64>::read_npy(&bytes[..]) {
        Err(ReadNpyError::ExtraBytes(5)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    bytes.truncate(bytes.len() - 5 - 4);
    match Array1::<i64>::read_npy(&bytes[..]) {
        Err(ReadNpyError::MissingData) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_array.npy");
    let arr = array![[0i64, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11]];
    write_npy(&path, &arr).unwrap();
    let read: Array2<i64> = read_npy(&path).unwrap();
    assert_eq!(read, arr);

    match read_npy::<_, Array2<i64>>(dir.path().join("missing.npy")) {
        Err(ReadNpyError::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn many_axes_switch_to_version_two() {
    for ndim in [21_825, 21_850] {
        let arr = ArrayD::<i64>::zeros(IxDyn(&vec![1; ndim]));
        let bytes = write_to_vec(&arr);
        assert_eq!(bytes[6], 2);
        let read = ArrayD::<i64>::read_npy(&bytes[..]).unwrap();
        assert_eq!(read.shape(), arr.shape());
    }
}
