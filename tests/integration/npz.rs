//! `.npz` archives.

use ndarray::{array, Array1, Array2, ArrayD};
use ndarray_explorer::{NpzReader, NpzWriter, ReadNpzError};
use std::{error::Error, io::Cursor};

#[test]
fn round_trip_npz() -> Result<(), Box<dyn Error>> {
    let mut buf = Vec::<u8>::new();

    let arr1 = array![[1i64, 3, 0], [4, 7, -1]];
    let arr2 = array![[9.5f64, 6.], [-5., 2.], [3., -1.]];

    {
        let mut writer = NpzWriter::new(Cursor::new(&mut buf));
        writer.add_array("arr1", &arr1)?;
        writer.add_array("arr2.npy", &arr2)?;
        writer.finish()?;
    }

    let mut reader = NpzReader::new(Cursor::new(&buf))?;
    assert!(!reader.is_empty());
    assert_eq!(reader.len(), 2);
    assert_eq!(reader.names(), vec!["arr1".to_string(), "arr2".to_string()]);

    let by_name: Array2<i64> = reader.by_name("arr1")?;
    assert_eq!(by_name, arr1);
    let by_name: Array2<i64> = reader.by_name("arr1.npy")?;
    assert_eq!(by_name, arr1);
    let by_name: Array2<f64> = reader.by_name("arr2")?;
    assert_eq!(by_name, arr2);
    let by_index: Array2<f64> = reader.by_index(1)?;
    assert_eq!(by_index, arr2);

    let res: Result<Array2<i64>, _> = reader.by_name("arr1.npy.npy");
    assert!(matches!(res, Err(ReadNpzError::Zip(_))));
    let res: Result<Array1<i64>, _> = reader.by_name("arr1");
    assert!(matches!(res, Err(ReadNpzError::Npy(_))));

    Ok(())
}

#[test]
fn mixed_dimensionality_as_dyn() -> Result<(), Box<dyn Error>> {
    let mut buf = Vec::<u8>::new();
    let arrays = [
        ("array1", array![1i64, 2, 3].into_dyn()),
        ("array2", array![4i64, 5, 6].into_dyn()),
        ("array3", array![[7i64, 8], [9, 10]].into_dyn()),
    ];
    let mut writer = NpzWriter::new(Cursor::new(&mut buf));
    for (name, arr) in &arrays {
        writer.add_array(*name, arr)?;
    }
    writer.finish()?;

    let mut reader = NpzReader::new(Cursor::new(&buf))?;
    for (name, arr) in &arrays {
        let read: ArrayD<i64> = reader.by_name(name)?;
        assert_eq!(read.shape(), arr.shape());
        assert_eq!(&read, arr);
    }
    Ok(())
}

#[cfg(feature = "compressed_npz")]
#[test]
fn compressed_is_smaller() -> Result<(), Box<dyn Error>> {
    let arr = Array2::<f64>::zeros((100, 100));
    let mut stored = Vec::<u8>::new();
    let mut compressed = Vec::<u8>::new();
    {
        let mut writer = NpzWriter::new(Cursor::new(&mut stored));
        writer.add_array("zeros", &arr)?;
        writer.finish()?;
    }
    {
        let mut writer = NpzWriter::new_compressed(Cursor::new(&mut compressed));
        writer.add_array("zeros", &arr)?;
        writer.finish()?;
    }
    assert!(compressed.len() < stored.len());

    let mut reader = NpzReader::new(Cursor::new(&compressed))?;
    let read: Array2<f64> = reader.by_name("zeros")?;
    assert_eq!(read, arr);
    Ok(())
}
