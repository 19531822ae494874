//! Saving and loading arrays as `.npy`, `.npz` and text files.

use super::{labelled, section_title};
use crate::{
    read_npy, read_txt, write_npy, write_txt, ExplorerConfig, ExplorerError, NpzReader,
    NpzWriter, TxtFormat, TxtOptions,
};
use ndarray::{array, Array2, ArrayD};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

pub const NPY_FILE: &str = "sample_array.npy";
pub const NPZ_FILE: &str = "multiple_arrays.npz";
pub const TXT_FILE: &str = "sample_array.txt";

/// Names of the arrays stored in the `.npz` archive, in archive order.
pub const NPZ_NAMES: [&str; 3] = ["array1", "array2", "array3"];

/// Everything read back by [`save_load`].
#[derive(Clone, Debug, PartialEq)]
pub struct StorageReport {
    /// The array read back from the `.npy` file.
    pub npy: Array2<i64>,
    /// The named arrays read back from the `.npz` archive.
    pub npz: Vec<(String, ArrayD<i64>)>,
    /// The array read back from the text file.
    pub txt: Array2<f64>,
    /// Paths of the files written, in the order they were written.
    pub files: Vec<PathBuf>,
}

fn npz_writer(file: File, compress: bool) -> Result<NpzWriter<BufWriter<File>>, ExplorerError> {
    let writer = BufWriter::new(file);
    if compress {
        #[cfg(feature = "compressed_npz")]
        return Ok(NpzWriter::new_compressed(writer));
        #[cfg(not(feature = "compressed_npz"))]
        return Err(ExplorerError::Config(
            "compression requires the `compressed_npz` feature".to_owned(),
        ));
    }
    Ok(NpzWriter::new(writer))
}

/// Writes `array` to `.npy` and text files and three sample arrays to an
/// `.npz` archive in the configured output directory, reading each file back
/// right after writing it.
pub fn save_load<W: Write>(
    out: &mut W,
    array: &Array2<i64>,
    config: &ExplorerConfig,
) -> Result<StorageReport, ExplorerError> {
    log::info!("running save/load section");
    section_title(out, "4. SAVE/LOAD OPERATIONS")?;
    fs::create_dir_all(&config.output_dir)?;

    let npy_path = config.output_path(NPY_FILE);
    writeln!(out, "\nSaving array to '{}'...", npy_path.display())?;
    write_npy(&npy_path, array)?;
    log::debug!("wrote {}", npy_path.display());
    writeln!(out, "Array saved successfully!")?;
    writeln!(out, "\nLoading array from '{}'...", npy_path.display())?;
    let npy: Array2<i64> = read_npy(&npy_path)?;
    labelled(out, "Loaded Array", &npy)?;

    let npz_path = config.output_path(NPZ_FILE);
    let arrays: [ArrayD<i64>; 3] = [
        array![1i64, 2, 3].into_dyn(),
        array![4i64, 5, 6].into_dyn(),
        array![[7i64, 8], [9, 10]].into_dyn(),
    ];
    writeln!(out, "\nSaving multiple arrays to '{}'...", npz_path.display())?;
    let mut npz = npz_writer(File::create(&npz_path)?, config.compress)?;
    for (name, arr) in NPZ_NAMES.iter().zip(&arrays) {
        npz.add_array(*name, arr)?;
    }
    npz.finish()?;
    log::debug!("wrote {} (compressed: {})", npz_path.display(), config.compress);
    writeln!(out, "Multiple arrays saved successfully!")?;

    writeln!(out, "\nLoading multiple arrays from '{}'...", npz_path.display())?;
    let mut reader = NpzReader::new(BufReader::new(File::open(&npz_path)?))?;
    let mut loaded = Vec::with_capacity(NPZ_NAMES.len());
    for (i, name) in NPZ_NAMES.iter().enumerate() {
        let arr: ArrayD<i64> = reader.by_name(name)?;
        if arr.ndim() > 1 {
            writeln!(out, "Array {}:\n{}", i + 1, arr)?;
        } else {
            writeln!(out, "Array {}: {}", i + 1, arr)?;
        }
        loaded.push((name.to_string(), arr));
    }

    let txt_path = config.output_path(TXT_FILE);
    writeln!(out, "\nSaving array to '{}'...", txt_path.display())?;
    let options = TxtOptions::default().with_format(TxtFormat::Plain);
    write_txt(&txt_path, array, &options)?;
    log::debug!("wrote {}", txt_path.display());
    writeln!(out, "Array saved to text file!")?;
    writeln!(out, "\nLoading array from '{}'...", txt_path.display())?;
    let txt: Array2<f64> = read_txt(&txt_path)?;
    labelled(out, "Loaded Array from text", format!("{:.1}", txt))?;

    Ok(StorageReport {
        npy,
        npz: loaded,
        txt,
        files: vec![npy_path, npz_path, txt_path],
    })
}
