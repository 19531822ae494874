//! Array creation, indexing and slicing.

use super::{labelled, section_title, subheading};
use crate::ExplorerError;
use ndarray::{array, s, Array1, Array2};
use rand::Rng;
use std::io::Write;

/// Prints literal, constant, random, ranged and spaced arrays, then indexes
/// and slices a sample matrix.
///
/// Returns the 3x3 integer matrix `[[1, 2, 3], [4, 5, 6], [7, 8, 9]]` and a
/// 3x3 matrix of uniform samples from `[0, 1)`.
pub fn array_creation<W, R>(
    out: &mut W,
    rng: &mut R,
) -> Result<(Array2<i64>, Array2<f64>), ExplorerError>
where
    W: Write,
    R: Rng,
{
    log::info!("running array creation section");
    section_title(out, "1. ARRAY CREATION, INDEXING & SLICING")?;

    let arr_1d = array![1i64, 2, 3, 4, 5];
    labelled(out, "1D Array", &arr_1d)?;
    let arr_2d = array![[1i64, 2, 3], [4, 5, 6], [7, 8, 9]];
    labelled(out, "2D Array", &arr_2d)?;
    let arr_3d = array![[[1i64, 2], [3, 4]], [[5, 6], [7, 8]]];
    labelled(out, "3D Array", &arr_3d)?;

    let zeros = Array2::<f64>::zeros((3, 3));
    let ones = Array2::<f64>::ones((2, 4));
    let identity = Array2::<f64>::eye(3);
    let random = Array2::from_shape_fn((3, 3), |_| rng.gen::<f64>());
    let range: Array1<i64> = (0..10).step_by(2).collect();
    let linspace = Array1::linspace(0., 1., 5);

    labelled(out, "Zeros Array (3x3)", format!("{:.1}", zeros))?;
    labelled(out, "Ones Array (2x4)", format!("{:.1}", ones))?;
    labelled(out, "Identity Matrix (3x3)", format!("{:.1}", identity))?;
    labelled(out, "Random Array (3x3)", format!("{:.8}", random))?;
    labelled(out, "Range Array (0 to 10, step 2)", &range)?;
    labelled(out, "Linspace Array (5 values from 0 to 1)", format!("{:.2}", linspace))?;

    subheading(out, "INDEXING EXAMPLES")?;
    let sample = array![[10i64, 20, 30], [40, 50, 60], [70, 80, 90]];
    labelled(out, "Sample Array", &sample)?;
    writeln!(out, "\nElement at [0, 0]: {}", sample[[0, 0]])?;
    writeln!(out, "Element at [1, 2]: {}", sample[[1, 2]])?;
    writeln!(out, "Element at [2, 1]: {}", sample[[2, 1]])?;

    subheading(out, "SLICING EXAMPLES")?;
    writeln!(out, "\nFirst row: {}", sample.row(0))?;
    writeln!(out, "Last column: {}", sample.slice(s![.., -1]))?;
    writeln!(out, "First 2 rows, first 2 columns:\n{}", sample.slice(s![..2, ..2]))?;
    writeln!(out, "Every other element in 1D: {}", arr_1d.slice(s![..;2]))?;

    Ok((arr_2d, random))
}
