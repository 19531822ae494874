//! Reshaping, flattening, transposition and broadcasting.

use super::{labelled, section_title, subheading};
use crate::ExplorerError;
use ndarray::prelude::*;
use ndarray::Data;
use std::io::Write;
use std::ops::Add;

/// Copies the elements of `array` in logical (row-major) order into a new
/// 1-D array, whatever its memory layout.
pub fn flatten<A, S, D>(array: &ArrayBase<S, D>) -> Array1<A>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().cloned().collect()
}

/// Adds `rhs` to `lhs` after broadcasting `rhs` to the shape of `lhs`.
///
/// Unlike the `+` operator, which panics on incompatible shapes, this
/// returns [`ExplorerError::Broadcast`].
pub fn broadcast_add<A, S, S2, E>(
    lhs: &ArrayBase<S, Ix2>,
    rhs: &ArrayBase<S2, E>,
) -> Result<Array2<A>, ExplorerError>
where
    A: Clone + Add<Output = A>,
    S: Data<Elem = A>,
    S2: Data<Elem = A>,
    E: Dimension,
{
    let rhs = rhs
        .broadcast(lhs.raw_dim())
        .ok_or_else(|| ExplorerError::Broadcast {
            from: rhs.shape().to_vec(),
            to: lhs.shape().to_vec(),
        })?;
    Ok(lhs + &rhs)
}

/// Prints `0..12` in several shapes and broadcasts a row vector, a column
/// vector and a scalar against a 3x3 matrix. Returns the 3x4 reshape.
pub fn reshaping_broadcasting<W: Write>(out: &mut W) -> Result<Array2<i64>, ExplorerError> {
    log::info!("running reshaping and broadcasting section");
    section_title(out, "3. RESHAPING & BROADCASTING")?;

    subheading(out, "RESHAPING")?;
    let arr: Array1<i64> = (0..12).collect();
    labelled(out, "Original 1D Array (12 elements)", &arr)?;
    let reshaped_3x4 = arr.clone().into_shape((3, 4))?;
    labelled(out, "Reshaped to 3x4", &reshaped_3x4)?;
    let reshaped_2x6 = arr.clone().into_shape((2, 6))?;
    labelled(out, "Reshaped to 2x6", &reshaped_2x6)?;
    let reshaped_3d = arr.into_shape((2, 2, 3))?;
    labelled(out, "Reshaped to 3D (2x2x3)", &reshaped_3d)?;
    labelled(out, "Flattened back to 1D", flatten(&reshaped_3x4))?;
    labelled(out, "Transpose of 3x4 array", reshaped_3x4.t())?;

    subheading(out, "BROADCASTING")?;
    let matrix = array![[1i64, 2, 3], [4, 5, 6], [7, 8, 9]];
    let row = array![10i64, 20, 30];
    let column = array![[1i64], [2], [3]];
    labelled(out, "Matrix (3x3)", &matrix)?;
    labelled(out, "Vector (1x3)", &row)?;
    labelled(out, "Matrix + Vector (broadcasting)", broadcast_add(&matrix, &row)?)?;
    labelled(out, "Column Vector (3x1)", &column)?;
    let plus_column = broadcast_add(&matrix, &column)?;
    labelled(out, "Matrix + Column Vector (broadcasting)", plus_column)?;
    labelled(out, "Matrix * 5 (scalar broadcasting)", &matrix * 5)?;

    Ok(reshaped_3x4)
}
