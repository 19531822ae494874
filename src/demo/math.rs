//! Element-wise arithmetic, whole-array statistics and axis reductions.

use super::{labelled, section_title, subheading};
use crate::stats::{self, Summary};
use crate::ExplorerError;
use ndarray::{array, Array2, Axis};
use rand::Rng;
use std::io::Write;

/// Shape of the random data table.
pub const DATA_SHAPE: (usize, usize) = (5, 4);

/// Random data values are drawn from this half-open range.
pub const DATA_RANGE: std::ops::Range<i64> = 1..100;

/// Draws the random integer data table used for the statistics.
pub fn random_data<R: Rng>(rng: &mut R) -> Array2<i64> {
    Array2::from_shape_fn(DATA_SHAPE, |_| rng.gen_range(DATA_RANGE))
}

/// Prints scalar and element-wise operations on `matrix`, then statistics of
/// a random 5x4 table. Returns the table.
pub fn mathematical_operations<W, R>(
    out: &mut W,
    matrix: &Array2<i64>,
    rng: &mut R,
) -> Result<Array2<i64>, ExplorerError>
where
    W: Write,
    R: Rng,
{
    log::info!("running mathematical operations section");
    section_title(out, "2. MATHEMATICAL & STATISTICAL OPERATIONS")?;
    labelled(out, "Original Array", matrix)?;

    subheading(out, "BASIC MATH OPERATIONS")?;
    labelled(out, "Array + 10", matrix + 10)?;
    labelled(out, "Array * 2", matrix * 2)?;
    labelled(out, "Array squared", matrix.mapv(|x| x.pow(2)))?;
    let roots = matrix.mapv(|x| (x as f64).sqrt());
    labelled(out, "Square root of array", format!("{:.8}", roots))?;

    let second = array![[1i64, 1, 1], [2, 2, 2], [3, 3, 3]];
    labelled(out, "Second Array", &second)?;
    labelled(out, "Array1 + Array2", matrix + &second)?;
    labelled(out, "Array1 * Array2", matrix * &second)?;

    subheading(out, "STATISTICAL OPERATIONS")?;
    let data = random_data(rng);
    labelled(out, "Random Data (5x4)", &data)?;
    let summary = Summary::of(&data).ok_or(ExplorerError::EmptyArray)?;
    writeln!(out, "\nMean: {:.2}", summary.mean)?;
    writeln!(out, "Median: {:.2}", summary.median)?;
    writeln!(out, "Standard Deviation: {:.2}", summary.std)?;
    writeln!(out, "Variance: {:.2}", summary.var)?;
    writeln!(out, "Min: {}", summary.min)?;
    writeln!(out, "Max: {}", summary.max)?;
    writeln!(out, "Sum: {}", summary.sum)?;

    subheading(out, "AXIS-WISE OPERATIONS")?;
    let mean_columns = stats::mean_axis(&data, Axis(0)).ok_or(ExplorerError::EmptyArray)?;
    let mean_rows = stats::mean_axis(&data, Axis(1)).ok_or(ExplorerError::EmptyArray)?;
    writeln!(out, "\nMean along axis 0 (columns): {:.2}", mean_columns)?;
    writeln!(out, "Mean along axis 1 (rows): {:.2}", mean_rows)?;
    writeln!(out, "\nSum along axis 0 (columns): {}", data.sum_axis(Axis(0)))?;
    writeln!(out, "Sum along axis 1 (rows): {}", data.sum_axis(Axis(1)))?;
    let max_columns = stats::max_axis(&data, Axis(0)).ok_or(ExplorerError::EmptyArray)?;
    let min_rows = stats::min_axis(&data, Axis(1)).ok_or(ExplorerError::EmptyArray)?;
    writeln!(out, "\nMax along axis 0 (columns): {}", max_columns)?;
    writeln!(out, "Min along axis 1 (rows): {}", min_rows)?;

    Ok(data)
}
