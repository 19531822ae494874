//! Summary statistics in the conventions of NumPy's `mean`, `median`, `std`
//! and `var` (population statistics, `ddof = 0`).

use ndarray::prelude::*;
use ndarray::{Data, RemoveAxis};
use num_traits::{ToPrimitive, Zero};
use std::ops::Add;

/// Whole-array statistics of a numeric array.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary<A> {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub var: f64,
    pub min: A,
    pub max: A,
    pub sum: A,
}

impl<A> Summary<A>
where
    A: Copy + PartialOrd + ToPrimitive + Zero + Add<Output = A>,
{
    /// Computes the statistics, or returns `None` for an empty array or one
    /// whose values cannot be represented as `f64`.
    pub fn of<S, D>(array: &ArrayBase<S, D>) -> Option<Summary<A>>
    where
        S: Data<Elem = A>,
        D: Dimension,
    {
        let first = *array.iter().next()?;
        let values = as_f64(array)?;
        let (min, max) = array.iter().fold((first, first), |(min, max), &x| {
            (
                if x < min { x } else { min },
                if x > max { x } else { max },
            )
        });
        Some(Summary {
            mean: values.mean()?,
            median: median(array)?,
            std: values.std(0.),
            var: values.var(0.),
            min,
            max,
            sum: array.iter().fold(A::zero(), |acc, &x| acc + x),
        })
    }
}

fn as_f64<A, S, D>(array: &ArrayBase<S, D>) -> Option<Array1<f64>>
where
    A: ToPrimitive,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().map(|x| x.to_f64()).collect()
}

/// Returns the median of all elements; the mean of the two middle values when
/// the length is even. Returns `None` for an empty array.
pub fn median<A, S, D>(array: &ArrayBase<S, D>) -> Option<f64>
where
    A: ToPrimitive,
    S: Data<Elem = A>,
    D: Dimension,
{
    let mut values = as_f64(array)?.into_raw_vec();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.)
    } else {
        Some(values[mid])
    }
}

/// Mean of each lane along `axis`, as `f64`.
pub fn mean_axis<A, S, D>(array: &ArrayBase<S, D>, axis: Axis) -> Option<Array<f64, D::Smaller>>
where
    A: ToPrimitive,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    let values = array.map(|x| x.to_f64().unwrap_or(f64::NAN));
    values.mean_axis(axis)
}

/// Largest element of each lane along `axis`, or `None` when the axis is
/// empty.
pub fn max_axis<A, S, D>(array: &ArrayBase<S, D>, axis: Axis) -> Option<Array<A, D::Smaller>>
where
    A: Copy + PartialOrd,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    fold_lanes(array, axis, |acc, x| if x > acc { x } else { acc })
}

/// Smallest element of each lane along `axis`, or `None` when the axis is
/// empty.
pub fn min_axis<A, S, D>(array: &ArrayBase<S, D>, axis: Axis) -> Option<Array<A, D::Smaller>>
where
    A: Copy + PartialOrd,
    S: Data<Elem = A>,
    D: RemoveAxis,
{
    fold_lanes(array, axis, |acc, x| if x < acc { x } else { acc })
}

fn fold_lanes<A, S, D, F>(
    array: &ArrayBase<S, D>,
    axis: Axis,
    pick: F,
) -> Option<Array<A, D::Smaller>>
where
    A: Copy,
    S: Data<Elem = A>,
    D: RemoveAxis,
    F: Fn(A, A) -> A,
{
    if array.len_of(axis) == 0 {
        return None;
    }
    Some(array.map_axis(axis, |lane| {
        lane.iter().skip(1).fold(lane[0], |acc, &x| pick(acc, x))
    }))
}
