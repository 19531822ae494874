//! Wall-clock comparison of `Vec` code against the equivalent `ndarray` code.

use super::{group_digits, section_title};
use crate::ExplorerError;
use ndarray::Array1;
use std::hint::black_box;
use std::io::{self, Write};
use std::mem;
use std::time::{Duration, Instant};

/// Timings of one operation done both ways.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    pub label: &'static str,
    pub native: Duration,
    pub ndarray: Duration,
}

impl Timing {
    /// How many times faster the `ndarray` version ran, or `None` if it
    /// finished below the clock resolution.
    pub fn speedup(&self) -> Option<f64> {
        let ndarray = self.ndarray.as_secs_f64();
        if ndarray > 0. {
            Some(self.native.as_secs_f64() / ndarray)
        } else {
            None
        }
    }
}

/// Bytes held by the `Vec` (header plus allocated capacity) and by the array
/// data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryUsage {
    pub native_bytes: usize,
    pub ndarray_bytes: usize,
}

impl MemoryUsage {
    pub fn ratio(&self) -> Option<f64> {
        if self.ndarray_bytes > 0 {
            Some(self.native_bytes as f64 / self.ndarray_bytes as f64)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerfReport {
    pub size: usize,
    pub timings: Vec<Timing>,
    pub memory: MemoryUsage,
}

fn time<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let value = black_box(f());
    (value, start.elapsed())
}

/// Runs creation, sum and doubling of `0..size` as `i64`s with a `Vec` and
/// with an [`Array1`], then measures the memory both hold.
pub fn measure(size: usize) -> PerfReport {
    let (list, native) = time(|| (0..size as i64).collect::<Vec<i64>>());
    let (array, ndarray) = time(|| Array1::from_shape_fn(size, |i| i as i64));
    let creation = Timing {
        label: "Creation",
        native,
        ndarray,
    };

    let (list_sum, native) = time(|| black_box(&list).iter().sum::<i64>());
    let (array_sum, ndarray) = time(|| black_box(&array).sum());
    debug_assert_eq!(list_sum, array_sum);
    let sum = Timing {
        label: "Sum",
        native,
        ndarray,
    };

    let (_, native) = time(|| {
        black_box(&list)
            .iter()
            .map(|x| x * 2)
            .collect::<Vec<i64>>()
    });
    let (_, ndarray) = time(|| black_box(&array) * 2);
    let multiplication = Timing {
        label: "Multiplication",
        native,
        ndarray,
    };

    let memory = MemoryUsage {
        native_bytes: mem::size_of::<Vec<i64>>() + list.capacity() * mem::size_of::<i64>(),
        ndarray_bytes: array.len() * mem::size_of::<i64>(),
    };
    log::debug!(
        "timings for {} elements: {:?} {:?} {:?}",
        size,
        creation,
        sum,
        multiplication
    );

    PerfReport {
        size,
        timings: vec![creation, sum, multiplication],
        memory,
    }
}

fn write_ratio<W: Write>(out: &mut W, ratio: Option<f64>, what: &str) -> io::Result<()> {
    match ratio {
        Some(ratio) => writeln!(out, "ndarray is {:.2}x {}", ratio, what),
        None => writeln!(out, "ratio: n/a (below timer resolution)"),
    }
}

/// Prints the results of [`measure`] for `size` elements.
pub fn performance_comparison<W: Write>(
    out: &mut W,
    size: usize,
) -> Result<PerfReport, ExplorerError> {
    log::info!("running performance comparison with {} elements", size);
    section_title(out, "5. PERFORMANCE COMPARISON: NDARRAY VS VEC")?;
    writeln!(out, "\nTesting with {} elements...", group_digits(size))?;

    let report = measure(size);
    for (i, timing) in report.timings.iter().enumerate() {
        writeln!(out, "\n--- Test {}: {} ---", i + 1, timing.label)?;
        let name = timing.label.to_lowercase();
        let native = timing.native.as_secs_f64();
        let ndarray = timing.ndarray.as_secs_f64();
        writeln!(out, "Vec {}: {:.6} seconds", name, native)?;
        writeln!(out, "Array {}: {:.6} seconds", name, ndarray)?;
        write_ratio(out, timing.speedup(), "faster")?;
    }

    writeln!(out, "\n--- Test {}: Memory Usage ---", report.timings.len() + 1)?;
    writeln!(out, "Vec memory: {} bytes", group_digits(report.memory.native_bytes))?;
    writeln!(out, "Array memory: {} bytes", group_digits(report.memory.ndarray_bytes))?;
    write_ratio(out, report.memory.ratio(), "smaller")?;

    Ok(report)
}
