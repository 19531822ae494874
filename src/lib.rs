//! A guided tour of [`ndarray`]: array creation, indexing, slicing,
//! arithmetic, statistics, reshaping, broadcasting, persistence, and a timing
//! comparison against plain `Vec` code.
//!
//! [`ndarray`]: https://github.com/rust-ndarray/ndarray
//!
//! The persistence layer reads and writes the NumPy file formats, so the
//! files it produces load directly with `numpy.load` and `numpy.loadtxt`:
//!
//! * [`.npy`] single arrays, see [`ReadNpyExt`] and [`WriteNpyExt`].
//! * [`.npz`] archives of named arrays, see [`NpzReader`] and [`NpzWriter`]
//!   (requires the `npz` feature).
//! * whitespace-delimited text tables, see [`ReadTxtExt`] and [`WriteTxtExt`].
//!
//! [`.npy`]: https://numpy.org/doc/stable/reference/generated/numpy.lib.format.html
//! [`.npz`]: https://numpy.org/doc/stable/reference/generated/numpy.savez.html
//!
//! The tour itself lives in [`demo`] and is driven by [`explorer::run`]; both
//! require the `npz` feature.
//!
//! # Limitations
//!
//! * `WritableElement` and `ReadableElement` are implemented only for `i32`,
//!   `i64`, `f32` and `f64`.
//!
//! * Arrays are always written little-endian.

mod config;
#[cfg(feature = "npz")]
pub mod demo;
mod error;
#[cfg(feature = "npz")]
pub mod explorer;
mod npy;
#[cfg(feature = "npz")]
mod npz;
pub mod stats;
mod txt;

pub use crate::config::{ExplorerConfig, DEFAULT_PERF_SIZE};
pub use crate::error::ExplorerError;
pub use crate::npy::header;
pub use crate::npy::{
    read_npy, write_npy, ReadDataError, ReadNpyError, ReadNpyExt, ReadableElement,
    WritableElement, WriteNpyError, WriteNpyExt,
};
#[cfg(feature = "npz")]
pub use crate::npz::{NpzReader, NpzWriter, ReadNpzError, WriteNpzError};
pub use crate::txt::{
    read_txt, write_txt, ReadTxtError, ReadTxtExt, TxtFormat, TxtOptions, WriteTxtError,
    WriteTxtExt,
};
