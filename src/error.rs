use crate::{ReadNpyError, ReadTxtError, WriteNpyError, WriteTxtError};
#[cfg(feature = "npz")]
use crate::{ReadNpzError, WriteNpzError};
use ndarray::ShapeError;
use std::error::Error;
use std::fmt;
use std::io;

/// An error running one of the explorer sections.
#[derive(Debug)]
pub enum ExplorerError {
    /// An error writing the demonstration output or creating a directory.
    Io(io::Error),
    /// A reshape to an incompatible shape.
    Shape(ShapeError),
    /// An operand that cannot be broadcast to the other operand's shape.
    Broadcast { from: Vec<usize>, to: Vec<usize> },
    /// A statistic was requested for an array without elements.
    EmptyArray,
    /// An invalid configuration value.
    Config(String),
    WriteNpy(WriteNpyError),
    ReadNpy(ReadNpyError),
    #[cfg(feature = "npz")]
    WriteNpz(WriteNpzError),
    #[cfg(feature = "npz")]
    ReadNpz(ReadNpzError),
    WriteTxt(WriteTxtError),
    ReadTxt(ReadTxtError),
}

impl Error for ExplorerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExplorerError::Io(err) => Some(err),
            ExplorerError::Shape(err) => Some(err),
            ExplorerError::Broadcast { .. } | ExplorerError::EmptyArray => None,
            ExplorerError::Config(_) => None,
            ExplorerError::WriteNpy(err) => Some(err),
            ExplorerError::ReadNpy(err) => Some(err),
            #[cfg(feature = "npz")]
            ExplorerError::WriteNpz(err) => Some(err),
            #[cfg(feature = "npz")]
            ExplorerError::ReadNpz(err) => Some(err),
            ExplorerError::WriteTxt(err) => Some(err),
            ExplorerError::ReadTxt(err) => Some(err),
        }
    }
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExplorerError::Io(err) => write!(f, "I/O error: {}", err),
            ExplorerError::Shape(err) => write!(f, "shape error: {}", err),
            ExplorerError::Broadcast { from, to } => {
                write!(f, "cannot broadcast shape {:?} to {:?}", from, to)
            }
            ExplorerError::EmptyArray => write!(f, "statistic of an empty array"),
            ExplorerError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            ExplorerError::WriteNpy(err) => write!(f, "error writing npy file: {}", err),
            ExplorerError::ReadNpy(err) => write!(f, "error reading npy file: {}", err),
            #[cfg(feature = "npz")]
            ExplorerError::WriteNpz(err) => write!(f, "error writing npz file: {}", err),
            #[cfg(feature = "npz")]
            ExplorerError::ReadNpz(err) => write!(f, "error reading npz file: {}", err),
            ExplorerError::WriteTxt(err) => write!(f, "error writing text file: {}", err),
            ExplorerError::ReadTxt(err) => write!(f, "error reading text file: {}", err),
        }
    }
}

macro_rules! impl_from_error {
    ($from:ty, $variant:ident) => {
        impl From<$from> for ExplorerError {
            fn from(err: $from) -> ExplorerError {
                ExplorerError::$variant(err)
            }
        }
    };
}

impl_from_error!(io::Error, Io);
impl_from_error!(ShapeError, Shape);
impl_from_error!(WriteNpyError, WriteNpy);
impl_from_error!(ReadNpyError, ReadNpy);
#[cfg(feature = "npz")]
impl_from_error!(WriteNpzError, WriteNpz);
#[cfg(feature = "npz")]
impl_from_error!(ReadNpzError, ReadNpz);
impl_from_error!(WriteTxtError, WriteTxt);
impl_from_error!(ReadTxtError, ReadTxt);
