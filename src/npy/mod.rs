mod elements;
pub mod header;

use self::header::{Header, ParseHeaderError, ReadHeaderError, WriteHeaderError};
use ndarray::prelude::*;
use ndarray::{Data, DataOwned, IntoDimension, ShapeBuilder, ShapeError};
use py_literal::{FormatError as PyValueFormatError, Value as PyValue};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// An array element type that can be written to an `.npy` or `.npz` file.
///
/// Elements are always written little-endian, so the files are identical on
/// every platform.
pub trait WritableElement: Sized {
    /// Returns the `descr` entry of the header, e.g. `'<i8'`.
    fn type_descriptor() -> PyValue;

    /// Writes a single element.
    fn write<W: io::Write>(&self, writer: W) -> io::Result<()>;

    /// Writes a contiguous slice of elements.
    fn write_slice<W: io::Write>(slice: &[Self], writer: W) -> io::Result<()>;
}

/// An array element type that can be read from an `.npy` or `.npz` file.
pub trait ReadableElement: Sized {
    /// Reads exactly `len` elements with descriptor `type_desc` and checks
    /// that the reader is exhausted afterwards.
    fn read_to_end_exact_vec<R: io::Read>(
        reader: R,
        type_desc: &PyValue,
        len: usize,
    ) -> Result<Vec<Self>, ReadDataError>;
}

/// An error reading the data section of an `.npy` file.
#[derive(Debug)]
pub enum ReadDataError {
    /// An error caused by I/O.
    Io(io::Error),
    /// The type descriptor does not match the element type.
    WrongDescriptor(PyValue),
    /// The file does not contain all the data described in the header.
    MissingData,
    /// Extra bytes are present after the data described in the header.
    ExtraBytes(usize),
}

impl Error for ReadDataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadDataError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ReadDataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadDataError::Io(err) => write!(f, "I/O error: {}", err),
            ReadDataError::WrongDescriptor(desc) => {
                write!(f, "incorrect descriptor ({}) for this type", desc)
            }
            ReadDataError::MissingData => write!(f, "reached EOF before reading all data"),
            ReadDataError::ExtraBytes(num) => write!(f, "file had {} extra bytes before EOF", num),
        }
    }
}

impl From<io::Error> for ReadDataError {
    fn from(err: io::Error) -> ReadDataError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ReadDataError::MissingData
        } else {
            ReadDataError::Io(err)
        }
    }
}

/// An error writing a `.npy` file.
#[derive(Debug)]
pub enum WriteNpyError {
    /// An error caused by I/O.
    Io(io::Error),
    /// An error formatting the header.
    FormatHeader(PyValueFormatError),
    /// The header is too long for any `.npy` format version.
    HeaderTooLong(usize),
}

impl Error for WriteNpyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteNpyError::Io(err) => Some(err),
            WriteNpyError::FormatHeader(err) => Some(err),
            WriteNpyError::HeaderTooLong(_) => None,
        }
    }
}

impl fmt::Display for WriteNpyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteNpyError::Io(err) => write!(f, "I/O error: {}", err),
            WriteNpyError::FormatHeader(err) => write!(f, "error formatting header: {}", err),
            WriteNpyError::HeaderTooLong(len) => {
                write!(f, "header dictionary of {} bytes is too long", len)
            }
        }
    }
}

impl From<io::Error> for WriteNpyError {
    fn from(err: io::Error) -> WriteNpyError {
        WriteNpyError::Io(err)
    }
}

impl From<WriteHeaderError> for WriteNpyError {
    fn from(err: WriteHeaderError) -> WriteNpyError {
        match err {
            WriteHeaderError::Io(err) => WriteNpyError::Io(err),
            WriteHeaderError::Format(err) => WriteNpyError::FormatHeader(err),
            WriteHeaderError::TooLong(len) => WriteNpyError::HeaderTooLong(len),
        }
    }
}

/// Extension trait for writing `ArrayBase` to `.npy` files.
///
/// # Example
///
/// ```no_run
/// use ndarray::array;
/// use ndarray_explorer::WriteNpyExt;
/// use std::fs::File;
/// use std::io::BufWriter;
///
/// let arr = array![[1i64, 2, 3], [4, 5, 6]];
/// let writer = BufWriter::new(File::create("array.npy")?);
/// arr.write_npy(writer)?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub trait WriteNpyExt {
    /// Writes the array to `writer` in [`.npy`
    /// format](https://numpy.org/doc/stable/reference/generated/numpy.lib.format.html).
    ///
    /// Arrays in standard layout are written in C order and arrays in Fortran
    /// layout in Fortran order, both straight from memory. Any other layout is
    /// written element by element in logical (C) order.
    fn write_npy<W: io::Write>(&self, writer: W) -> Result<(), WriteNpyError>;
}

impl<A, S, D> WriteNpyExt for ArrayBase<S, D>
where
    A: WritableElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn write_npy<W: io::Write>(&self, mut writer: W) -> Result<(), WriteNpyError> {
        let contiguous = if self.is_standard_layout() {
            Some(false)
        } else if self.view().reversed_axes().is_standard_layout() {
            Some(true)
        } else {
            None
        };
        let header = Header {
            type_descriptor: A::type_descriptor(),
            fortran_order: contiguous.unwrap_or(false),
            shape: self.shape().to_vec(),
        };
        header.write(&mut writer)?;
        match (contiguous, self.as_slice_memory_order()) {
            (Some(_), Some(slice)) => A::write_slice(slice, &mut writer)?,
            _ => {
                for elem in self.iter() {
                    elem.write(&mut writer)?;
                }
            }
        }
        Ok(())
    }
}

/// An error reading a `.npy` file.
#[derive(Debug)]
pub enum ReadNpyError {
    /// An error caused by I/O.
    Io(io::Error),
    /// An error parsing the file header.
    ParseHeader(ParseHeaderError),
    /// Overflow while computing the length of the array from the shape
    /// described in the file header.
    LengthOverflow,
    /// The array in the file has a different number of dimensions than the
    /// requested array type. The fields are the requested and the actual
    /// number of dimensions.
    WrongNdim(Option<usize>, usize),
    /// The type descriptor does not match the element type.
    WrongDescriptor(PyValue),
    /// The file does not contain all the data described in the header.
    MissingData,
    /// Extra bytes are present after the data described in the header.
    ExtraBytes(usize),
    /// The data could not be arranged in the described shape.
    Shape(ShapeError),
}

impl Error for ReadNpyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadNpyError::Io(err) => Some(err),
            ReadNpyError::ParseHeader(err) => Some(err),
            ReadNpyError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ReadNpyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadNpyError::Io(err) => write!(f, "I/O error: {}", err),
            ReadNpyError::ParseHeader(err) => write!(f, "error parsing header: {}", err),
            ReadNpyError::LengthOverflow => write!(f, "overflow computing length from shape"),
            ReadNpyError::WrongNdim(expected, actual) => write!(
                f,
                "ndim {} of array did not match Dimension type with NDIM = {:?}",
                actual, expected
            ),
            ReadNpyError::WrongDescriptor(desc) => {
                write!(f, "incorrect descriptor ({}) for this type", desc)
            }
            ReadNpyError::MissingData => write!(f, "reached EOF before reading all data"),
            ReadNpyError::ExtraBytes(num) => write!(f, "file had {} extra bytes before EOF", num),
            ReadNpyError::Shape(err) => write!(f, "data did not match shape in header: {}", err),
        }
    }
}

impl From<io::Error> for ReadNpyError {
    fn from(err: io::Error) -> ReadNpyError {
        ReadNpyError::Io(err)
    }
}

impl From<ReadHeaderError> for ReadNpyError {
    fn from(err: ReadHeaderError) -> ReadNpyError {
        match err {
            ReadHeaderError::Io(err) => ReadNpyError::Io(err),
            ReadHeaderError::Parse(err) => ReadNpyError::ParseHeader(err),
        }
    }
}

impl From<ReadDataError> for ReadNpyError {
    fn from(err: ReadDataError) -> ReadNpyError {
        match err {
            ReadDataError::Io(err) => ReadNpyError::Io(err),
            ReadDataError::WrongDescriptor(desc) => ReadNpyError::WrongDescriptor(desc),
            ReadDataError::MissingData => ReadNpyError::MissingData,
            ReadDataError::ExtraBytes(num) => ReadNpyError::ExtraBytes(num),
        }
    }
}

impl From<ShapeError> for ReadNpyError {
    fn from(err: ShapeError) -> ReadNpyError {
        ReadNpyError::Shape(err)
    }
}

/// Extension trait for reading `Array` from `.npy` files.
///
/// # Example
///
/// ```no_run
/// use ndarray::Array2;
/// use ndarray_explorer::ReadNpyExt;
/// use std::fs::File;
///
/// let reader = File::open("array.npy")?;
/// let arr = Array2::<i64>::read_npy(reader)?;
/// # println!("arr = {}", arr);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub trait ReadNpyExt: Sized {
    /// Reads the array from `reader` in [`.npy`
    /// format](https://numpy.org/doc/stable/reference/generated/numpy.lib.format.html).
    fn read_npy<R: io::Read>(reader: R) -> Result<Self, ReadNpyError>;
}

impl<A, S, D> ReadNpyExt for ArrayBase<S, D>
where
    A: ReadableElement,
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    fn read_npy<R: io::Read>(mut reader: R) -> Result<Self, ReadNpyError> {
        let Header {
            type_descriptor,
            fortran_order,
            shape,
        } = Header::from_reader(&mut reader)?;
        if let Some(ndim) = D::NDIM {
            if ndim != shape.len() {
                return Err(ReadNpyError::WrongNdim(D::NDIM, shape.len()));
            }
        }
        let len = shape
            .iter()
            .try_fold(1usize, |acc, &axis_len| acc.checked_mul(axis_len))
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(ReadNpyError::LengthOverflow)?;
        let data = A::read_to_end_exact_vec(&mut reader, &type_descriptor, len)?;
        let shape = shape.into_dimension().set_f(fortran_order);
        Ok(ArrayBase::<S, IxDyn>::from_shape_vec(shape, data)?.into_dimensionality()?)
    }
}

/// Writes an array to a new `.npy` file at `path`, replacing any existing
/// file.
///
/// ```no_run
/// use ndarray::array;
/// use ndarray_explorer::write_npy;
///
/// write_npy("array.npy", &array![[1i64, 2], [3, 4]])?;
/// # Ok::<_, ndarray_explorer::WriteNpyError>(())
/// ```
pub fn write_npy<P, T>(path: P, array: &T) -> Result<(), WriteNpyError>
where
    P: AsRef<Path>,
    T: WriteNpyExt + ?Sized,
{
    let mut writer = BufWriter::new(File::create(path)?);
    array.write_npy(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads an array from the `.npy` file at `path`.
///
/// ```no_run
/// use ndarray::Array2;
/// use ndarray_explorer::read_npy;
///
/// let arr: Array2<i64> = read_npy("array.npy")?;
/// # Ok::<_, ndarray_explorer::ReadNpyError>(())
/// ```
pub fn read_npy<P, T>(path: P) -> Result<T, ReadNpyError>
where
    P: AsRef<Path>,
    T: ReadNpyExt,
{
    T::read_npy(BufReader::new(File::open(path)?))
}
