//! `.npz` archives: a zip file holding one `.npy` member per named array, as
//! written by `numpy.savez` and `numpy.savez_compressed`.

use crate::{
    ReadNpyError, ReadNpyExt, ReadableElement, WritableElement, WriteNpyError, WriteNpyExt,
};
use ndarray::prelude::*;
use ndarray::{Data, DataOwned};
use std::error::Error;
use std::fmt;
use std::io::{Read, Seek, Write};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const NPY_SUFFIX: &str = ".npy";

/// Archive member holding the array called `name`.
fn member_name(name: String) -> String {
    if name.ends_with(NPY_SUFFIX) {
        name
    } else {
        name + NPY_SUFFIX
    }
}

/// Array name stored in the archive member `member`.
fn array_name(member: &str) -> &str {
    member.strip_suffix(NPY_SUFFIX).unwrap_or(member)
}

macro_rules! npz_error {
    ($(#[$meta:meta])* $name:ident, $npy:ty, $verb:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $name {
            /// The zip container could not be handled.
            Zip(ZipError),
            /// A `.npy` member could not be handled.
            Npy($npy),
        }

        impl Error for $name {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                match self {
                    $name::Zip(err) => Some(err),
                    $name::Npy(err) => Some(err),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $name::Zip(err) => write!(f, "npz container error: {}", err),
                    $name::Npy(err) => {
                        write!(f, concat!("error ", $verb, " npz member: {}"), err)
                    }
                }
            }
        }

        impl From<ZipError> for $name {
            fn from(err: ZipError) -> $name {
                $name::Zip(err)
            }
        }

        impl From<$npy> for $name {
            fn from(err: $npy) -> $name {
                $name::Npy(err)
            }
        }
    };
}

npz_error!(
    /// Failure while building an `.npz` archive.
    WriteNpzError,
    WriteNpyError,
    "writing"
);

npz_error!(
    /// Failure while reading an `.npz` archive.
    ReadNpzError,
    ReadNpyError,
    "reading"
);

/// Builds an `.npz` archive one named array at a time.
///
/// ```no_run
/// use ndarray::array;
/// use ndarray_explorer::NpzWriter;
/// use std::fs::File;
///
/// let mut npz = NpzWriter::new(File::create("arrays.npz")?);
/// npz.add_array("array1", &array![1i64, 2, 3])?;
/// npz.add_array("array3", &array![[7i64, 8], [9, 10]])?;
/// npz.finish()?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct NpzWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: FileOptions,
}

impl<W: Write + Seek> NpzWriter<W> {
    /// Members are stored as is, matching `numpy.savez`.
    pub fn new(writer: W) -> NpzWriter<W> {
        NpzWriter::with_method(writer, CompressionMethod::Stored)
    }

    /// Members are deflated, matching `numpy.savez_compressed`.
    #[cfg(feature = "compressed_npz")]
    pub fn new_compressed(writer: W) -> NpzWriter<W> {
        NpzWriter::with_method(writer, CompressionMethod::Deflated)
    }

    fn with_method(writer: W, method: CompressionMethod) -> NpzWriter<W> {
        let options = FileOptions::default().compression_method(method);
        NpzWriter {
            zip: ZipWriter::new(writer),
            options,
        }
    }

    /// Appends `array` as the member `name.npy`. A name that already ends in
    /// `.npy` is used unchanged.
    pub fn add_array<N, S, D>(
        &mut self,
        name: N,
        array: &ArrayBase<S, D>,
    ) -> Result<(), WriteNpzError>
    where
        N: Into<String>,
        S::Elem: WritableElement,
        S: Data,
        D: Dimension,
    {
        let member = member_name(name.into());
        log::debug!("adding {} with shape {:?} to npz archive", member, array.shape());
        self.zip.start_file(member, self.options)?;
        array.write_npy(&mut self.zip)?;
        Ok(())
    }

    /// Writes the central directory and hands back the flushed writer.
    ///
    /// Errors are only reported here; the archive is also completed on drop,
    /// but silently.
    pub fn finish(mut self) -> Result<W, WriteNpzError> {
        let mut inner = self.zip.finish()?;
        inner.flush().map_err(ZipError::Io)?;
        Ok(inner)
    }
}

/// Looks up arrays in an `.npz` archive by name or position.
///
/// ```no_run
/// use ndarray::{Array1, Array2};
/// use ndarray_explorer::NpzReader;
/// use std::fs::File;
///
/// let mut npz = NpzReader::new(File::open("arrays.npz")?)?;
/// let a: Array1<i64> = npz.by_name("array1")?;
/// let b: Array2<i64> = npz.by_name("array3.npy")?;
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct NpzReader<R: Read + Seek> {
    zip: ZipArchive<R>,
    members: Vec<String>,
}

impl<R: Read + Seek> NpzReader<R> {
    /// Opens the archive and records its member names.
    pub fn new(reader: R) -> Result<NpzReader<R>, ReadNpzError> {
        let mut zip = ZipArchive::new(reader)?;
        let members = (0..zip.len())
            .map(|i| -> Result<String, ZipError> {
                Ok(zip.by_index_raw(i)?.name().to_owned())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NpzReader { zip, members })
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Array names in archive order, without the `.npy` suffix.
    pub fn names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|member| array_name(member).to_owned())
            .collect()
    }

    /// Reads the array stored as `name` or `name.npy`, preferring an exact
    /// member match.
    pub fn by_name<S, D>(&mut self, name: &str) -> Result<ArrayBase<S, D>, ReadNpzError>
    where
        S::Elem: ReadableElement,
        S: DataOwned,
        D: Dimension,
    {
        let member = if self.members.iter().any(|member| member == name) {
            name.to_owned()
        } else {
            member_name(name.to_owned())
        };
        log::debug!("reading {} from npz archive", member);
        let file = self.zip.by_name(&member)?;
        Ok(ArrayBase::read_npy(file)?)
    }

    /// Reads the `index`-th array in archive order.
    pub fn by_index<S, D>(&mut self, index: usize) -> Result<ArrayBase<S, D>, ReadNpzError>
    where
        S::Elem: ReadableElement,
        S: DataOwned,
        D: Dimension,
    {
        let file = self.zip.by_index(index)?;
        Ok(ArrayBase::read_npy(file)?)
    }
}
