//! Plain-text tables in the layout of [`numpy.savetxt`] and
//! [`numpy.loadtxt`]: one row per line, values separated by whitespace.
//!
//! [`numpy.savetxt`]: https://numpy.org/doc/stable/reference/generated/numpy.savetxt.html
//! [`numpy.loadtxt`]: https://numpy.org/doc/stable/reference/generated/numpy.loadtxt.html

use ndarray::prelude::*;
use ndarray::{Data, DataOwned, ShapeError};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// How each value is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxtFormat {
    /// The value's `Display` output; `fmt='%d'` for integer arrays.
    Plain,
    /// Scientific notation with `precision` fractional digits and a signed
    /// exponent of at least two digits, as C's `%.<precision>e` prints it.
    /// `fmt='%.18e'` is NumPy's default.
    Exponential { precision: usize },
}

impl Default for TxtFormat {
    fn default() -> Self {
        TxtFormat::Exponential { precision: 18 }
    }
}

/// Options for [`WriteTxtExt::write_txt`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxtOptions {
    pub format: TxtFormat,
    /// Written between the values of a row.
    pub delimiter: String,
    /// Written after every row, including the last one.
    pub newline: String,
    /// Written before the data, each line prefixed with `comments`.
    pub header: Option<String>,
    pub comments: String,
}

impl Default for TxtOptions {
    fn default() -> Self {
        TxtOptions {
            format: TxtFormat::default(),
            delimiter: " ".to_owned(),
            newline: "\n".to_owned(),
            header: None,
            comments: "# ".to_owned(),
        }
    }
}

impl TxtOptions {
    pub fn with_format(mut self, format: TxtFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// An error writing a text table.
#[derive(Debug)]
pub enum WriteTxtError {
    /// An error caused by I/O.
    Io(io::Error),
    /// Only 1-D and 2-D arrays can be written as a table.
    Dimensionality(usize),
}

impl Error for WriteTxtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteTxtError::Io(err) => Some(err),
            WriteTxtError::Dimensionality(_) => None,
        }
    }
}

impl fmt::Display for WriteTxtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteTxtError::Io(err) => write!(f, "I/O error: {}", err),
            WriteTxtError::Dimensionality(ndim) => {
                write!(f, "expected a 1-D or 2-D array, found {} dimensions", ndim)
            }
        }
    }
}

impl From<io::Error> for WriteTxtError {
    fn from(err: io::Error) -> WriteTxtError {
        WriteTxtError::Io(err)
    }
}

/// An error reading a text table.
#[derive(Debug)]
pub enum ReadTxtError {
    /// An error caused by I/O.
    Io(io::Error),
    /// A token could not be parsed as the element type.
    Parse {
        line: usize,
        token: String,
        source: Box<dyn Error + Send + Sync>,
    },
    /// A row has a different number of values than the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The table cannot be represented with the requested dimensionality.
    WrongNdim {
        expected: Option<usize>,
        rows: usize,
        cols: usize,
    },
    /// The data could not be arranged in the table's shape.
    Shape(ShapeError),
}

impl Error for ReadTxtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadTxtError::Io(err) => Some(err),
            ReadTxtError::Parse { source, .. } => Some(&**source),
            ReadTxtError::Shape(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ReadTxtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadTxtError::Io(err) => write!(f, "I/O error: {}", err),
            ReadTxtError::Parse { line, token, source } => {
                write!(f, "line {}: could not parse {:?}: {}", line, token, source)
            }
            ReadTxtError::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} values, found {}",
                line, expected, found
            ),
            ReadTxtError::WrongNdim {
                expected,
                rows,
                cols,
            } => write!(
                f,
                "a {}x{} table does not fit Dimension type with NDIM = {:?}",
                rows, cols, expected
            ),
            ReadTxtError::Shape(err) => write!(f, "data did not match table shape: {}", err),
        }
    }
}

impl From<io::Error> for ReadTxtError {
    fn from(err: io::Error) -> ReadTxtError {
        ReadTxtError::Io(err)
    }
}

impl From<ShapeError> for ReadTxtError {
    fn from(err: ShapeError) -> ReadTxtError {
        ReadTxtError::Shape(err)
    }
}

fn write_value<W, A>(writer: &mut W, value: &A, format: TxtFormat) -> io::Result<()>
where
    W: Write,
    A: fmt::Display + fmt::LowerExp,
{
    match format {
        TxtFormat::Plain => write!(writer, "{}", value),
        TxtFormat::Exponential { precision } => {
            let formatted = format!("{:.*e}", precision, value);
            match formatted.split_once('e') {
                Some((mantissa, exp)) => match exp.parse::<i32>() {
                    Ok(exp) => write!(writer, "{}e{:+03}", mantissa, exp),
                    Err(_) => writer.write_all(formatted.as_bytes()),
                },
                None => writer.write_all(formatted.as_bytes()),
            }
        }
    }
}

/// Extension trait for writing 1-D and 2-D arrays as text tables.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use ndarray_explorer::{TxtFormat, TxtOptions, WriteTxtExt};
///
/// let mut out = Vec::new();
/// let options = TxtOptions::default().with_format(TxtFormat::Plain);
/// array![[0i64, 1, 2], [3, 4, 5]].write_txt(&mut out, &options)?;
/// assert_eq!(out, b"0 1 2\n3 4 5\n");
/// # Ok::<_, ndarray_explorer::WriteTxtError>(())
/// ```
pub trait WriteTxtExt {
    /// Writes a 1-D array one value per line, or a 2-D array one row per
    /// line.
    fn write_txt<W: io::Write>(&self, writer: W, options: &TxtOptions)
        -> Result<(), WriteTxtError>;
}

impl<A, S, D> WriteTxtExt for ArrayBase<S, D>
where
    A: fmt::Display + fmt::LowerExp,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn write_txt<W: io::Write>(
        &self,
        mut writer: W,
        options: &TxtOptions,
    ) -> Result<(), WriteTxtError> {
        let ndim = self.ndim();
        if ndim != 1 && ndim != 2 {
            return Err(WriteTxtError::Dimensionality(ndim));
        }
        if let Some(header) = &options.header {
            for line in header.lines() {
                write!(writer, "{}{}{}", options.comments, line, options.newline)?;
            }
        }
        if ndim == 1 {
            for value in self.iter() {
                write_value(&mut writer, value, options.format)?;
                writer.write_all(options.newline.as_bytes())?;
            }
        } else {
            let table = self
                .view()
                .into_dimensionality::<Ix2>()
                .map_err(|_| WriteTxtError::Dimensionality(ndim))?;
            for row in table.outer_iter() {
                for (i, value) in row.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(options.delimiter.as_bytes())?;
                    }
                    write_value(&mut writer, value, options.format)?;
                }
                writer.write_all(options.newline.as_bytes())?;
            }
        }
        Ok(())
    }
}

/// Extension trait for reading arrays from text tables.
///
/// Blank lines and everything after a `#` are ignored. A 2-D (or dynamic)
/// array takes the table's `(rows, cols)` shape; a 1-D array accepts a
/// table with a single row or a single column.
///
/// # Example
///
/// ```
/// use ndarray::{array, Array2};
/// use ndarray_explorer::ReadTxtExt;
///
/// let text = "# comment\n0 1 2\n3 4 5\n";
/// let arr = Array2::<f64>::read_txt(text.as_bytes())?;
/// assert_eq!(arr, array![[0., 1., 2.], [3., 4., 5.]]);
/// # Ok::<_, ndarray_explorer::ReadTxtError>(())
/// ```
pub trait ReadTxtExt: Sized {
    fn read_txt<R: BufRead>(reader: R) -> Result<Self, ReadTxtError>;
}

impl<A, S, D> ReadTxtExt for ArrayBase<S, D>
where
    A: FromStr,
    A::Err: Error + Send + Sync + 'static,
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    fn read_txt<R: BufRead>(reader: R) -> Result<Self, ReadTxtError> {
        let mut data = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let content = match line.find('#') {
                Some(start) => &line[..start],
                None => &line[..],
            };
            let before = data.len();
            for token in content.split_whitespace() {
                let value = token.parse::<A>().map_err(|err| ReadTxtError::Parse {
                    line: index + 1,
                    token: token.to_owned(),
                    source: Box::new(err),
                })?;
                data.push(value);
            }
            let found = data.len() - before;
            if found == 0 {
                continue;
            }
            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(ReadTxtError::RaggedRow {
                        line: index + 1,
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
            rows += 1;
        }
        let cols = cols.unwrap_or(0);
        let shape = match D::NDIM {
            Some(1) if rows <= 1 => IxDyn(&[cols]),
            Some(1) if cols == 1 => IxDyn(&[rows]),
            Some(2) | None => IxDyn(&[rows, cols]),
            expected => return Err(ReadTxtError::WrongNdim { expected, rows, cols }),
        };
        log::trace!("parsed {}x{} text table", rows, cols);
        Ok(ArrayBase::<S, IxDyn>::from_shape_vec(shape, data)?.into_dimensionality()?)
    }
}

/// Writes a 1-D or 2-D array to a text file at `path`, replacing any
/// existing file.
pub fn write_txt<P, T>(path: P, array: &T, options: &TxtOptions) -> Result<(), WriteTxtError>
where
    P: AsRef<Path>,
    T: WriteTxtExt + ?Sized,
{
    let mut writer = BufWriter::new(File::create(path)?);
    array.write_txt(&mut writer, options)?;
    writer.flush()?;
    Ok(())
}

/// Reads an array from the text file at `path`.
pub fn read_txt<P, T>(path: P) -> Result<T, ReadTxtError>
where
    P: AsRef<Path>,
    T: ReadTxtExt,
{
    T::read_txt(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::array;

    fn to_string<T: WriteTxtExt>(array: &T, options: &TxtOptions) -> String {
        let mut out = Vec::new();
        array.write_txt(&mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_plain_integers() {
        let options = TxtOptions::default().with_format(TxtFormat::Plain);
        let arr = array![[0i64, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11]];
        assert_eq!(to_string(&arr, &options), "0 1 2 3\n4 5 6 7\n8 9 10 11\n");
    }

    #[test]
    fn write_default_exponential() {
        let arr = array![1.5f64, -2.];
        assert_eq!(
            to_string(&arr, &TxtOptions::default()),
            "1.500000000000000000e+00\n-2.000000000000000000e+00\n",
        );
    }

    #[test]
    fn write_header_and_delimiter() {
        let options = TxtOptions::default()
            .with_format(TxtFormat::Exponential { precision: 1 })
            .with_delimiter(",")
            .with_header("x,y\nsecond line");
        let arr = array![[1.0f32, 20.0]];
        assert_eq!(
            to_string(&arr, &options),
            "# x,y\n# second line\n1.0e+00,2.0e+01\n",
        );
    }

    #[test]
    fn write_exponent_sign_and_width() {
        let options = TxtOptions::default().with_format(TxtFormat::Exponential { precision: 2 });
        let arr = array![2.5e-7f64, 6.02e23, 1e100, -0.];
        assert_eq!(
            to_string(&arr, &options),
            "2.50e-07\n6.02e+23\n1.00e+100\n-0.00e+00\n",
        );
    }

    #[test]
    fn write_dynamic_table() {
        let options = TxtOptions::default().with_format(TxtFormat::Plain);
        let table = array![[1i64, 2], [3, 4]].into_dyn();
        assert_eq!(to_string(&table, &options), "1 2\n3 4\n");
        let flat = array![5i32, 6].into_dyn();
        assert_eq!(to_string(&flat, &options), "5\n6\n");
        let cube = ArrayD::<i64>::zeros(IxDyn(&[1, 1, 1]));
        let res = cube.write_txt(Vec::new(), &options);
        assert!(matches!(res, Err(WriteTxtError::Dimensionality(3))));
    }

    #[test]
    fn write_rejects_3d() {
        let arr = Array3::<i64>::zeros((2, 2, 2));
        let res = arr.write_txt(Vec::new(), &TxtOptions::default());
        assert!(matches!(res, Err(WriteTxtError::Dimensionality(3))));
    }

    #[test]
    fn read_skips_comments_and_blank_lines() {
        let text = "# header\n\n1 2 # trailing\n  3   4\n\n";
        let arr = Array2::<i64>::read_txt(text.as_bytes()).unwrap();
        assert_eq!(arr, array![[1, 2], [3, 4]]);
    }

    #[test]
    fn read_exponential_as_float() {
        let text = "1.500000000000000000e+00 -2.0e-1\n";
        let arr = Array2::<f64>::read_txt(text.as_bytes()).unwrap();
        assert_eq!(arr, array![[1.5, -0.2]]);
    }

    #[test]
    fn read_one_dimensional() {
        let row = Array1::<i32>::read_txt("1 2 3\n".as_bytes()).unwrap();
        assert_eq!(row, array![1, 2, 3]);
        let column = Array1::<i32>::read_txt("1\n2\n3\n".as_bytes()).unwrap();
        assert_eq!(column, array![1, 2, 3]);
        let res = Array1::<i32>::read_txt("1 2\n3 4\n".as_bytes());
        assert!(matches!(
            res,
            Err(ReadTxtError::WrongNdim { expected: Some(1), rows: 2, cols: 2 })
        ));
    }

    #[test]
    fn read_dynamic_and_empty() {
        let arr = ArrayD::<f64>::read_txt("1 2\n".as_bytes()).unwrap();
        assert_eq!(arr.shape(), &[1, 2]);
        let empty = Array2::<f64>::read_txt("# nothing here\n".as_bytes()).unwrap();
        assert_eq!(empty.shape(), &[0, 0]);
    }

    #[test]
    fn read_ragged_row() {
        let res = Array2::<i64>::read_txt("1 2 3\n4 5\n".as_bytes());
        assert!(matches!(
            res,
            Err(ReadTxtError::RaggedRow { line: 2, expected: 3, found: 2 })
        ));
    }

    #[test]
    fn read_bad_token() {
        let res = Array2::<i64>::read_txt("1 2\n3 x\n".as_bytes());
        match res {
            Err(ReadTxtError::Parse { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
