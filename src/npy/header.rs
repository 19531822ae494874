use byteorder::{ByteOrder, LittleEndian};
use num_traits::ToPrimitive;
use py_literal::{
    FormatError as PyValueFormatError, ParseError as PyValueParseError, Value as PyValue,
};
use std::error::Error;
use std::fmt;
use std::io;

/// Magic string to indicate npy format.
const MAGIC_STRING: &[u8] = b"\x93NUMPY";

/// Alignment of the start of the array data. NumPy has padded headers to 64
/// bytes since version 1.14; older readers only require 16.
pub(crate) const HEADER_ALIGN: usize = 64;

#[derive(Debug)]
pub enum ParseHeaderError {
    MagicString,
    Version { major: u8, minor: u8 },
    /// The array format string of a version 1.0 or 2.0 file is not ASCII.
    NonAscii,
    /// The array format string of a version 3.0 file is not UTF-8.
    Utf8Parse(std::str::Utf8Error),
    UnknownKey(PyValue),
    MissingKey(&'static str),
    IllegalValue { key: &'static str, value: PyValue },
    DictParse(PyValueParseError),
    MetaNotDict(PyValue),
    MissingNewline,
}

impl Error for ParseHeaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseHeaderError::Utf8Parse(err) => Some(err),
            ParseHeaderError::DictParse(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ParseHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseHeaderError::*;
        match self {
            MagicString => write!(f, "start does not match magic string"),
            Version { major, minor } => write!(f, "unknown version number: {}.{}", major, minor),
            NonAscii => write!(f, "non-ascii in array format string"),
            Utf8Parse(err) => write!(f, "error parsing array format string as UTF-8: {}", err),
            UnknownKey(key) => write!(f, "unknown key: {}", key),
            MissingKey(key) => write!(f, "missing key: {}", key),
            IllegalValue { key, value } => write!(f, "illegal value for key {}: {}", key, value),
            DictParse(err) => write!(f, "error parsing metadata dict: {}", err),
            MetaNotDict(value) => write!(f, "metadata is not a dict: {}", value),
            MissingNewline => write!(f, "newline missing at end of header"),
        }
    }
}

impl From<std::str::Utf8Error> for ParseHeaderError {
    fn from(err: std::str::Utf8Error) -> ParseHeaderError {
        ParseHeaderError::Utf8Parse(err)
    }
}

impl From<PyValueParseError> for ParseHeaderError {
    fn from(err: PyValueParseError) -> ParseHeaderError {
        ParseHeaderError::DictParse(err)
    }
}

#[derive(Debug)]
pub enum ReadHeaderError {
    Io(io::Error),
    Parse(ParseHeaderError),
}

impl Error for ReadHeaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadHeaderError::Io(err) => Some(err),
            ReadHeaderError::Parse(err) => Some(err),
        }
    }
}

impl fmt::Display for ReadHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadHeaderError::Io(err) => write!(f, "I/O error: {}", err),
            ReadHeaderError::Parse(err) => write!(f, "error parsing header: {}", err),
        }
    }
}

impl From<io::Error> for ReadHeaderError {
    fn from(err: io::Error) -> ReadHeaderError {
        ReadHeaderError::Io(err)
    }
}

impl From<ParseHeaderError> for ReadHeaderError {
    fn from(err: ParseHeaderError) -> ReadHeaderError {
        ReadHeaderError::Parse(err)
    }
}

#[derive(Debug)]
pub enum WriteHeaderError {
    Io(io::Error),
    Format(PyValueFormatError),
    /// The padded dictionary, in bytes, is too long for any format version.
    TooLong(usize),
}

impl Error for WriteHeaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WriteHeaderError::Io(err) => Some(err),
            WriteHeaderError::Format(err) => Some(err),
            WriteHeaderError::TooLong(_) => None,
        }
    }
}

impl fmt::Display for WriteHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WriteHeaderError::Io(err) => write!(f, "I/O error: {}", err),
            WriteHeaderError::Format(err) => write!(f, "error formatting header: {}", err),
            WriteHeaderError::TooLong(len) => write!(f, "header of {} bytes is too long", len),
        }
    }
}

impl From<io::Error> for WriteHeaderError {
    fn from(err: io::Error) -> WriteHeaderError {
        WriteHeaderError::Io(err)
    }
}

impl From<PyValueFormatError> for WriteHeaderError {
    fn from(err: PyValueFormatError) -> WriteHeaderError {
        WriteHeaderError::Format(err)
    }
}

/// Format version of an `.npy` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Version {
    V1,
    V2,
    V3,
}

impl Version {
    /// One byte each for the major and minor version numbers.
    const NUM_BYTES: usize = 2;

    fn from_bytes(major: u8, minor: u8) -> Result<Self, ParseHeaderError> {
        match (major, minor) {
            (1, 0) => Ok(Version::V1),
            (2, 0) => Ok(Version::V2),
            (3, 0) => Ok(Version::V3),
            (major, minor) => Err(ParseHeaderError::Version { major, minor }),
        }
    }

    /// Largest header length the `HEADER_LEN` field can record.
    fn max_header_len(self) -> usize {
        match self {
            Version::V1 => usize::from(u16::MAX),
            Version::V2 | Version::V3 => u32::MAX as usize,
        }
    }

    /// Length of a `dict_len`-byte dictionary after space padding and the
    /// newline, such that the whole header is a multiple of `HEADER_ALIGN`.
    fn padded_len(self, dict_len: usize) -> usize {
        let unpadded = self.prefix_len() + dict_len + 1;
        dict_len + 1 + (HEADER_ALIGN - unpadded % HEADER_ALIGN)
    }

    /// Smallest version whose length field fits the padded dictionary, with
    /// that padded length.
    fn for_dict_len(dict_len: usize) -> Option<(Self, usize)> {
        [Version::V1, Version::V2]
            .into_iter()
            .map(|version| (version, version.padded_len(dict_len)))
            .find(|&(version, len)| len <= version.max_header_len())
    }

    fn to_bytes(self) -> [u8; Self::NUM_BYTES] {
        match self {
            Version::V1 => [1, 0],
            Version::V2 => [2, 0],
            Version::V3 => [3, 0],
        }
    }

    /// Width of the little-endian `HEADER_LEN` field.
    fn len_field_bytes(self) -> usize {
        match self {
            Version::V1 => 2,
            Version::V2 | Version::V3 => 4,
        }
    }

    fn prefix_len(self) -> usize {
        MAGIC_STRING.len() + Self::NUM_BYTES + self.len_field_bytes()
    }

    fn read_header_len<R: io::Read>(self, mut reader: R) -> io::Result<usize> {
        let mut buf = [0; 4];
        let field = &mut buf[..self.len_field_bytes()];
        reader.read_exact(field)?;
        Ok(match self {
            Version::V1 => usize::from(LittleEndian::read_u16(field)),
            Version::V2 | Version::V3 => LittleEndian::read_u32(field) as usize,
        })
    }

    /// `header_len` must not exceed `self.max_header_len()`.
    fn write_header_len(self, header_len: usize, out: &mut Vec<u8>) {
        debug_assert!(header_len <= self.max_header_len());
        let mut buf = [0; 4];
        match self {
            Version::V1 => LittleEndian::write_u16(&mut buf, header_len as u16),
            Version::V2 | Version::V3 => LittleEndian::write_u32(&mut buf, header_len as u32),
        }
        out.extend_from_slice(&buf[..self.len_field_bytes()]);
    }
}

/// The metadata dictionary at the start of an `.npy` file.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub type_descriptor: PyValue,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_py_value())
    }
}

fn parse_shape(value: &PyValue) -> Option<Vec<usize>> {
    value
        .as_tuple()?
        .iter()
        .map(|elem| elem.as_integer()?.to_usize())
        .collect()
}

impl Header {
    fn from_py_value(value: PyValue) -> Result<Self, ParseHeaderError> {
        let dict = match value {
            PyValue::Dict(dict) => dict,
            other => return Err(ParseHeaderError::MetaNotDict(other)),
        };
        let mut type_descriptor = None;
        let mut fortran_order = None;
        let mut shape = None;
        for (key, value) in dict {
            let key = match key {
                PyValue::String(key) => key,
                other => return Err(ParseHeaderError::UnknownKey(other)),
            };
            match key.as_str() {
                "descr" => type_descriptor = Some(value),
                "fortran_order" => match value {
                    PyValue::Boolean(b) => fortran_order = Some(b),
                    value => {
                        return Err(ParseHeaderError::IllegalValue {
                            key: "fortran_order",
                            value,
                        })
                    }
                },
                "shape" => match parse_shape(&value) {
                    Some(s) => shape = Some(s),
                    None => return Err(ParseHeaderError::IllegalValue { key: "shape", value }),
                },
                _ => return Err(ParseHeaderError::UnknownKey(PyValue::String(key))),
            }
        }
        Ok(Header {
            type_descriptor: type_descriptor.ok_or(ParseHeaderError::MissingKey("descr"))?,
            fortran_order: fortran_order.ok_or(ParseHeaderError::MissingKey("fortran_order"))?,
            shape: shape.ok_or(ParseHeaderError::MissingKey("shape"))?,
        })
    }

    pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Self, ReadHeaderError> {
        let mut magic = [0; MAGIC_STRING.len()];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC_STRING {
            return Err(ParseHeaderError::MagicString.into());
        }

        let mut version = [0; Version::NUM_BYTES];
        reader.read_exact(&mut version)?;
        let version = Version::from_bytes(version[0], version[1])?;

        let header_len = version.read_header_len(&mut reader)?;
        let mut buf = vec![0; header_len];
        reader.read_exact(&mut buf)?;
        let dict = match buf.split_last() {
            Some((&b'\n', rest)) => rest,
            _ => return Err(ParseHeaderError::MissingNewline.into()),
        };
        let dict = match version {
            Version::V1 | Version::V2 if !dict.is_ascii() => {
                return Err(ParseHeaderError::NonAscii.into())
            }
            _ => std::str::from_utf8(dict).map_err(ParseHeaderError::from)?,
        };
        let value: PyValue = dict.parse().map_err(ParseHeaderError::from)?;
        Ok(Header::from_py_value(value)?)
    }

    fn to_py_value(&self) -> PyValue {
        let shape = self
            .shape
            .iter()
            .map(|&len| PyValue::Integer(len.into()))
            .collect();
        PyValue::Dict(vec![
            (PyValue::String("descr".into()), self.type_descriptor.clone()),
            (
                PyValue::String("fortran_order".into()),
                PyValue::Boolean(self.fortran_order),
            ),
            (PyValue::String("shape".into()), PyValue::Tuple(shape)),
        ])
    }

    /// Returns the full header: magic string, version, length field, and the
    /// space-padded, newline-terminated dictionary.
    ///
    /// Version 1.0 is written unless the padded dictionary overflows its
    /// 16-bit length field, in which case version 2.0 is.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteHeaderError> {
        let mut dict = Vec::new();
        self.to_py_value().write_ascii(&mut dict)?;

        let (version, header_len) =
            Version::for_dict_len(dict.len()).ok_or(WriteHeaderError::TooLong(dict.len()))?;
        dict.resize(header_len - 1, b' ');
        dict.push(b'\n');

        let mut out = Vec::with_capacity(version.prefix_len() + dict.len());
        out.extend_from_slice(MAGIC_STRING);
        out.extend_from_slice(&version.to_bytes());
        version.write_header_len(dict.len(), &mut out);
        out.extend_from_slice(&dict);
        debug_assert_eq!(out.len() % HEADER_ALIGN, 0);
        Ok(out)
    }

    pub fn write<W: io::Write>(&self, mut writer: W) -> Result<(), WriteHeaderError> {
        writer.write_all(&self.to_bytes()?)?;
        Ok(())
    }
}
