//! `WritableElement` and `ReadableElement` for the numeric primitives.

use super::{ReadDataError, ReadableElement, WritableElement};
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use py_literal::Value as PyValue;
use std::io;
use std::mem;

/// Returns `Ok(_)` iff the `reader` had no more bytes on entry to this
/// function.
///
/// **Warning** This will consume the remainder of the reader.
fn check_for_extra_bytes<R: io::Read>(reader: &mut R) -> Result<(), ReadDataError> {
    let num_extra_bytes = reader.read_to_end(&mut Vec::new())?;
    if num_extra_bytes == 0 {
        Ok(())
    } else {
        Err(ReadDataError::ExtraBytes(num_extra_bytes))
    }
}

macro_rules! impl_primitive {
    ($elem:ty, $little_desc:expr, $big_desc:expr, $zero:expr, $write:ident, $write_into:ident, $read_into:ident) => {
        impl WritableElement for $elem {
            fn type_descriptor() -> PyValue {
                PyValue::String($little_desc.into())
            }

            fn write<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
                writer.$write::<LittleEndian>(*self)
            }

            fn write_slice<W: io::Write>(slice: &[Self], mut writer: W) -> io::Result<()> {
                let mut buf = vec![0u8; slice.len() * mem::size_of::<$elem>()];
                LittleEndian::$write_into(slice, &mut buf);
                writer.write_all(&buf)
            }
        }

        impl ReadableElement for $elem {
            fn read_to_end_exact_vec<R: io::Read>(
                mut reader: R,
                type_desc: &PyValue,
                len: usize,
            ) -> Result<Vec<Self>, ReadDataError> {
                let mut out = vec![$zero; len];
                match type_desc {
                    PyValue::String(s) if s == $little_desc => {
                        reader.$read_into::<LittleEndian>(&mut out)?;
                    }
                    PyValue::String(s) if s == $big_desc => {
                        reader.$read_into::<BigEndian>(&mut out)?;
                    }
                    other => return Err(ReadDataError::WrongDescriptor(other.clone())),
                }
                check_for_extra_bytes(&mut reader)?;
                Ok(out)
            }
        }
    };
}

impl_primitive!(i32, "<i4", ">i4", 0, write_i32, write_i32_into, read_i32_into);
impl_primitive!(i64, "<i8", ">i8", 0, write_i64, write_i64_into, read_i64_into);
impl_primitive!(f32, "<f4", ">f4", 0., write_f32, write_f32_into, read_f32_into);
impl_primitive!(f64, "<f8", ">f8", 0., write_f64, write_f64_into, read_f64_into);
