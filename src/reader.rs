//! Cursor over a serialized object record.
//!
//! The reader is IO-free: it operates on an in-memory byte slice, carries
//! the byte order the data was written with and the immutable producer
//! version tuple every higher-level decoder consults for field gates. All
//! reads bounds-check and fail with [`Error::Truncated`] rather than panic.

use crate::{Error, UnityVersion};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use glam::{Quat, Vec3, Vec4};

/// Byte order of the serialized data. Unity writes little-endian except for
/// some big-endian console exports.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Endian {
    Big,
    #[default]
    Little,
}

#[derive(Clone, Debug)]
pub struct ObjectReader<'a> {
    bytes: &'a [u8],
    cursor: usize,
    endian: Endian,
    version: UnityVersion,
}

impl<'a> ObjectReader<'a> {
    pub fn new(bytes: &'a [u8], version: UnityVersion, endian: Endian) -> Self {
        Self {
            bytes,
            cursor: 0,
            endian,
            version,
        }
    }

    pub fn version(&self) -> UnityVersion {
        self.version
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::Truncated {
                offset: self.cursor,
                requested: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(slice)
    }

    /// Advances the cursor to the next multiple of `alignment`. No-op when
    /// already aligned. The cursor may legally land past the end of the
    /// buffer; the next read reports truncation.
    pub fn align(&mut self, alignment: usize) {
        let rem = self.cursor % alignment;
        if rem != 0 {
            self.cursor += alignment - rem;
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, Error> {
        Ok(self.take(n)?.to_vec())
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let slice = self.take(2)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u16(slice),
            Endian::Little => LittleEndian::read_u16(slice),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        let slice = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_i32(slice),
            Endian::Little => LittleEndian::read_i32(slice),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        let slice = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u32(slice),
            Endian::Little => LittleEndian::read_u32(slice),
        })
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        let slice = self.take(8)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_i64(slice),
            Endian::Little => LittleEndian::read_i64(slice),
        })
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let slice = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_f32(slice),
            Endian::Little => LittleEndian::read_f32(slice),
        })
    }

    /// Reads a signed length-prefix and rejects negative values before any
    /// allocation happens.
    pub fn read_count(&mut self) -> Result<usize, Error> {
        let offset = self.cursor;
        let n = self.read_i32()?;
        if n < 0 {
            return Err(Error::InvalidData {
                message: format!("negative count {n} at offset {offset}"),
            });
        }
        Ok(n as usize)
    }

    /// Reads a length-prefixed UTF-8 string, then pads to a 4-byte boundary.
    ///
    /// The read only happens when the declared length is plausible (at
    /// least 1 and strictly less than the remaining stream length);
    /// otherwise the result is an empty string and no further bytes are
    /// consumed.
    pub fn read_aligned_string(&mut self) -> Result<String, Error> {
        let offset = self.cursor;
        let length = self.read_i32()?;
        if length > 0 && (length as usize) < self.remaining() {
            let bytes = self.take(length as usize)?;
            let s = std::str::from_utf8(bytes).map_err(|e| Error::InvalidData {
                message: format!("invalid utf-8 in string at offset {offset}: {e}"),
            })?;
            self.align(4);
            return Ok(s.to_string());
        }
        Ok(String::new())
    }

    pub fn read_i32_array(&mut self, n: usize) -> Result<Vec<i32>, Error> {
        self.check_array(n, 4)?;
        (0..n).map(|_| self.read_i32()).collect()
    }

    pub fn read_u32_array(&mut self, n: usize) -> Result<Vec<u32>, Error> {
        self.check_array(n, 4)?;
        (0..n).map(|_| self.read_u32()).collect()
    }

    pub fn read_f32_array(&mut self, n: usize) -> Result<Vec<f32>, Error> {
        self.check_array(n, 4)?;
        (0..n).map(|_| self.read_f32()).collect()
    }

    pub fn read_vector3(&mut self) -> Result<Vec3, Error> {
        Ok(Vec3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    pub fn read_vector4(&mut self) -> Result<Vec4, Error> {
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    pub fn read_quaternion(&mut self) -> Result<Quat, Error> {
        Ok(Quat::from_xyzw(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    // Rejects an array whose byte footprint already exceeds the stream, so
    // a corrupt count cannot drive a huge allocation.
    fn check_array(&self, n: usize, element_size: usize) -> Result<(), Error> {
        let wanted = n.saturating_mul(element_size);
        if wanted > self.remaining() {
            return Err(Error::Truncated {
                offset: self.cursor,
                requested: wanted,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
