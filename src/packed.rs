//! Bit-packed vector storage and the pure unpackers over it.
//!
//! The three containers own a raw byte buffer plus quantization parameters;
//! unpacking is a side-effect-free function of the stored bytes. Elements
//! are packed LSB-first at arbitrary bit widths with no per-element
//! alignment.

use crate::{Error, ObjectReader};
use glam::Quat;

/// LSB-first scanner over a packed byte buffer.
struct BitReader<'a> {
    data: &'a [u8],
    byte: usize,
    bit: u32,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte: 0,
            bit: 0,
        }
    }

    fn starting_at(data: &'a [u8], bit_offset: usize) -> Self {
        Self {
            data,
            byte: bit_offset / 8,
            bit: (bit_offset % 8) as u32,
        }
    }

    fn read(&mut self, bit_size: u32) -> Result<u32, Error> {
        let mut value: u32 = 0;
        let mut bits: u32 = 0;
        while bits < bit_size {
            let byte = *self.data.get(self.byte).ok_or_else(|| {
                Error::MalformedPackedData {
                    message: format!(
                        "bit stream overran its {}-byte buffer reading a {bit_size}-bit element",
                        self.data.len()
                    ),
                }
            })?;
            value |= ((byte >> self.bit) as u32) << bits;
            let n = (bit_size - bits).min(8 - self.bit);
            self.bit += n;
            bits += n;
            if self.bit == 8 {
                self.byte += 1;
                self.bit = 0;
            }
        }
        Ok(value & mask(bit_size))
    }
}

fn mask(bit_size: u32) -> u32 {
    (((1u64 << bit_size) - 1) & 0xFFFF_FFFF) as u32
}

fn check_bit_size(bit_size: u8) -> Result<u32, Error> {
    if (1..=32).contains(&bit_size) {
        Ok(bit_size as u32)
    } else {
        Err(Error::MalformedPackedData {
            message: format!("bit size {bit_size} outside 1..=32"),
        })
    }
}

/// Quantized float array: `bit_size`-bit codes dequantized with an affine
/// `range`/`start` pair.
#[derive(Clone, Debug, Default)]
pub struct PackedFloatVector {
    pub num_items: u32,
    pub range: f32,
    pub start: f32,
    pub data: Vec<u8>,
    pub bit_size: u8,
}

impl PackedFloatVector {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_items = reader.read_u32()?;
        let range = reader.read_f32()?;
        let start = reader.read_f32()?;
        let num_data = reader.read_count()?;
        let data = reader.read_bytes(num_data)?;
        reader.align(4);
        let bit_size = reader.read_u8()?;
        reader.align(4);
        Ok(Self {
            num_items,
            range,
            start,
            data,
            bit_size,
        })
    }

    pub fn unpack(&self) -> Result<Vec<f32>, Error> {
        self.unpack_range(0, self.num_items as usize)
    }

    /// Unpacks `item_count` elements starting at element `start_item`.
    pub fn unpack_range(&self, start_item: usize, item_count: usize) -> Result<Vec<f32>, Error> {
        let bit_size = check_bit_size(self.bit_size)?;
        let mut bits = BitReader::starting_at(&self.data, start_item * bit_size as usize);
        let max = ((1u64 << bit_size) - 1) as f32;
        let scale = 1.0 / self.range;
        let mut out = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            let x = bits.read(bit_size)?;
            out.push(x as f32 / (scale * max) + self.start);
        }
        Ok(out)
    }
}

/// Packed integer array; codes are the values, no dequantization.
#[derive(Clone, Debug, Default)]
pub struct PackedIntVector {
    pub num_items: u32,
    pub data: Vec<u8>,
    pub bit_size: u8,
}

impl PackedIntVector {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_items = reader.read_u32()?;
        let num_data = reader.read_count()?;
        let data = reader.read_bytes(num_data)?;
        reader.align(4);
        let bit_size = reader.read_u8()?;
        reader.align(4);
        Ok(Self {
            num_items,
            data,
            bit_size,
        })
    }

    pub fn unpack(&self) -> Result<Vec<i32>, Error> {
        let bit_size = check_bit_size(self.bit_size)?;
        let mut bits = BitReader::new(&self.data);
        let mut out = Vec::with_capacity(self.num_items as usize);
        for _ in 0..self.num_items {
            out.push(bits.read(bit_size)? as i32);
        }
        Ok(out)
    }
}

/// Packed unit quaternions, 29 bits each.
///
/// A 3-bit header selects which component was dropped by the encoder (the
/// largest in magnitude, bits 0-1) and its sign (bit 2). The three stored
/// components use 9 bits for the component immediately after the dropped
/// index (mod 4) and 10 bits for the other two; the dropped component is
/// restored from the unit-norm constraint.
#[derive(Clone, Debug, Default)]
pub struct PackedQuatVector {
    pub num_items: u32,
    pub data: Vec<u8>,
}

impl PackedQuatVector {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_items = reader.read_u32()?;
        let num_data = reader.read_count()?;
        let data = reader.read_bytes(num_data)?;
        reader.align(4);
        Ok(Self { num_items, data })
    }

    pub fn unpack(&self) -> Result<Vec<Quat>, Error> {
        let mut bits = BitReader::new(&self.data);
        let mut out = Vec::with_capacity(self.num_items as usize);
        for i in 0..self.num_items {
            let flags = bits.read(3)?;
            let dropped = (flags & 3) as usize;

            let mut q = [0.0f32; 4];
            let mut sum = 0.0f32;
            for (j, component) in q.iter_mut().enumerate() {
                if j == dropped {
                    continue;
                }
                let bit_size = if (dropped + 1) % 4 == j { 9 } else { 10 };
                let max = ((1u32 << bit_size) - 1) as f32;
                let x = bits.read(bit_size)?;
                *component = x as f32 / (0.5 * max) - 1.0;
                sum += *component * *component;
            }

            // The dropped component was the largest, so the radicand is
            // non-negative for well-formed data; quantization noise can
            // still push it slightly under zero.
            let mut radicand = 1.0 - sum;
            if radicand < 0.0 {
                log::warn!(
                    "packed quaternion {i}: stored components square-sum to {sum}, clamping restored component to 0"
                );
                radicand = 0.0;
            }
            q[dropped] = radicand.sqrt();
            if flags & 4 != 0 {
                q[dropped] = -q[dropped];
            }
            out.push(Quat::from_xyzw(q[0], q[1], q[2], q[3]));
        }
        Ok(out)
    }
}
