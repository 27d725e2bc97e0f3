//! Streamed clip decoding and incoming-tangent reconstruction.
//!
//! A streamed clip is a flat `u32` buffer reinterpreted byte-for-byte as a
//! sequence of time-stamped frames, each carrying delta keys as cubic
//! coefficient blocks. The stored coefficients yield each key's value and
//! outgoing slope directly; the incoming slope is not stored and is derived
//! by scanning backward to the most recent frame touching the same curve.

use crate::{Endian, Error, ObjectReader, UnityVersion};

#[derive(Clone, Debug, Default)]
pub struct StreamedClip {
    pub data: Vec<u32>,
    pub curve_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StreamedCurveKey {
    /// Target curve slot.
    pub index: i32,
    /// Cubic polynomial terms; `coeff[3]` is the key value, `coeff[2]` the
    /// outgoing slope, `coeff[0..2]` feed forward tangent propagation only.
    pub coeff: [f32; 4],
    pub value: f32,
    pub out_slope: f32,
    /// Derived, not stored; `f32::INFINITY` marks a stepped segment.
    pub in_slope: f32,
}

impl StreamedCurveKey {
    fn read(input: &mut ObjectReader) -> Result<Self, Error> {
        let index = input.read_i32()?;
        let coeff = [
            input.read_f32()?,
            input.read_f32()?,
            input.read_f32()?,
            input.read_f32()?,
        ];
        Ok(Self {
            index,
            coeff,
            value: coeff[3],
            out_slope: coeff[2],
            in_slope: 0.0,
        })
    }

    /// Incoming slope of `rhs` (the next key on this curve), `dx` seconds
    /// after `self`.
    ///
    /// The `coeff[1] / (1.0 / (dx * dx))` term is kept literally as the
    /// encoder's spline math writes it; rearranging it changes rounding.
    pub fn next_in_slope(&self, dx: f32, rhs: &StreamedCurveKey) -> f32 {
        // An all-zero coefficient block marks a stepped (non-interpolated)
        // segment.
        if self.coeff[0] == 0.0 && self.coeff[1] == 0.0 && self.coeff[2] == 0.0 {
            return f32::INFINITY;
        }

        let dx = dx.max(0.0001);
        let dy = rhs.value - self.value;
        let length = 1.0 / (dx * dx);
        let d1 = self.out_slope * dx;
        let d2 = dy + dy + dy - d1 - d1 - self.coeff[1] / length;
        d2 / dx
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamedFrame {
    pub time: f32,
    pub keys: Vec<StreamedCurveKey>,
}

impl StreamedFrame {
    fn read(input: &mut ObjectReader) -> Result<Self, Error> {
        let time = input.read_f32()?;
        let num_keys = input.read_count()?;
        let mut keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            keys.push(StreamedCurveKey::read(input)?);
        }
        Ok(Self { time, keys })
    }
}

impl StreamedClip {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_data = reader.read_count()?;
        let data = reader.read_u32_array(num_data)?;
        let curve_count = reader.read_u32()?;
        Ok(Self { data, curve_count })
    }

    /// Reinterprets the raw buffer as frames and reconstructs all derivable
    /// incoming tangents.
    ///
    /// Frames 0, 1 and the last frame keep their stored boundary tangents;
    /// for every other frame each key's incoming slope comes from the
    /// nearest preceding frame that carries the same curve index.
    pub fn read_frames(&self) -> Result<Vec<StreamedFrame>, Error> {
        // The words were endian-converted when the array was read, so the
        // reinterpreted byte stream is always little-endian.
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for word in &self.data {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        let mut input = ObjectReader::new(&bytes, UnityVersion::ZERO, Endian::Little);

        let mut frames = Vec::new();
        while input.remaining() > 0 {
            frames.push(StreamedFrame::read(&mut input)?);
        }

        let count = frames.len();
        for frame_index in 2..count.saturating_sub(1) {
            let (earlier, rest) = frames.split_at_mut(frame_index);
            let frame = &mut rest[0];
            let frame_time = frame.time;
            for key in &mut frame.keys {
                // Nearest predecessor first; stop at the first match.
                for pre_frame in earlier.iter().rev() {
                    if let Some(pre_key) = pre_frame.keys.iter().find(|k| k.index == key.index) {
                        key.in_slope = pre_key.next_in_slope(frame_time - pre_frame.time, key);
                        break;
                    }
                }
            }
        }
        Ok(frames)
    }
}
