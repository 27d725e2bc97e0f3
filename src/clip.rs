//! Clip aggregation: the three mutually exclusive curve encodings plus the
//! value binding table.

use crate::{Error, ObjectReader, StreamedClip};

/// Dense sample array, row-major by frame.
#[derive(Clone, Debug, Default)]
pub struct DenseClip {
    pub frame_count: i32,
    pub curve_count: u32,
    pub sample_rate: f32,
    pub begin_time: f32,
    /// `frame_count * curve_count` samples.
    pub samples: Vec<f32>,
}

impl DenseClip {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let frame_count = reader.read_i32()?;
        let curve_count = reader.read_u32()?;
        let sample_rate = reader.read_f32()?;
        let begin_time = reader.read_f32()?;
        let num_samples = reader.read_count()?;
        let samples = reader.read_f32_array(num_samples)?;
        Ok(Self {
            frame_count,
            curve_count,
            sample_rate,
            begin_time,
            samples,
        })
    }
}

/// One value per bound curve, constant across the clip's duration.
#[derive(Clone, Debug, Default)]
pub struct ConstantClip {
    pub data: Vec<f32>,
}

impl ConstantClip {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_data = reader.read_count()?;
        let data = reader.read_f32_array(num_data)?;
        Ok(Self { data })
    }
}

#[derive(Clone, Debug)]
pub struct ValueConstant {
    pub id: u32,
    /// Dropped from the format in 5.5.
    pub type_id: Option<u32>,
    pub ty: u32,
    pub index: u32,
}

impl ValueConstant {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let id = reader.read_u32()?;
        let type_id = if reader.version().before(5, 5) {
            Some(reader.read_u32()?)
        } else {
            None
        };
        Ok(Self {
            id,
            type_id,
            ty: reader.read_u32()?,
            index: reader.read_u32()?,
        })
    }
}

/// Binding table mapping curve slots to value metadata.
#[derive(Clone, Debug, Default)]
pub struct ValueArrayConstant {
    pub values: Vec<ValueConstant>,
}

impl ValueArrayConstant {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_values = reader.read_count()?;
        let mut values = Vec::with_capacity(num_values);
        for _ in 0..num_values {
            values.push(ValueConstant::read(reader)?);
        }
        Ok(Self { values })
    }
}

/// One animation's combined curve set. Streamed and dense parts are always
/// present (either may be empty); the constant part exists for 4.3 and up.
///
/// No cross-validation between the encodings' curve counts happens here; a
/// consumer combining them with the binding resolver matches counts.
#[derive(Clone, Debug)]
pub struct Clip {
    pub streamed_clip: StreamedClip,
    pub dense_clip: DenseClip,
    pub constant_clip: Option<ConstantClip>,
    pub binding: ValueArrayConstant,
}

impl Clip {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let streamed_clip = StreamedClip::read(reader)?;
        let dense_clip = DenseClip::read(reader)?;
        let constant_clip = if reader.version().at_least(4, 3) {
            Some(ConstantClip::read(reader)?)
        } else {
            None
        };
        let binding = ValueArrayConstant::read(reader)?;
        Ok(Self {
            streamed_clip,
            dense_clip,
            constant_clip,
            binding,
        })
    }
}
