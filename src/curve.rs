//! Keyframed curve primitives.
//!
//! Decoding is a plain sequential scan: a count, then that many keyframes,
//! with value and slope decoding delegated to a per-type read function.
//! Keyframes are kept in file order; time monotonicity is not validated
//! (gaps and out-of-order times are legal wrap-mode constructs).

use crate::{Error, ObjectReader, PPtr, PackedFloatVector, PackedIntVector, PackedQuatVector};
use glam::{Quat, Vec3};

/// Per-type value reader used by [`Keyframe`] and [`AnimationCurve`].
pub type ValueReader<'a, T> = fn(&mut ObjectReader<'a>) -> Result<T, Error>;

#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
    pub in_slope: T,
    pub out_slope: T,
    /// Present for data written by 2018.1 and up.
    pub weight: Option<KeyframeWeight<T>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeWeight<T> {
    pub weighted_mode: i32,
    pub in_weight: T,
    pub out_weight: T,
}

impl<T> Keyframe<T> {
    pub fn read<'a>(
        reader: &mut ObjectReader<'a>,
        read_value: ValueReader<'a, T>,
    ) -> Result<Self, Error> {
        let time = reader.read_f32()?;
        let value = read_value(reader)?;
        let in_slope = read_value(reader)?;
        let out_slope = read_value(reader)?;
        let weight = if reader.version().at_least(2018, 0) {
            Some(KeyframeWeight {
                weighted_mode: reader.read_i32()?,
                in_weight: read_value(reader)?,
                out_weight: read_value(reader)?,
            })
        } else {
            None
        };
        Ok(Self {
            time,
            value,
            in_slope,
            out_slope,
            weight,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationCurve<T> {
    /// Keyframes in file order. Empty means "no animation on this property".
    pub keys: Vec<Keyframe<T>>,
    pub pre_infinity: i32,
    pub post_infinity: i32,
    /// Present for 5.3 and up.
    pub rotation_order: Option<i32>,
}

impl<T> AnimationCurve<T> {
    pub fn read<'a>(
        reader: &mut ObjectReader<'a>,
        read_value: ValueReader<'a, T>,
    ) -> Result<Self, Error> {
        let num_keys = reader.read_count()?;
        let mut keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            keys.push(Keyframe::read(reader, read_value)?);
        }
        let pre_infinity = reader.read_i32()?;
        let post_infinity = reader.read_i32()?;
        let rotation_order = if reader.version().at_least(5, 3) {
            Some(reader.read_i32()?)
        } else {
            None
        };
        Ok(Self {
            keys,
            pre_infinity,
            post_infinity,
            rotation_order,
        })
    }
}

#[derive(Clone, Debug)]
pub struct QuaternionCurve {
    pub curve: AnimationCurve<Quat>,
    pub path: String,
}

impl QuaternionCurve {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            curve: AnimationCurve::read(reader, ObjectReader::read_quaternion)?,
            path: reader.read_aligned_string()?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Vector3Curve {
    pub curve: AnimationCurve<Vec3>,
    pub path: String,
}

impl Vector3Curve {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            curve: AnimationCurve::read(reader, ObjectReader::read_vector3)?,
            path: reader.read_aligned_string()?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct FloatCurve {
    pub curve: AnimationCurve<f32>,
    pub attribute: String,
    pub path: String,
    pub class_id: i32,
    pub script: PPtr,
}

impl FloatCurve {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            curve: AnimationCurve::read(reader, ObjectReader::read_f32)?,
            attribute: reader.read_aligned_string()?,
            path: reader.read_aligned_string()?,
            class_id: reader.read_i32()?,
            script: PPtr::read(reader)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PPtrKeyframe {
    pub time: f32,
    pub value: PPtr,
}

impl PPtrKeyframe {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            time: reader.read_f32()?,
            value: PPtr::read(reader)?,
        })
    }
}

/// Object-reference curve: keys swap whole object references instead of
/// interpolating.
#[derive(Clone, Debug)]
pub struct PPtrCurve {
    pub keys: Vec<PPtrKeyframe>,
    pub attribute: String,
    pub path: String,
    pub class_id: i32,
    pub script: PPtr,
}

impl PPtrCurve {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_keys = reader.read_count()?;
        let mut keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            keys.push(PPtrKeyframe::read(reader)?);
        }
        Ok(Self {
            keys,
            attribute: reader.read_aligned_string()?,
            path: reader.read_aligned_string()?,
            class_id: reader.read_i32()?,
            script: PPtr::read(reader)?,
        })
    }
}

/// Rotation curve with path/time/value/slope streams stored in parallel
/// packed containers instead of per-keyframe records.
#[derive(Clone, Debug)]
pub struct CompressedAnimationCurve {
    pub path: String,
    pub times: PackedIntVector,
    pub values: PackedQuatVector,
    pub slopes: PackedFloatVector,
    pub pre_infinity: i32,
    pub post_infinity: i32,
}

impl CompressedAnimationCurve {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            path: reader.read_aligned_string()?,
            times: PackedIntVector::read(reader)?,
            values: PackedQuatVector::read(reader)?,
            slopes: PackedFloatVector::read(reader)?,
            pre_infinity: reader.read_i32()?,
            post_infinity: reader.read_i32()?,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub extent: Vec3,
}

impl Aabb {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            center: reader.read_vector3()?,
            extent: reader.read_vector3()?,
        })
    }
}
