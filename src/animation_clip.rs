//! Top-level AnimationClip object decode.

use crate::{
    Aabb, AnimationClipBindingConstant, ClipMuscleConstant, CompressedAnimationCurve, Endian,
    Error, FloatCurve, ObjectReader, PPtrCurve, QuaternionCurve, UnityVersion, Vector3Curve,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnimationType {
    Legacy = 1,
    Generic = 2,
    Humanoid = 3,
}

impl AnimationType {
    pub fn from_i32(value: i32) -> Result<Self, Error> {
        match value {
            1 => Ok(Self::Legacy),
            2 => Ok(Self::Generic),
            3 => Ok(Self::Humanoid),
            _ => Err(Error::InvalidData {
                message: format!("unknown animation type {value}"),
            }),
        }
    }
}

/// A decoded AnimationClip object.
///
/// Which fields exist in the stream depends on the producer version; absent
/// optional fields decode to `None` or an empty list.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    /// Stored only by 4.x; 5.0 replaced it with the plain `legacy` flag.
    pub animation_type: Option<AnimationType>,
    pub legacy: bool,
    pub compressed: bool,
    /// 4.3 and up.
    pub use_high_quality_curve: bool,
    pub rotation_curves: Vec<QuaternionCurve>,
    pub compressed_rotation_curves: Vec<CompressedAnimationCurve>,
    /// 5.3 and up.
    pub euler_curves: Vec<Vector3Curve>,
    pub position_curves: Vec<Vector3Curve>,
    pub scale_curves: Vec<Vector3Curve>,
    pub float_curves: Vec<FloatCurve>,
    /// 4.3 and up.
    pub pptr_curves: Vec<PPtrCurve>,
    pub sample_rate: f32,
    pub wrap_mode: i32,
    /// 3.4 and up.
    pub bounds: Option<Aabb>,
    /// 4.0 and up.
    pub muscle_clip_size: u32,
    /// 4.0 and up.
    pub muscle_clip: Option<ClipMuscleConstant>,
    /// 4.3 and up.
    pub clip_binding_constant: Option<AnimationClipBindingConstant>,
}

impl AnimationClip {
    pub fn from_bytes(bytes: &[u8], version: UnityVersion, endian: Endian) -> Result<Self, Error> {
        let mut reader = ObjectReader::new(bytes, version, endian);
        Self::read(&mut reader)
    }

    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let version = reader.version();
        let name = reader.read_aligned_string()?;

        let mut animation_type = None;
        let legacy;
        if version.at_least(5, 0) {
            legacy = reader.read_bool()?;
        } else if version.at_least(4, 0) {
            let ty = AnimationType::from_i32(reader.read_i32()?)?;
            legacy = ty == AnimationType::Legacy;
            animation_type = Some(ty);
        } else {
            legacy = true;
        }
        let compressed = reader.read_bool()?;
        let use_high_quality_curve = if version.at_least(4, 3) {
            reader.read_bool()?
        } else {
            false
        };
        reader.align(4);

        let num_rotation = reader.read_count()?;
        let mut rotation_curves = Vec::with_capacity(num_rotation);
        for _ in 0..num_rotation {
            rotation_curves.push(QuaternionCurve::read(reader)?);
        }

        let num_compressed = reader.read_count()?;
        let mut compressed_rotation_curves = Vec::with_capacity(num_compressed);
        for _ in 0..num_compressed {
            compressed_rotation_curves.push(CompressedAnimationCurve::read(reader)?);
        }

        let mut euler_curves = Vec::new();
        if version.at_least(5, 3) {
            let num_euler = reader.read_count()?;
            euler_curves.reserve(num_euler);
            for _ in 0..num_euler {
                euler_curves.push(Vector3Curve::read(reader)?);
            }
        }

        let num_position = reader.read_count()?;
        let mut position_curves = Vec::with_capacity(num_position);
        for _ in 0..num_position {
            position_curves.push(Vector3Curve::read(reader)?);
        }

        let num_scale = reader.read_count()?;
        let mut scale_curves = Vec::with_capacity(num_scale);
        for _ in 0..num_scale {
            scale_curves.push(Vector3Curve::read(reader)?);
        }

        let num_float = reader.read_count()?;
        let mut float_curves = Vec::with_capacity(num_float);
        for _ in 0..num_float {
            float_curves.push(FloatCurve::read(reader)?);
        }

        let mut pptr_curves = Vec::new();
        if version.at_least(4, 3) {
            let num_pptr = reader.read_count()?;
            pptr_curves.reserve(num_pptr);
            for _ in 0..num_pptr {
                pptr_curves.push(PPtrCurve::read(reader)?);
            }
        }

        let sample_rate = reader.read_f32()?;
        let wrap_mode = reader.read_i32()?;
        let bounds = if version.at_least(3, 4) {
            Some(Aabb::read(reader)?)
        } else {
            None
        };

        let (muscle_clip_size, muscle_clip) = if version.at_least(4, 0) {
            (reader.read_u32()?, Some(ClipMuscleConstant::read(reader)?))
        } else {
            (0, None)
        };

        let clip_binding_constant = if version.at_least(4, 3) {
            Some(AnimationClipBindingConstant::read(reader)?)
        } else {
            None
        };

        Ok(Self {
            name,
            animation_type,
            legacy,
            compressed,
            use_high_quality_curve,
            rotation_curves,
            compressed_rotation_curves,
            euler_curves,
            position_curves,
            scale_curves,
            float_curves,
            pptr_curves,
            sample_rate,
            wrap_mode,
            bounds,
            muscle_clip_size,
            muscle_clip,
            clip_binding_constant,
        })
    }
}
