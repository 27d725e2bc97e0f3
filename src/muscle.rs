//! Humanoid muscle-space pose and transform records.
//!
//! Translation and scale widths changed from 4- to 3-component in 5.4; the
//! choice is made once per read from the version tuple and therefore holds
//! consistently across every occurrence inside a [`ClipMuscleConstant`].

use crate::{Clip, Error, ObjectReader};
use glam::{Quat, Vec3, Vec4};

/// A vector whose stored width depends on the producer version:
/// 3 components for 5.4 and up, 4 below.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Vec3Or4 {
    Vec3(Vec3),
    Vec4(Vec4),
}

impl Vec3Or4 {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        if reader.version().at_least(5, 4) {
            Ok(Self::Vec3(reader.read_vector3()?))
        } else {
            Ok(Self::Vec4(reader.read_vector4()?))
        }
    }

    /// The first three components, whichever width was stored.
    pub fn xyz(self) -> Vec3 {
        match self {
            Self::Vec3(v) => v,
            Self::Vec4(v) => v.truncate(),
        }
    }
}

/// Translation/rotation/scale transform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Xform {
    pub t: Vec3Or4,
    pub q: Quat,
    pub s: Vec3Or4,
}

impl Xform {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            t: Vec3Or4::read(reader)?,
            q: reader.read_quaternion()?,
            s: Vec3Or4::read(reader)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HandPose {
    pub grab_x: Xform,
    pub dof_array: Vec<f32>,
    pub override_weight: f32,
    pub close_open: f32,
    pub in_out: f32,
    pub grab: f32,
}

impl HandPose {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let grab_x = Xform::read(reader)?;
        let num_dofs = reader.read_count()?;
        let dof_array = reader.read_f32_array(num_dofs)?;
        Ok(Self {
            grab_x,
            dof_array,
            override_weight: reader.read_f32()?,
            close_open: reader.read_f32()?,
            in_out: reader.read_f32()?,
            grab: reader.read_f32()?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HumanGoal {
    pub x: Xform,
    pub weight_t: f32,
    pub weight_r: f32,
    /// 5.0 and up.
    pub hint_t: Option<Vec3Or4>,
    pub hint_weight_t: f32,
}

impl HumanGoal {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let x = Xform::read(reader)?;
        let weight_t = reader.read_f32()?;
        let weight_r = reader.read_f32()?;
        let (hint_t, hint_weight_t) = if reader.version().at_least(5, 0) {
            (Some(Vec3Or4::read(reader)?), reader.read_f32()?)
        } else {
            (None, 0.0)
        };
        Ok(Self {
            x,
            weight_t,
            weight_r,
            hint_t,
            hint_weight_t,
        })
    }
}

#[derive(Clone, Debug)]
pub struct HumanPose {
    pub root_x: Xform,
    pub look_at_position: Vec3Or4,
    pub look_at_weight: Vec4,
    pub goals: Vec<HumanGoal>,
    pub left_hand_pose: HandPose,
    pub right_hand_pose: HandPose,
    pub dof_array: Vec<f32>,
    /// Translation degrees of freedom, 5.2 and up; empty below.
    pub tdof_array: Vec<Vec3Or4>,
}

impl HumanPose {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let root_x = Xform::read(reader)?;
        let look_at_position = Vec3Or4::read(reader)?;
        let look_at_weight = reader.read_vector4()?;

        let num_goals = reader.read_count()?;
        let mut goals = Vec::with_capacity(num_goals);
        for _ in 0..num_goals {
            goals.push(HumanGoal::read(reader)?);
        }

        let left_hand_pose = HandPose::read(reader)?;
        let right_hand_pose = HandPose::read(reader)?;

        let num_dofs = reader.read_count()?;
        let dof_array = reader.read_f32_array(num_dofs)?;

        let mut tdof_array = Vec::new();
        if reader.version().at_least(5, 2) {
            let num_tdofs = reader.read_count()?;
            tdof_array.reserve(num_tdofs);
            for _ in 0..num_tdofs {
                tdof_array.push(Vec3Or4::read(reader)?);
            }
        }

        Ok(Self {
            root_x,
            look_at_position,
            look_at_weight,
            goals,
            left_hand_pose,
            right_hand_pose,
            dof_array,
            tdof_array,
        })
    }
}

/// Per-curve start/stop value pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ValueDelta {
    pub start: f32,
    pub stop: f32,
}

impl ValueDelta {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        Ok(Self {
            start: reader.read_f32()?,
            stop: reader.read_f32()?,
        })
    }
}

/// Humanoid clip constant: the clip itself plus root/feet/motion transforms,
/// the delta pose and the loop/origin handling flags.
#[derive(Clone, Debug)]
pub struct ClipMuscleConstant {
    pub delta_pose: HumanPose,
    pub start_x: Xform,
    /// 5.5 and up.
    pub stop_x: Option<Xform>,
    pub left_foot_start_x: Xform,
    pub right_foot_start_x: Xform,
    /// Below 5.0.
    pub motion_start_x: Option<Xform>,
    /// Below 5.0.
    pub motion_stop_x: Option<Xform>,
    pub average_speed: Vec3Or4,
    pub clip: Clip,
    pub start_time: f32,
    pub stop_time: f32,
    pub orientation_offset_y: f32,
    pub level: f32,
    pub cycle_offset: f32,
    pub average_angular_speed: f32,
    pub index_array: Vec<i32>,
    pub value_array_delta: Vec<ValueDelta>,
    /// 5.3 and up.
    pub value_array_reference_pose: Vec<f32>,
    pub mirror: bool,
    pub loop_time: bool,
    pub loop_blend: bool,
    pub loop_blend_orientation: bool,
    pub loop_blend_position_y: bool,
    pub loop_blend_position_xz: bool,
    /// 5.5 and up; false below.
    pub start_at_origin: bool,
    pub keep_original_orientation: bool,
    pub keep_original_position_y: bool,
    pub keep_original_position_xz: bool,
    pub height_from_feet: bool,
}

impl ClipMuscleConstant {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let version = reader.version();

        let delta_pose = HumanPose::read(reader)?;
        let start_x = Xform::read(reader)?;
        let stop_x = if version.at_least(5, 5) {
            Some(Xform::read(reader)?)
        } else {
            None
        };
        let left_foot_start_x = Xform::read(reader)?;
        let right_foot_start_x = Xform::read(reader)?;
        let (motion_start_x, motion_stop_x) = if version.before(5, 0) {
            (Some(Xform::read(reader)?), Some(Xform::read(reader)?))
        } else {
            (None, None)
        };
        let average_speed = Vec3Or4::read(reader)?;
        let clip = Clip::read(reader)?;

        let start_time = reader.read_f32()?;
        let stop_time = reader.read_f32()?;
        let orientation_offset_y = reader.read_f32()?;
        let level = reader.read_f32()?;
        let cycle_offset = reader.read_f32()?;
        let average_angular_speed = reader.read_f32()?;

        let num_indices = reader.read_count()?;
        let index_array = reader.read_i32_array(num_indices)?;
        if version.before(4, 3) {
            // Additional curve indices: consumed and discarded.
            let num_additional = reader.read_count()?;
            let _ = reader.read_i32_array(num_additional)?;
        }

        let num_deltas = reader.read_count()?;
        let mut value_array_delta = Vec::with_capacity(num_deltas);
        for _ in 0..num_deltas {
            value_array_delta.push(ValueDelta::read(reader)?);
        }
        let value_array_reference_pose = if version.at_least(5, 3) {
            let n = reader.read_count()?;
            reader.read_f32_array(n)?
        } else {
            Vec::new()
        };

        let mirror = reader.read_bool()?;
        let loop_time = reader.read_bool()?;
        let loop_blend = reader.read_bool()?;
        let loop_blend_orientation = reader.read_bool()?;
        let loop_blend_position_y = reader.read_bool()?;
        let loop_blend_position_xz = reader.read_bool()?;
        let start_at_origin = if version.at_least(5, 5) {
            reader.read_bool()?
        } else {
            false
        };
        let keep_original_orientation = reader.read_bool()?;
        let keep_original_position_y = reader.read_bool()?;
        let keep_original_position_xz = reader.read_bool()?;
        let height_from_feet = reader.read_bool()?;
        reader.align(4);

        Ok(Self {
            delta_pose,
            start_x,
            stop_x,
            left_foot_start_x,
            right_foot_start_x,
            motion_start_x,
            motion_stop_x,
            average_speed,
            clip,
            start_time,
            stop_time,
            orientation_offset_y,
            level,
            cycle_offset,
            average_angular_speed,
            index_array,
            value_array_delta,
            value_array_reference_pose,
            mirror,
            loop_time,
            loop_blend,
            loop_blend_orientation,
            loop_blend_position_y,
            loop_blend_position_xz,
            start_at_origin,
            keep_original_orientation,
            keep_original_position_y,
            keep_original_position_xz,
            height_from_feet,
        })
    }
}
