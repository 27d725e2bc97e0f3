//! Curve bindings and slot resolution.

use crate::{Error, ObjectReader};

/// Serialized object reference.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PPtr {
    pub file_id: i32,
    pub path_id: i64,
}

impl PPtr {
    /// Path ids widened to 64 bits with the 5.0 format revision.
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let file_id = reader.read_i32()?;
        let path_id = if reader.version().at_least(5, 0) {
            reader.read_i64()?
        } else {
            reader.read_i32()? as i64
        };
        Ok(Self { file_id, path_id })
    }

    pub fn is_null(self) -> bool {
        self.path_id == 0
    }
}

/// Semantic (path, attribute, type) binding for one or more curve slots.
#[derive(Clone, Debug)]
pub struct GenericBinding {
    pub path: u32,
    pub attribute: u32,
    pub script: PPtr,
    pub type_id: i32,
    pub custom_type: u8,
    pub is_pptr_curve: u8,
}

impl GenericBinding {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let path = reader.read_u32()?;
        let attribute = reader.read_u32()?;
        let script = PPtr::read(reader)?;
        // Widened from u16 in 5.6.
        let type_id = if reader.version().at_least(5, 6) {
            reader.read_i32()?
        } else {
            reader.read_u16()? as i32
        };
        let custom_type = reader.read_u8()?;
        let is_pptr_curve = reader.read_u8()?;
        reader.align(4);
        Ok(Self {
            path,
            attribute,
            script,
            type_id,
            custom_type,
            is_pptr_curve,
        })
    }

    /// Number of consecutive curve slots this binding expands to.
    /// Attribute 2 (rotation) takes four, other transform attributes three,
    /// everything else one.
    pub fn curve_width(&self) -> usize {
        if self.attribute == 2 {
            4
        } else if self.attribute <= 4 {
            3
        } else {
            1
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnimationClipBindingConstant {
    pub generic_bindings: Vec<GenericBinding>,
    pub pptr_curve_mapping: Vec<PPtr>,
}

impl AnimationClipBindingConstant {
    pub fn read(reader: &mut ObjectReader) -> Result<Self, Error> {
        let num_bindings = reader.read_count()?;
        let mut generic_bindings = Vec::with_capacity(num_bindings);
        for _ in 0..num_bindings {
            generic_bindings.push(GenericBinding::read(reader)?);
        }

        let num_mappings = reader.read_count()?;
        let mut pptr_curve_mapping = Vec::with_capacity(num_mappings);
        for _ in 0..num_mappings {
            pptr_curve_mapping.push(PPtr::read(reader)?);
        }

        Ok(Self {
            generic_bindings,
            pptr_curve_mapping,
        })
    }

    /// Resolves a flat curve slot to its binding by accumulating each
    /// binding's slot width in list order. `None` means the slot is past
    /// the table: an unbound curve, not a decode error.
    pub fn find_binding(&self, index: usize) -> Option<&GenericBinding> {
        let mut curves = 0usize;
        for binding in &self.generic_bindings {
            curves += binding.curve_width();
            if curves > index {
                return Some(binding);
            }
        }
        None
    }
}
