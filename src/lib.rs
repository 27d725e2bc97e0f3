//! Decoder for Unity's versioned AnimationClip binary object format.
//!
//! The format has no fixed schema: field presence, width and numeric
//! representation depend on the producer version tuple attached to the
//! stream. This crate reproduces that conditional layout and reconstructs
//! animation curves from the three curve encodings (dense, constant and
//! delta-encoded streamed), including spline tangent and dropped
//! quaternion-component reconstruction.
//!
//! The decoder is IO-free: callers supply a positioned in-memory byte
//! buffer and the version tuple. Container extraction and scene-graph
//! assembly live outside this crate.

#![forbid(unsafe_code)]

mod animation_clip;
mod binding;
mod clip;
mod curve;
mod error;
mod muscle;
mod packed;
mod reader;
mod streamed;
mod version;

pub use animation_clip::*;
pub use binding::*;
pub use clip::*;
pub use curve::*;
pub use error::*;
pub use muscle::*;
pub use packed::*;
pub use reader::*;
pub use streamed::*;
pub use version::*;

#[cfg(test)]
mod test_support;



#[cfg(test)]
mod streamed_tests;
