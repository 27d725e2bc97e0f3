use crate::UnityVersion;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A read requested more bytes than remain in the stream.
    #[error("truncated data at offset {offset}: wanted {requested} bytes, {remaining} remain")]
    Truncated {
        offset: usize,
        requested: usize,
        remaining: usize,
    },

    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// A packed vector's stored parameters cannot describe valid data
    /// (bit width outside 1..=32, or the bit stream overruns its buffer).
    #[error("malformed packed data: {message}")]
    MalformedPackedData { message: String },

    #[error("version {version} does not support {context}")]
    UnsupportedVersion {
        version: UnityVersion,
        context: &'static str,
    },
}
