//! Shared helpers for building synthetic little-endian object records.

use crate::{Endian, ObjectReader, UnityVersion};

/// Little-endian byte buffer builder mirroring the writer side of the
/// format closely enough for tests.
#[derive(Default)]
pub(crate) struct Buf {
    pub bytes: Vec<u8>,
}

impl Buf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.u8(v as u8)
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32s(&mut self, vs: &[f32]) -> &mut Self {
        for &v in vs {
            self.f32(v);
        }
        self
    }

    pub fn raw(&mut self, vs: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(vs);
        self
    }

    pub fn align4(&mut self) -> &mut Self {
        while self.bytes.len() % 4 != 0 {
            self.bytes.push(0);
        }
        self
    }

    /// Length-prefixed UTF-8 string padded to a 4-byte boundary.
    pub fn aligned_string(&mut self, s: &str) -> &mut Self {
        self.i32(s.len() as i32);
        self.raw(s.as_bytes());
        self.align4()
    }

    pub fn reader(&self, version: UnityVersion) -> ObjectReader<'_> {
        ObjectReader::new(&self.bytes, version, Endian::Little)
    }
}

pub(crate) fn assert_approx(a: f32, b: f32, eps: f32, ctx: &str) {
    if (a - b).abs() > eps {
        panic!("{ctx}: expected {b}, got {a} (diff {})", (a - b).abs());
    }
}
