//! Producer version tuple attached to serialized Unity data.
//!
//! Field presence and field width throughout the format are decided by
//! comparing this tuple against fixed boundaries ("5.4 and up", "4.3 and
//! down"). Comparisons are lexicographic over all four components.

use crate::Error;
use std::fmt;

/// The 4-component version of the engine that wrote the data.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UnityVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl UnityVersion {
    pub const ZERO: UnityVersion = UnityVersion::new(0, 0, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// True for "`major.minor` and up" gates.
    pub fn at_least(self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// True for "below `major.minor`" gates.
    pub fn before(self, major: u32, minor: u32) -> bool {
        !self.at_least(major, minor)
    }

    /// Parses an engine version string such as `5.6.3f1` or `2019.4.16f1`.
    ///
    /// Numeric runs are taken in order; missing components are zero. The
    /// release-type letter (`f`, `p`, `b`, ...) is skipped, so `5.6.3f1`
    /// parses as `(5, 6, 3, 1)`.
    pub fn parse(value: &str) -> Result<Self, Error> {
        let mut components = [0u32; 4];
        let mut seen = 0usize;
        for run in value.split(|c: char| !c.is_ascii_digit()) {
            if run.is_empty() {
                continue;
            }
            if seen == components.len() {
                break;
            }
            components[seen] = run.parse().map_err(|_| Error::InvalidData {
                message: format!("unparseable version string {value:?}"),
            })?;
            seen += 1;
        }
        if seen == 0 {
            return Err(Error::InvalidData {
                message: format!("version string {value:?} has no numeric components"),
            });
        }
        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl From<(u32, u32, u32, u32)> for UnityVersion {
    fn from((major, minor, patch, build): (u32, u32, u32, u32)) -> Self {
        Self::new(major, minor, patch, build)
    }
}

impl fmt::Display for UnityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}
