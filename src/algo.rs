//! Algorithm selectors.
//!
//! Both selectors are string-like: they parse from and display as the
//! lowercase names a UI menu would carry. Unknown names are errors, never a
//! silent fallback to the default.

use std::fmt;
use std::str::FromStr;

use crate::errors::EngineError;

/// Line scan-conversion algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawAlgorithm {
    /// Digital differential analyzer (floating-point stepping)
    #[default]
    Dda,
    /// Integer error accumulation
    Bresenham,
}

impl DrawAlgorithm {
    pub const ALL: [DrawAlgorithm; 2] = [DrawAlgorithm::Dda, DrawAlgorithm::Bresenham];

    pub fn as_str(self) -> &'static str {
        match self {
            DrawAlgorithm::Dda => "dda",
            DrawAlgorithm::Bresenham => "bresenham",
        }
    }
}

impl FromStr for DrawAlgorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dda" => Ok(DrawAlgorithm::Dda),
            "bresenham" => Ok(DrawAlgorithm::Bresenham),
            other => Err(EngineError::UnknownDrawAlgorithm {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DrawAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line clipping algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipAlgorithm {
    /// Region outcodes with repeated boundary intersection
    #[default]
    CohenSutherland,
    /// Parametric clipping along the segment
    LiangBarsky,
}

impl ClipAlgorithm {
    pub const ALL: [ClipAlgorithm; 2] =
        [ClipAlgorithm::CohenSutherland, ClipAlgorithm::LiangBarsky];

    pub fn as_str(self) -> &'static str {
        match self {
            ClipAlgorithm::CohenSutherland => "cohen-sutherland",
            ClipAlgorithm::LiangBarsky => "liang-barsky",
        }
    }
}

impl FromStr for ClipAlgorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cohen-sutherland" => Ok(ClipAlgorithm::CohenSutherland),
            "liang-barsky" => Ok(ClipAlgorithm::LiangBarsky),
            other => Err(EngineError::UnknownClipAlgorithm {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
