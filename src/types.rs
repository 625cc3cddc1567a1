//! Strongly-typed primitives for the engine.
//!
//! Grid coordinates are integer `IVec2`s. Floating-point values only appear
//! as intermediate transform math and are converted back through the two
//! explicit helpers here (`truncate_to_grid`, `round_to_grid`).

use std::fmt;

use glam::{DVec2, IVec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// An absolute grid coordinate.
pub type Pos = IVec2;

/// A displacement between grid coordinates.
pub type Delta = IVec2;

/// Shorthand constructor for a grid coordinate.
#[inline]
pub const fn pos(x: i32, y: i32) -> Pos {
    IVec2::new(x, y)
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an angle with validation (rejects NaN/infinite)
    pub fn try_degrees(deg: f64) -> Result<Angle, NumericError> {
        check_finite(deg).map(Angle)
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Per-axis multiplier used by `scale`. Negative values mirror.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub const ONE: ScaleFactor = ScaleFactor(1.0);

    /// Create a scale factor with validation (rejects NaN/infinite)
    pub fn try_new(val: f64) -> Result<ScaleFactor, NumericError> {
        check_finite(val).map(ScaleFactor)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        ScaleFactor::ONE
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Convert float coordinates back to the grid by truncating toward zero.
///
/// Rotation and scaling go through this, so repeated rotation drifts toward
/// the axes instead of wobbling around the exact position.
#[inline]
pub fn truncate_to_grid(v: DVec2) -> Pos {
    IVec2::new(v.x.trunc() as i32, v.y.trunc() as i32)
}

/// Convert float coordinates to the grid with round-half-to-even.
#[inline]
pub fn round_to_grid(v: DVec2) -> Pos {
    IVec2::new(v.x.round_ties_even() as i32, v.y.round_ties_even() as i32)
}

/// Rectangular crop bound with corners `min` and `max`.
///
/// Points and circles treat it as half-open (`min <= p < max`); the line
/// clippers treat `max` as an inclusive edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    pub const fn new(min: Pos, max: Pos) -> Self {
        Bounds { min, max }
    }

    /// Build a bound from two arbitrary opposite corners.
    pub fn from_corners(a: Pos, b: Pos) -> Self {
        Bounds {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> i64 {
        i64::from(self.max.x) - i64::from(self.min.x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max.y) - i64::from(self.min.y)
    }

    /// True when the half-open area is empty on either axis.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Half-open containment: `min <= p < max` on both axes.
    pub fn contains(&self, p: Pos) -> bool {
        p.cmpge(self.min).all() && p.cmplt(self.max).all()
    }

    /// Whether the closed box `[lo, hi]` overlaps the half-open bound.
    pub fn overlaps_box(&self, lo: Pos, hi: Pos) -> bool {
        lo.cmplt(self.max).all() && hi.cmpge(self.min).all()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {}))",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Angle / ScaleFactor ====================

    #[test]
    fn angle_rejects_nan() {
        assert_eq!(Angle::try_degrees(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn angle_rejects_infinity() {
        assert_eq!(Angle::try_degrees(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn angle_radians() {
        let a = Angle::try_degrees(180.0).unwrap();
        assert!((a.radians() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn scale_factor_validation() {
        assert!(ScaleFactor::try_new(-2.5).is_ok());
        assert_eq!(ScaleFactor::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(ScaleFactor::default(), ScaleFactor::ONE);
    }

    // ==================== Grid conversions ====================

    #[test]
    fn truncation_goes_toward_zero() {
        assert_eq!(truncate_to_grid(DVec2::new(2.9, -2.9)), pos(2, -2));
        assert_eq!(truncate_to_grid(DVec2::new(-0.5, 0.99)), pos(0, 0));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_to_grid(DVec2::new(0.5, 1.5)), pos(0, 2));
        assert_eq!(round_to_grid(DVec2::new(2.5, -2.5)), pos(2, -2));
        assert_eq!(round_to_grid(DVec2::new(2.6, -2.4)), pos(3, -2));
    }

    // ==================== Bounds ====================

    #[test]
    fn bounds_from_corners_normalizes() {
        let b = Bounds::from_corners(pos(10, 2), pos(3, 8));
        assert_eq!(b.min, pos(3, 2));
        assert_eq!(b.max, pos(10, 8));
        assert_eq!(b.width(), 7);
        assert_eq!(b.height(), 6);
    }

    #[test]
    fn bounds_span_the_full_coordinate_range() {
        let b = Bounds::from_corners(pos(i32::MIN, i32::MAX), pos(i32::MAX, i32::MIN));
        assert_eq!(b.width(), i64::from(u32::MAX));
        assert_eq!(b.height(), i64::from(u32::MAX));
        assert!(!b.is_empty());
    }

    #[test]
    fn bounds_contains_is_half_open() {
        let b = Bounds::new(pos(0, 0), pos(10, 10));
        assert!(b.contains(pos(0, 0)));
        assert!(b.contains(pos(9, 9)));
        assert!(!b.contains(pos(10, 5)));
        assert!(!b.contains(pos(5, 10)));
        assert!(!b.contains(pos(-1, 5)));
    }

    #[test]
    fn bounds_empty() {
        assert!(Bounds::new(pos(0, 0), pos(0, 5)).is_empty());
        assert!(!Bounds::new(pos(0, 0), pos(1, 1)).is_empty());
    }

    #[test]
    fn bounds_overlap_box() {
        let b = Bounds::new(pos(0, 0), pos(4, 4));
        assert!(b.overlaps_box(pos(2, 2), pos(8, 8)));
        assert!(!b.overlaps_box(pos(4, 0), pos(8, 3)));
        assert!(b.overlaps_box(pos(-3, -3), pos(0, 0)));
    }
}
