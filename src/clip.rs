//! Clipping against a rectangular crop bound.
//!
//! Lines are clipped exactly with Cohen-Sutherland or Liang-Barsky. Points
//! and circles only get a containment / bounding-box overlap test; a circle
//! whose box touches the bound is kept whole.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use glam::{DVec2, IVec2};

use crate::algo::ClipAlgorithm;
use crate::defaults;
use crate::log;
use crate::types::{Bounds, Pos, round_to_grid};

// ============================================================================
// Outcodes
// ============================================================================

/// Cohen-Sutherland region code of a point relative to a bound.
///
/// ```text
///        |        |
///  1001  |  1000  | 1010
///        |        |
/// -------+--------+-------- max.y
///        |        |
///  0001  |  0000  | 0010
///        |        |
/// -------+--------+-------- min.y
///        |        |
///  0101  |  0100  | 0110
///      min.x    max.x
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcode(u8);

impl Outcode {
    pub const INSIDE: Outcode = Outcode(0);
    /// `x < min.x`
    pub const LEFT: Outcode = Outcode(1);
    /// `x > max.x`
    pub const RIGHT: Outcode = Outcode(2);
    /// `y < min.y`
    pub const BOTTOM: Outcode = Outcode(4);
    /// `y > max.y`
    pub const TOP: Outcode = Outcode(8);

    pub fn of(p: Pos, bounds: &Bounds) -> Self {
        let mut code = 0;
        if p.x < bounds.min.x {
            code |= Self::LEFT.0;
        }
        if p.x > bounds.max.x {
            code |= Self::RIGHT.0;
        }
        if p.y < bounds.min.y {
            code |= Self::BOTTOM.0;
        }
        if p.y > bounds.max.y {
            code |= Self::TOP.0;
        }
        Outcode(code)
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, flag: Outcode) -> bool {
        self.0 & flag.0 == flag.0 && flag.0 != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitAnd for Outcode {
    type Output = Outcode;
    fn bitand(self, rhs: Outcode) -> Outcode {
        Outcode(self.0 & rhs.0)
    }
}

impl BitOr for Outcode {
    type Output = Outcode;
    fn bitor(self, rhs: Outcode) -> Outcode {
        Outcode(self.0 | rhs.0)
    }
}

impl fmt::Display for Outcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

// ============================================================================
// Line clipping
// ============================================================================

/// Cohen-Sutherland line clipping.
///
/// Repeatedly moves the first outside endpoint onto the first boundary it
/// violates (left, right, bottom, top) until the segment is trivially
/// accepted or rejected. Intersections are rounded half-to-even.
pub fn cohen_sutherland(start: Pos, end: Pos, bounds: &Bounds) -> Option<(Pos, Pos)> {
    let (mut start, mut end) = (start, end);

    for _ in 0..defaults::CLIP_MAX_ITERATIONS {
        let c1 = Outcode::of(start, bounds);
        let c2 = Outcode::of(end, bounds);

        if c1.is_inside() && c2.is_inside() {
            return Some((start, end));
        }
        if !(c1 & c2).is_inside() {
            return None;
        }

        let out = if c1.is_inside() { c2 } else { c1 };
        let hit = boundary_intersection(start, end, out, bounds);

        if out == c1 {
            start = hit;
        } else {
            end = hit;
        }
    }

    log::warn!(
        x0 = start.x,
        y0 = start.y,
        x1 = end.x,
        y1 = end.y,
        "cohen-sutherland did not converge, treating line as outside"
    );
    None
}

fn boundary_intersection(start: Pos, end: Pos, out: Outcode, bounds: &Bounds) -> Pos {
    let d = end.as_dvec2() - start.as_dvec2();
    let s = start.as_dvec2();
    let min = bounds.min.as_dvec2();
    let max = bounds.max.as_dvec2();

    // Vertical lines have no slope; their x never changes.
    let slope = if d.x != 0.0 { d.y / d.x } else { 0.0 };

    let hit = if out.contains(Outcode::LEFT) {
        DVec2::new(min.x, s.y + (min.x - s.x) * slope)
    } else if out.contains(Outcode::RIGHT) {
        DVec2::new(max.x, s.y + (max.x - s.x) * slope)
    } else if out.contains(Outcode::BOTTOM) {
        let x = if slope != 0.0 { s.x + (min.y - s.y) / slope } else { s.x };
        DVec2::new(x, min.y)
    } else {
        let x = if slope != 0.0 { s.x + (max.y - s.y) / slope } else { s.x };
        DVec2::new(x, max.y)
    };

    round_to_grid(hit)
}

/// Liang-Barsky parametric line clipping.
///
/// Narrows `u1..u2` along `start + u * (end - start)` with one test per
/// boundary, then rebuilds the endpoints that moved.
pub fn liang_barsky(start: Pos, end: Pos, bounds: &Bounds) -> Option<(Pos, Pos)> {
    let dx = i64::from(end.x) - i64::from(start.x);
    let dy = i64::from(end.y) - i64::from(start.y);
    let (sx, sy) = (i64::from(start.x), i64::from(start.y));

    let tests = [
        (-dx, sx - i64::from(bounds.min.x)),
        (dx, i64::from(bounds.max.x) - sx),
        (-dy, sy - i64::from(bounds.min.y)),
        (dy, i64::from(bounds.max.y) - sy),
    ];

    let (mut u1, mut u2) = (0.0f64, 1.0f64);
    for (p, q) in tests {
        if p == 0 {
            if q < 0 {
                return None;
            }
            continue;
        }
        let r = q as f64 / p as f64;
        if p < 0 {
            if r > u2 {
                return None;
            }
            if r > u1 {
                u1 = r;
            }
        } else {
            if r < u1 {
                return None;
            }
            if r < u2 {
                u2 = r;
            }
        }
    }

    let origin = start.as_dvec2();
    let d = DVec2::new(dx as f64, dy as f64);
    let clipped_end = if u2 < 1.0 { round_to_grid(origin + d * u2) } else { end };
    let clipped_start = if u1 > 0.0 { round_to_grid(origin + d * u1) } else { start };

    Some((clipped_start, clipped_end))
}

/// Clip a segment with the selected algorithm.
pub fn clip_line(algo: ClipAlgorithm, start: Pos, end: Pos, bounds: &Bounds) -> Option<(Pos, Pos)> {
    match algo {
        ClipAlgorithm::CohenSutherland => cohen_sutherland(start, end, bounds),
        ClipAlgorithm::LiangBarsky => liang_barsky(start, end, bounds),
    }
}

// ============================================================================
// Point / circle tests
// ============================================================================

/// Half-open containment: `min <= p < max`.
pub fn point_visible(p: Pos, bounds: &Bounds) -> bool {
    bounds.contains(p)
}

/// Whether the circle's axis-aligned bounding box overlaps the bound.
///
/// Coarse: a circle near a corner of the bound is kept even if
/// none of its outline pixels fall inside.
pub fn circle_visible(center: Pos, radius: i32, bounds: &Bounds) -> bool {
    let r = IVec2::splat(radius.max(0));
    bounds.overlaps_box(center.saturating_sub(r), center.saturating_add(r))
}
