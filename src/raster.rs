//! Scan conversion: lines (DDA, Bresenham) and circles (midpoint).
//!
//! Each algorithm walks the integer pixels that approximate the primitive
//! and hands them to an `emit` callback in drawing order. Nothing here knows
//! about grids; [`activate`] is the bridge that writes visited pixels.

use std::collections::HashSet;

use glam::DVec2;

use crate::algo::DrawAlgorithm;
use crate::grid::Grid;
use crate::pixel::PixelSink;
use crate::types::{Pos, round_to_grid};

/// Digital differential analyzer.
///
/// Steps `max(|dx|, |dy|)` times with floating-point increments and rounds
/// each sample half-to-even. Emits `steps + 1` pixels including `start`.
pub fn dda_line(start: Pos, end: Pos, mut emit: impl FnMut(Pos)) {
    let (steps, inc) = dda_increment(start, end);

    emit(start);
    if steps == 0 {
        return;
    }

    let mut at: DVec2 = start.as_dvec2();
    for _ in 0..steps {
        at += inc;
        emit(round_to_grid(at));
    }
}

/// Step count and per-step increment, with the delta taken in `i64`.
fn dda_increment(start: Pos, end: Pos) -> (i64, DVec2) {
    let dx = i64::from(end.x) - i64::from(start.x);
    let dy = i64::from(end.y) - i64::from(start.y);
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return (0, DVec2::ZERO);
    }
    (steps, DVec2::new(dx as f64, dy as f64) / steps as f64)
}

/// Bresenham's integer line algorithm.
///
/// Drives on the major axis and steps the minor axis whenever the decision
/// variable is non-negative. Emits `max(|dx|, |dy|) + 1` pixels.
pub fn bresenham_line(start: Pos, end: Pos, mut emit: impl FnMut(Pos)) {
    let dx = i64::from(end.x) - i64::from(start.x);
    let dy = i64::from(end.y) - i64::from(start.y);

    let incrx = if dx >= 0 { 1 } else { -1 };
    let incry = if dy >= 0 { 1 } else { -1 };
    let (dx, dy) = (dx.abs(), dy.abs());

    let (mut x, mut y) = (start.x, start.y);
    emit(start);

    if dy < dx {
        let mut p = 2 * dy - dx;
        let (c1, c2) = (2 * dy, 2 * (dy - dx));
        for _ in 0..dx {
            x += incrx;
            if p < 0 {
                p += c1;
            } else {
                p += c2;
                y += incry;
            }
            emit(Pos::new(x, y));
        }
    } else {
        let mut p = 2 * dx - dy;
        let (c1, c2) = (2 * dx, 2 * (dx - dy));
        for _ in 0..dy {
            y += incry;
            if p < 0 {
                p += c1;
            } else {
                p += c2;
                x += incrx;
            }
            emit(Pos::new(x, y));
        }
    }
}

/// Midpoint (Bresenham) circle.
///
/// Walks one octant from `(0, r)` and mirrors every step into all eight.
/// Each distinct pixel is emitted once, so radius 0 yields only `center`.
pub fn midpoint_circle(center: Pos, radius: i32, mut emit: impl FnMut(Pos)) {
    let radius = radius.max(0);
    let mut seen = HashSet::new();
    let mut plot_octants = |x: i32, y: i32| {
        let mirrored = [
            Pos::new(x, y),
            Pos::new(-x, y),
            Pos::new(x, -y),
            Pos::new(-x, -y),
            Pos::new(y, x),
            Pos::new(-y, x),
            Pos::new(y, -x),
            Pos::new(-y, -x),
        ];
        for offset in mirrored {
            let Some(at) = checked_offset(center, offset) else {
                continue;
            };
            if seen.insert(at) {
                emit(at);
            }
        }
    };

    let (mut x, mut y) = (0i32, radius);
    let mut p = 3 - 2 * i64::from(radius);
    plot_octants(x, y);

    while x < y {
        if p < 0 {
            p += 4 * i64::from(x) + 6;
        } else {
            y -= 1;
            p += 4 * (i64::from(x) - i64::from(y)) + 10;
        }
        x += 1;
        plot_octants(x, y);
    }
}

fn checked_offset(center: Pos, offset: Pos) -> Option<Pos> {
    Some(Pos::new(
        center.x.checked_add(offset.x)?,
        center.y.checked_add(offset.y)?,
    ))
}

/// Run the selected line algorithm.
pub fn line(algo: DrawAlgorithm, start: Pos, end: Pos, emit: impl FnMut(Pos)) {
    match algo {
        DrawAlgorithm::Dda => dda_line(start, end, emit),
        DrawAlgorithm::Bresenham => bresenham_line(start, end, emit),
    }
}

/// Collect the pixels of a line into drawing order.
pub fn line_points(algo: DrawAlgorithm, start: Pos, end: Pos) -> Vec<Pos> {
    let mut out = Vec::new();
    line(algo, start, end, |p| out.push(p));
    out
}

/// Collect the distinct pixels of a circle.
pub fn circle_points(center: Pos, radius: i32) -> Vec<Pos> {
    let mut out = Vec::new();
    midpoint_circle(center, radius, |p| out.push(p));
    out
}

/// Write `value` to every point through the grid's total lookup.
///
/// Points outside the grid land on detached placeholders and are dropped.
pub fn activate(
    points: impl IntoIterator<Item = Pos>,
    grid: &mut Grid,
    sink: &mut dyn PixelSink,
    value: f64,
) {
    for p in points {
        grid.get_pixel(p.x, p.y).set_value(sink, value);
    }
}
