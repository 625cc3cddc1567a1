//! Shape types: points, lines and circles on the integer grid
//!
//! Each shape is its own type that knows how to:
//! - Apply affine transforms about an arbitrary origin
//! - Crop itself against a rectangular bound
//! - Rasterize itself into a grid
//!
//! [`Shape`] is the closed union over the three; transforms dispatch through
//! `enum_dispatch`, plotting and cropping through a plain `match`.

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::algo::{ClipAlgorithm, DrawAlgorithm};
use crate::clip;
use crate::defaults;
use crate::errors::EngineError;
use crate::grid::Grid;
use crate::log;
use crate::pixel::PixelSink;
use crate::raster;
use crate::types::{Angle, Bounds, Delta, Pos, ScaleFactor, truncate_to_grid};

/// Affine transforms shared by every shape.
///
/// Every operation except `translate` works relative to `origin`: subtract
/// it, apply the linear map, add it back, then truncate toward zero.
#[enum_dispatch]
pub trait Transform {
    /// Move every defining coordinate by `delta`.
    fn translate(&mut self, delta: Delta);

    /// Rotate counter-clockwise (in a y-up frame) by `angle` around `origin`.
    fn rotate(&mut self, angle: Angle, origin: Pos);

    /// Multiply offsets from `origin` per axis. Never changes a radius.
    fn scale(&mut self, sx: ScaleFactor, sy: ScaleFactor, origin: Pos);

    /// Mirror around `origin`.
    ///
    /// `flip_x` negates the y offset (mirror across the horizontal axis) and
    /// `flip_y` negates the x offset.
    fn reflect(&mut self, flip_x: bool, flip_y: bool, origin: Pos);
}

fn rotate_about(p: Pos, angle: Angle, origin: Pos) -> Pos {
    let rel = p.as_dvec2() - origin.as_dvec2();
    let (sin, cos) = angle.radians().sin_cos();
    let turned = DVec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
    truncate_to_grid(turned + origin.as_dvec2())
}

fn scale_about(p: Pos, sx: ScaleFactor, sy: ScaleFactor, origin: Pos) -> Pos {
    let rel = p.as_dvec2() - origin.as_dvec2();
    let scaled = rel * DVec2::new(sx.raw(), sy.raw());
    truncate_to_grid(scaled + origin.as_dvec2())
}

fn reflect_about(p: Pos, flip_x: bool, flip_y: bool, origin: Pos) -> Pos {
    // 2 * origin - p leaves i32 when p and origin sit far apart
    let mirror = |v: i32, o: i32| {
        let m = 2 * i64::from(o) - i64::from(v);
        m.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    Pos::new(
        if flip_y { mirror(p.x, origin.x) } else { p.x },
        if flip_x { mirror(p.y, origin.y) } else { p.y },
    )
}

fn fmt_pos(p: Pos) -> String {
    format!("({}, {})", p.x, p.y)
}

// ============================================================================
// Shape Types
// ============================================================================

/// A single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointShape {
    pub pos: Pos,
}

impl PointShape {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    pub fn plot(&self, sink: &mut dyn PixelSink, grid: &mut Grid) {
        grid.get_pixel(self.pos.x, self.pos.y)
            .set_value(sink, defaults::ACTIVE_VALUE);
    }

    /// Kept iff `min <= pos < max`.
    pub fn crop(&self, bounds: &Bounds) -> Option<PointShape> {
        clip::point_visible(self.pos, bounds).then_some(*self)
    }
}

impl Transform for PointShape {
    fn translate(&mut self, delta: Delta) {
        self.pos = self.pos.saturating_add(delta);
    }

    fn rotate(&mut self, angle: Angle, origin: Pos) {
        self.pos = rotate_about(self.pos, angle, origin);
    }

    fn scale(&mut self, sx: ScaleFactor, sy: ScaleFactor, origin: Pos) {
        self.pos = scale_about(self.pos, sx, sy, origin);
    }

    fn reflect(&mut self, flip_x: bool, flip_y: bool, origin: Pos) {
        self.pos = reflect_about(self.pos, flip_x, flip_y, origin);
    }
}

impl fmt::Display for PointShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {}", fmt_pos(self.pos))
    }
}

/// A straight segment between two pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShape {
    pub start: Pos,
    pub end: Pos,
}

impl LineShape {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn plot(&self, sink: &mut dyn PixelSink, grid: &mut Grid, algo: DrawAlgorithm) {
        raster::line(algo, self.start, self.end, |p| {
            grid.get_pixel(p.x, p.y).set_value(sink, defaults::ACTIVE_VALUE);
        });
    }

    /// Clip to `bounds`; `None` when no part of the segment survives.
    pub fn crop(&self, bounds: &Bounds, algo: ClipAlgorithm) -> Option<LineShape> {
        clip::clip_line(algo, self.start, self.end, bounds)
            .map(|(start, end)| LineShape { start, end })
    }
}

impl Transform for LineShape {
    fn translate(&mut self, delta: Delta) {
        self.start = self.start.saturating_add(delta);
        self.end = self.end.saturating_add(delta);
    }

    fn rotate(&mut self, angle: Angle, origin: Pos) {
        self.start = rotate_about(self.start, angle, origin);
        self.end = rotate_about(self.end, angle, origin);
    }

    fn scale(&mut self, sx: ScaleFactor, sy: ScaleFactor, origin: Pos) {
        self.start = scale_about(self.start, sx, sy, origin);
        self.end = scale_about(self.end, sx, sy, origin);
    }

    fn reflect(&mut self, flip_x: bool, flip_y: bool, origin: Pos) {
        self.start = reflect_about(self.start, flip_x, flip_y, origin);
        self.end = reflect_about(self.end, flip_x, flip_y, origin);
    }
}

impl fmt::Display for LineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} -> {}", fmt_pos(self.start), fmt_pos(self.end))
    }
}

/// A circle outline. The radius is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleShape {
    pub center: Pos,
    radius: i32,
}

impl CircleShape {
    /// Circle with an explicit radius; negative radii are clamped to 0.
    pub fn new(center: Pos, radius: i32) -> Self {
        Self {
            center,
            radius: radius.max(0),
        }
    }

    /// Circle through `rim`, the way the two-click gesture builds one.
    ///
    /// The radius is the Euclidean distance rounded half-to-even.
    pub fn from_points(center: Pos, rim: Pos) -> Self {
        let dist = (rim - center).as_dvec2().length();
        Self::new(center, dist.round_ties_even() as i32)
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn plot(&self, sink: &mut dyn PixelSink, grid: &mut Grid) {
        raster::midpoint_circle(self.center, self.radius, |p| {
            grid.get_pixel(p.x, p.y).set_value(sink, defaults::ACTIVE_VALUE);
        });
    }

    /// Kept whole iff its bounding box overlaps `bounds`.
    pub fn crop(&self, bounds: &Bounds) -> Option<CircleShape> {
        clip::circle_visible(self.center, self.radius, bounds).then_some(*self)
    }
}

impl Transform for CircleShape {
    fn translate(&mut self, delta: Delta) {
        self.center = self.center.saturating_add(delta);
    }

    fn rotate(&mut self, angle: Angle, origin: Pos) {
        self.center = rotate_about(self.center, angle, origin);
    }

    fn scale(&mut self, sx: ScaleFactor, sy: ScaleFactor, origin: Pos) {
        self.center = scale_about(self.center, sx, sy, origin);
    }

    fn reflect(&mut self, flip_x: bool, flip_y: bool, origin: Pos) {
        self.center = reflect_about(self.center, flip_x, flip_y, origin);
    }
}

impl fmt::Display for CircleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle {} r={}", fmt_pos(self.center), self.radius)
    }
}

// ============================================================================
// Shape Enum
// ============================================================================

/// Discriminant of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    Line,
    Circle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
        })
    }
}

/// Any drawable shape
#[enum_dispatch(Transform)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Point(PointShape),
    Line(LineShape),
    Circle(CircleShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    /// First defining coordinate: position, start point or center.
    pub fn anchor(&self) -> Pos {
        match self {
            Shape::Point(s) => s.pos,
            Shape::Line(s) => s.start,
            Shape::Circle(s) => s.center,
        }
    }

    /// Rasterize into `grid`. Only lines look at `algo`.
    pub fn plot(&self, sink: &mut dyn PixelSink, grid: &mut Grid, algo: DrawAlgorithm) {
        log::trace!(shape = %self, %algo, "plot");
        match self {
            Shape::Point(s) => s.plot(sink, grid),
            Shape::Line(s) => s.plot(sink, grid, algo),
            Shape::Circle(s) => s.plot(sink, grid),
        }
    }

    /// [`Shape::plot`] with a string selector.
    pub fn plot_named(
        &self,
        sink: &mut dyn PixelSink,
        grid: &mut Grid,
        algo: &str,
    ) -> Result<(), EngineError> {
        let algo = algo.parse::<DrawAlgorithm>()?;
        self.plot(sink, grid, algo);
        Ok(())
    }

    /// Crop against `bounds`; `None` when the shape is wholly outside.
    /// Only lines look at `algo`.
    pub fn crop(&self, bounds: &Bounds, algo: ClipAlgorithm) -> Option<Shape> {
        match self {
            Shape::Point(s) => s.crop(bounds).map(Shape::Point),
            Shape::Line(s) => s.crop(bounds, algo).map(Shape::Line),
            Shape::Circle(s) => s.crop(bounds).map(Shape::Circle),
        }
    }

    /// [`Shape::crop`] with a string selector.
    pub fn crop_named(&self, bounds: &Bounds, algo: &str) -> Result<Option<Shape>, EngineError> {
        let algo = algo.parse::<ClipAlgorithm>()?;
        Ok(self.crop(bounds, algo))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Point(s) => s.fmt(f),
            Shape::Line(s) => s.fmt(f),
            Shape::Circle(s) => s.fmt(f),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::NullSink;
    use crate::types::pos;

    fn deg(d: f64) -> Angle {
        Angle::try_degrees(d).unwrap()
    }

    fn factor(v: f64) -> ScaleFactor {
        ScaleFactor::try_new(v).unwrap()
    }

    #[test]
    fn enum_dispatches_transforms() {
        let mut shape: Shape = LineShape::new(pos(0, 0), pos(2, 3)).into();
        shape.translate(pos(1, -1));
        assert_eq!(shape, Shape::Line(LineShape::new(pos(1, -1), pos(3, 2))));
        assert_eq!(shape.kind(), ShapeKind::Line);
    }

    #[test]
    fn translate_moves_every_coordinate() {
        let mut p = PointShape::new(pos(1, 1));
        let mut l = LineShape::new(pos(0, 0), pos(5, 2));
        let mut c = CircleShape::new(pos(3, 3), 4);

        p.translate(pos(2, 3));
        l.translate(pos(2, 3));
        c.translate(pos(2, 3));

        assert_eq!(p.pos, pos(3, 4));
        assert_eq!((l.start, l.end), (pos(2, 3), pos(7, 5)));
        assert_eq!(c.center, pos(5, 6));
        assert_eq!(c.radius(), 4);
    }

    #[test]
    fn rotate_quarter_turn() {
        let mut l = LineShape::new(pos(5, 0), pos(0, 5));
        l.rotate(deg(90.0), Pos::ZERO);
        assert_eq!((l.start, l.end), (pos(0, 5), pos(-5, 0)));
    }

    #[test]
    fn rotate_about_origin_point() {
        let mut p = PointShape::new(pos(12, 10));
        p.rotate(deg(180.0), pos(10, 10));
        assert_eq!(p.pos, pos(8, 10));
    }

    #[test]
    fn rotate_truncates_instead_of_rounding() {
        // 45° puts (10, 0) at (7.07, 7.07)
        let mut p = PointShape::new(pos(10, 0));
        p.rotate(deg(45.0), Pos::ZERO);
        assert_eq!(p.pos, pos(7, 7));

        // (-10, 0) lands on (-7.07, -7.07): toward zero, not down
        let mut q = PointShape::new(pos(-10, 0));
        q.rotate(deg(45.0), Pos::ZERO);
        assert_eq!(q.pos, pos(-7, -7));
    }

    #[test]
    fn circle_rotate_moves_center_only() {
        let mut c = CircleShape::new(pos(4, 0), 3);
        c.rotate(deg(90.0), Pos::ZERO);
        assert_eq!(c.center, pos(0, 4));
        assert_eq!(c.radius(), 3);
    }

    #[test]
    fn scale_is_relative_to_origin() {
        let mut l = LineShape::new(pos(2, 2), pos(4, 6));
        l.scale(factor(2.0), factor(0.5), pos(2, 2));
        assert_eq!((l.start, l.end), (pos(2, 2), pos(6, 4)));
    }

    #[test]
    fn scale_truncates_fractions() {
        let mut p = PointShape::new(pos(3, -3));
        p.scale(factor(1.5), factor(1.5), Pos::ZERO);
        assert_eq!(p.pos, pos(4, -4));
    }

    #[test]
    fn scale_never_changes_circle_radius() {
        let mut c = CircleShape::new(pos(2, 2), 5);
        c.scale(factor(3.0), factor(3.0), Pos::ZERO);
        assert_eq!(c.center, pos(6, 6));
        assert_eq!(c.radius(), 5);
    }

    #[test]
    fn reflect_flag_mapping() {
        // flip_x negates y
        let mut p = PointShape::new(pos(3, 4));
        p.reflect(true, false, Pos::ZERO);
        assert_eq!(p.pos, pos(3, -4));

        // flip_y negates x
        let mut p = PointShape::new(pos(3, 4));
        p.reflect(false, true, Pos::ZERO);
        assert_eq!(p.pos, pos(-3, 4));

        let mut l = LineShape::new(pos(1, 1), pos(3, 2));
        l.reflect(true, true, pos(2, 2));
        assert_eq!((l.start, l.end), (pos(3, 3), pos(1, 2)));
    }

    #[test]
    fn reflect_twice_is_identity() {
        let original = CircleShape::new(pos(-7, 11), 2);
        let mut c = original;
        c.reflect(true, true, pos(4, -1));
        c.reflect(true, true, pos(4, -1));
        assert_eq!(c, original);
    }

    #[test]
    fn circle_radius_from_points() {
        assert_eq!(CircleShape::from_points(pos(0, 0), pos(3, 4)).radius(), 5);
        // sqrt(2) = 1.41
        assert_eq!(CircleShape::from_points(pos(0, 0), pos(1, 1)).radius(), 1);
        // sqrt(5) = 2.24
        assert_eq!(CircleShape::from_points(pos(2, 2), pos(0, 1)).radius(), 2);
        assert_eq!(CircleShape::from_points(pos(2, 2), pos(2, 2)).radius(), 0);
    }

    #[test]
    fn negative_radius_clamps() {
        assert_eq!(CircleShape::new(Pos::ZERO, -4).radius(), 0);
    }

    #[test]
    fn crop_point_half_open() {
        let b = Bounds::new(pos(0, 0), pos(5, 5));
        let inside: Shape = PointShape::new(pos(4, 0)).into();
        let edge: Shape = PointShape::new(pos(5, 0)).into();
        assert_eq!(inside.crop(&b, ClipAlgorithm::default()), Some(inside));
        assert_eq!(edge.crop(&b, ClipAlgorithm::default()), None);
    }

    #[test]
    fn crop_line_replaces_endpoints() {
        let b = Bounds::new(pos(0, 0), pos(10, 10));
        let line: Shape = LineShape::new(pos(-5, 5), pos(15, 5)).into();
        let expected = Some(Shape::Line(LineShape::new(pos(0, 5), pos(10, 5))));
        assert_eq!(line.crop(&b, ClipAlgorithm::CohenSutherland), expected);
        assert_eq!(line.crop(&b, ClipAlgorithm::LiangBarsky), expected);
    }

    #[test]
    fn crop_named_rejects_unknown_algorithm() {
        let b = Bounds::new(pos(0, 0), pos(10, 10));
        let line: Shape = LineShape::new(pos(0, 0), pos(1, 1)).into();
        assert_eq!(
            line.crop_named(&b, "nicholl-lee-nicholl"),
            Err(EngineError::UnknownClipAlgorithm {
                name: "nicholl-lee-nicholl".to_string()
            })
        );
        assert_eq!(line.crop_named(&b, "liang-barsky"), Ok(Some(line)));
    }

    #[test]
    fn plot_named_rejects_unknown_algorithm() {
        let mut grid = Grid::try_new(4, 4, Pos::ZERO).unwrap();
        let line: Shape = LineShape::new(pos(0, 0), pos(3, 0)).into();

        let err = line.plot_named(&mut NullSink, &mut grid, "xiaolin-wu");
        assert!(matches!(err, Err(EngineError::UnknownDrawAlgorithm { .. })));
        assert!(grid.active_positions().is_empty());

        line.plot_named(&mut NullSink, &mut grid, "bresenham").unwrap();
        assert_eq!(grid.active_positions().len(), 4);
    }

    #[test]
    fn point_and_circle_ignore_line_algorithm() {
        let mut a = Grid::try_new(9, 9, Pos::ZERO).unwrap();
        let mut b = Grid::try_new(9, 9, Pos::ZERO).unwrap();
        let circle: Shape = CircleShape::new(pos(4, 4), 3).into();
        circle.plot(&mut NullSink, &mut a, DrawAlgorithm::Dda);
        circle.plot(&mut NullSink, &mut b, DrawAlgorithm::Bresenham);
        assert_eq!(a, b);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Shape::from(PointShape::new(pos(1, 2))).to_string(), "Point (1, 2)");
        assert_eq!(
            Shape::from(LineShape::new(pos(0, 0), pos(3, -1))).to_string(),
            "Line (0, 0) -> (3, -1)"
        );
        assert_eq!(
            Shape::from(CircleShape::new(pos(5, 5), 2)).to_string(),
            "Circle (5, 5) r=2"
        );
    }

    #[test]
    fn degenerate_line_plots_single_pixel() {
        let line = LineShape::new(pos(2, 2), pos(2, 2));
        assert!(line.is_degenerate());
        let mut grid = Grid::try_new(4, 4, Pos::ZERO).unwrap();
        line.plot(&mut NullSink, &mut grid, DrawAlgorithm::Bresenham);
        assert_eq!(grid.active_positions(), vec![pos(2, 2)]);
    }

    #[test]
    fn transforms_saturate_at_the_coordinate_edge() {
        let mut p = Shape::from(PointShape::new(pos(i32::MAX - 1, 0)));
        p.translate(pos(5, 0));
        assert_eq!(p.anchor(), pos(i32::MAX, 0));

        let mut far = Shape::from(PointShape::new(pos(i32::MIN, 3)));
        far.reflect(false, true, pos(i32::MAX, 0));
        assert_eq!(far.anchor(), pos(i32::MAX, 3));

        let mut turned = Shape::from(PointShape::new(pos(i32::MIN, 0)));
        turned.rotate(deg(180.0), pos(i32::MAX, 0));
        assert_eq!(turned.anchor(), pos(i32::MAX, 0));
    }
}
