//! The pixel grid: a dense, bounded cell store with an origin offset.
//!
//! Out-of-range lookups never fail. They hand back a detached placeholder
//! pixel whose writes go nowhere, so rasterizers can emit coordinates
//! without bounds checks of their own.

use std::fmt;
use std::ops::{Deref, DerefMut};

use glam::IVec2;

use crate::errors::EngineError;
use crate::log;
use crate::pixel::{Pixel, PixelSink, RenderHandle};
use crate::types::{Bounds, Pos};

/// Result of [`Grid::get_pixel`]: either a cell owned by the grid or a
/// throwaway placeholder for a coordinate outside it.
#[derive(Debug)]
pub enum PixelSlot<'a> {
    Owned(&'a mut Pixel),
    Detached(Pixel),
}

impl PixelSlot<'_> {
    /// Convenience for the common "write one value" case.
    pub fn set_value(&mut self, sink: &mut dyn PixelSink, value: f64) {
        self.deref_mut().set_value(sink, value);
    }
}

impl Deref for PixelSlot<'_> {
    type Target = Pixel;

    fn deref(&self) -> &Pixel {
        match self {
            PixelSlot::Owned(px) => px,
            PixelSlot::Detached(px) => px,
        }
    }
}

impl DerefMut for PixelSlot<'_> {
    fn deref_mut(&mut self) -> &mut Pixel {
        match self {
            PixelSlot::Owned(px) => px,
            PixelSlot::Detached(px) => px,
        }
    }
}

/// Rectangular grid of pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    origin: Pos,
    cells: Vec<Pixel>,
}

impl Grid {
    /// Allocate `rows x cols` pixels whose top-left cell sits at `origin`.
    ///
    /// Every cell is bound to a render handle equal to its row-major index.
    pub fn try_new(rows: usize, cols: usize, origin: Pos) -> Result<Self, EngineError> {
        let (Ok(height), Ok(width)) = (i32::try_from(rows), i32::try_from(cols)) else {
            return Err(EngineError::InvalidGridSize { rows, cols });
        };
        // the last row and column must still have representable coordinates
        let last_x = i64::from(origin.x) + i64::from(width) - 1;
        let last_y = i64::from(origin.y) + i64::from(height) - 1;
        if rows == 0
            || cols == 0
            || i32::try_from(last_x).is_err()
            || i32::try_from(last_y).is_err()
        {
            return Err(EngineError::InvalidGridSize { rows, cols });
        }

        log::debug!(rows, cols, x = origin.x, y = origin.y, "grid allocated");
        Ok(Self::build(rows, cols, origin))
    }

    fn build(rows: usize, cols: usize, origin: Pos) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let at = origin + IVec2::new(col as i32, row as i32);
                let handle = RenderHandle((row * cols + col) as u32);
                cells.push(Pixel::bound(at, handle));
            }
        }
        Self {
            rows,
            cols,
            origin,
            cells,
        }
    }

    /// A blank grid with the same size and origin.
    pub fn cleared(&self) -> Self {
        Self::build(self.rows, self.cols, self.origin)
    }

    /// Number of rows (height)
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Number of columns (width)
    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    /// The half-open coordinate area this grid owns.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.origin,
            self.origin
                .saturating_add(IVec2::new(self.cols as i32, self.rows as i32)),
        )
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let col = i64::from(x) - i64::from(self.origin.x);
        let row = i64::from(y) - i64::from(self.origin.y);
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Total lookup: the owned pixel, or a detached placeholder.
    pub fn get_pixel(&mut self, x: i32, y: i32) -> PixelSlot<'_> {
        match self.index(x, y) {
            Some(idx) => PixelSlot::Owned(&mut self.cells[idx]),
            None => PixelSlot::Detached(Pixel::detached(Pos::new(x, y))),
        }
    }

    /// Read-only lookup that makes absence explicit.
    pub fn pixel(&self, x: i32, y: i32) -> Option<&Pixel> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut Pixel> {
        self.index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// Activation of `(x, y)`, or 0 outside the grid.
    pub fn value(&self, x: i32, y: i32) -> f64 {
        self.pixel(x, y).map_or(0.0, Pixel::value)
    }

    /// Pixels in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Pixel> {
        self.cells.iter()
    }

    /// Coordinates of every pixel with a nonzero activation, row-major.
    pub fn active_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .filter(|px| px.value() > 0.0)
            .map(Pixel::pos)
            .collect()
    }

    /// Text rendering: `#` for full, `+` for partial, `.` for empty cells.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            for px in row {
                let c = match px.value() {
                    v if v >= 1.0 => '#',
                    v if v > 0.0 => '+',
                    _ => '.',
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::build(crate::defaults::GRID_ROWS, crate::defaults::GRID_COLS, Pos::ZERO)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = self.origin;
        writeln!(f, "grid {}x{} at ({}, {})", self.cols, self.rows, origin.x, origin.y)?;
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::NullSink;
    use crate::types::pos;

    #[test]
    fn zero_sized_grid_is_rejected() {
        assert_eq!(
            Grid::try_new(0, 5, Pos::ZERO),
            Err(EngineError::InvalidGridSize { rows: 0, cols: 5 })
        );
        assert!(Grid::try_new(3, 0, Pos::ZERO).is_err());
    }

    #[test]
    fn pixels_carry_absolute_coordinates() {
        let grid = Grid::try_new(2, 3, pos(10, -4)).unwrap();
        let coords: Vec<Pos> = grid.iter().map(Pixel::pos).collect();
        assert_eq!(
            coords,
            vec![pos(10, -4), pos(11, -4), pos(12, -4), pos(10, -3), pos(11, -3), pos(12, -3)]
        );
        assert_eq!(grid.bounds(), Bounds::new(pos(10, -4), pos(13, -2)));
    }

    #[test]
    fn handles_are_row_major_indices() {
        let grid = Grid::try_new(2, 3, pos(5, 5)).unwrap();
        assert_eq!(grid.pixel(5, 5).and_then(Pixel::handle), Some(RenderHandle(0)));
        assert_eq!(grid.pixel(7, 6).and_then(Pixel::handle), Some(RenderHandle(5)));
    }

    #[test]
    fn get_pixel_inside_is_owned() {
        let mut grid = Grid::try_new(4, 4, Pos::ZERO).unwrap();
        grid.get_pixel(2, 3).set_value(&mut NullSink, 1.0);
        assert_eq!(grid.value(2, 3), 1.0);
        assert_eq!(grid.active_positions(), vec![pos(2, 3)]);
    }

    #[test]
    fn get_pixel_outside_is_detached() {
        let mut grid = Grid::try_new(4, 4, Pos::ZERO).unwrap();
        let mut sink: Vec<(RenderHandle, f64)> = Vec::new();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            let mut slot = grid.get_pixel(x, y);
            assert!(matches!(slot, PixelSlot::Detached(_)));
            assert_eq!(slot.pos(), pos(x, y));
            slot.set_value(&mut sink, 1.0);
        }

        assert!(sink.is_empty());
        assert!(grid.active_positions().is_empty());
    }

    #[test]
    fn origin_offset_shifts_ownership() {
        let grid = Grid::try_new(3, 3, pos(5, 5)).unwrap();
        assert!(!grid.contains(0, 0));
        assert!(grid.contains(5, 5));
        assert!(grid.contains(7, 7));
        assert!(!grid.contains(8, 7));
    }

    #[test]
    fn default_grid_matches_defaults() {
        let grid = Grid::default();
        assert_eq!(grid.width(), crate::defaults::GRID_COLS);
        assert_eq!(grid.height(), crate::defaults::GRID_ROWS);
        let rebuilt = Grid::try_new(
            crate::defaults::GRID_ROWS,
            crate::defaults::GRID_COLS,
            Pos::ZERO,
        )
        .unwrap();
        assert_eq!(grid, rebuilt);
    }

    #[test]
    fn grid_must_fit_in_coordinate_space() {
        let err = Grid::try_new(1, 3, pos(i32::MAX - 1, 0)).unwrap_err();
        assert_eq!(err, EngineError::InvalidGridSize { rows: 1, cols: 3 });
        assert!(Grid::try_new(1, 2, pos(i32::MAX - 1, 0)).is_ok());
        assert!(Grid::try_new(2, 1, pos(0, i32::MAX)).is_err());
    }

    #[test]
    fn cleared_keeps_geometry() {
        let mut grid = Grid::try_new(3, 2, pos(1, 1)).unwrap();
        grid.get_pixel(1, 1).set_value(&mut NullSink, 1.0);
        let blank = grid.cleared();
        assert_eq!(blank.origin(), pos(1, 1));
        assert_eq!((blank.height(), blank.width()), (3, 2));
        assert!(blank.active_positions().is_empty());
    }

    #[test]
    fn ascii_marks_partial_values() {
        let mut grid = Grid::try_new(2, 3, Pos::ZERO).unwrap();
        grid.get_pixel(0, 0).set_value(&mut NullSink, 1.0);
        grid.get_pixel(2, 1).set_value(&mut NullSink, 0.5);
        assert_eq!(grid.to_ascii(), "#..\n..+\n");
    }
}
