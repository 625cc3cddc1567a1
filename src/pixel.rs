//! Pixel cells and the render sink they report to.

use crate::grid::Grid;
use crate::types::Pos;

/// Opaque reference to the external render object that displays a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// Receiver for accepted pixel writes.
///
/// The GUI implements this to repaint the cell bound to `handle`. It is
/// called once per accepted write, with the value already clamped.
pub trait PixelSink {
    fn update(&mut self, handle: RenderHandle, value: f64);

    /// Called after a session swaps in a fresh grid, before any shape is
    /// replayed into it. Handles of the old grid are stale from here on.
    fn rebuilt(&mut self, _grid: &Grid) {}
}

/// Sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PixelSink for NullSink {
    fn update(&mut self, _handle: RenderHandle, _value: f64) {}
}

/// Records every update in call order.
impl PixelSink for Vec<(RenderHandle, f64)> {
    fn update(&mut self, handle: RenderHandle, value: f64) {
        self.push((handle, value));
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn update(&mut self, handle: RenderHandle, value: f64) {
        (**self).update(handle, value);
    }

    fn rebuilt(&mut self, grid: &Grid) {
        (**self).rebuilt(grid);
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Pixel {
    pos: Pos,
    value: f64,
    handle: Option<RenderHandle>,
}

impl Pixel {
    /// A pixel with no render handle. Writes to it are ignored.
    pub fn detached(pos: Pos) -> Self {
        Self {
            pos,
            value: 0.0,
            handle: None,
        }
    }

    pub fn bound(pos: Pos, handle: RenderHandle) -> Self {
        Self {
            pos,
            value: 0.0,
            handle: Some(handle),
        }
    }

    pub fn bind(&mut self, handle: RenderHandle) {
        self.handle = Some(handle);
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    /// Current activation, always within `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn handle(&self) -> Option<RenderHandle> {
        self.handle
    }

    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Clamp `value` into `[0, 1]`, store it and notify the sink.
    ///
    /// Unbound pixels ignore the write entirely. A NaN write stores 0.
    pub fn set_value(&mut self, sink: &mut dyn PixelSink, value: f64) {
        let Some(handle) = self.handle else {
            return;
        };
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        sink.update(handle, self.value);
    }
}
