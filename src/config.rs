//! Session configuration

use crate::algo::{ClipAlgorithm, DrawAlgorithm};
use crate::defaults;
use crate::errors::EngineError;
use crate::types::Pos;

/// Startup settings for a [`Session`](crate::session::Session)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Absolute coordinate of the grid's top-left cell
    pub origin: Pos,
    pub draw_algorithm: DrawAlgorithm,
    pub clip_algorithm: ClipAlgorithm,
    pub preview_value: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: defaults::GRID_ROWS,
            cols: defaults::GRID_COLS,
            origin: Pos::ZERO,
            draw_algorithm: defaults::DRAW_ALGORITHM,
            clip_algorithm: defaults::CLIP_ALGORITHM,
            preview_value: defaults::PREVIEW_VALUE,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_origin(mut self, origin: Pos) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_draw_algorithm(mut self, algo: DrawAlgorithm) -> Self {
        self.draw_algorithm = algo;
        self
    }

    pub fn with_clip_algorithm(mut self, algo: ClipAlgorithm) -> Self {
        self.clip_algorithm = algo;
        self
    }

    /// Check everything a session needs before it allocates a grid.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(EngineError::InvalidGridSize {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
