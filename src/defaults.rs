//! Default sizes and settings

use crate::algo::{ClipAlgorithm, DrawAlgorithm};

pub const GRID_ROWS: usize = 25;
pub const GRID_COLS: usize = 25;
pub const DRAW_ALGORITHM: DrawAlgorithm = DrawAlgorithm::Dda;
pub const CLIP_ALGORITHM: ClipAlgorithm = ClipAlgorithm::CohenSutherland;
/// Value written for every rasterized pixel.
pub const ACTIVE_VALUE: f64 = 1.0;
/// Value shown on the anchor pixel while a two-click gesture is pending.
pub const PREVIEW_VALUE: f64 = 0.5;
/// Cohen-Sutherland converges in at most four boundary replacements; the
/// cap only trips if rounding ever ping-pongs an endpoint.
pub const CLIP_MAX_ITERATIONS: usize = 8;
