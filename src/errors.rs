//! Error types with diagnostics using miette
//!
//! The engine has exactly one fatal condition per call site: a selector or
//! parameter it cannot act on. Degenerate geometry and out-of-grid writes are
//! not errors.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::{Bounds, NumericError};

/// Errors surfaced by the engine and the drawing session
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("unknown line drawing algorithm: {name:?}")]
    #[diagnostic(
        code(gridpaint::algo::unknown_draw),
        help("expected one of: dda, bresenham")
    )]
    UnknownDrawAlgorithm { name: String },

    #[error("unknown line clipping algorithm: {name:?}")]
    #[diagnostic(
        code(gridpaint::algo::unknown_clip),
        help("expected one of: cohen-sutherland, liang-barsky")
    )]
    UnknownClipAlgorithm { name: String },

    #[error("invalid grid size: {rows} rows x {cols} cols")]
    #[diagnostic(
        code(gridpaint::grid::invalid_size),
        help("both dimensions must be at least 1")
    )]
    InvalidGridSize { rows: usize, cols: usize },

    #[error("crop area {bounds} is empty")]
    #[diagnostic(
        code(gridpaint::session::empty_crop),
        help("pick two corners that differ on both axes")
    )]
    EmptyCrop { bounds: Bounds },

    #[error("invalid transform parameter")]
    #[diagnostic(code(gridpaint::shape::invalid_transform))]
    InvalidTransform {
        #[from]
        source: NumericError,
    },
}
