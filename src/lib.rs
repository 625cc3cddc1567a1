//! Integer raster geometry for interactive drawing tools.
//!
//! A [`Grid`] of [`Pixel`]s is painted by rasterizing [`Shape`]s (points,
//! lines, circles). Shapes can be translated, rotated, scaled and reflected,
//! and cropped against a rectangle with Cohen-Sutherland or Liang-Barsky.
//! A [`Session`] ties it together behind a click-driven state machine and
//! reports every accepted pixel write to a caller-supplied [`PixelSink`].
//!
//! ```
//! use gridpaint::{NullSink, Session, SessionConfig, Tool, pos};
//!
//! let mut session = Session::new(SessionConfig::new().with_size(5, 5))?;
//! session.set_tool(&mut NullSink, Tool::Line);
//! session.click(&mut NullSink, pos(0, 0))?;
//! session.click(&mut NullSink, pos(4, 4))?;
//! assert_eq!(session.grid().active_positions().len(), 5);
//! # Ok::<(), gridpaint::EngineError>(())
//! ```

pub mod algo;
pub mod clip;
pub mod config;
pub mod defaults;
pub mod errors;
pub mod grid;
pub mod log;
pub mod pixel;
pub mod raster;
pub mod session;
pub mod shapes;
pub mod types;

pub use algo::{ClipAlgorithm, DrawAlgorithm};
pub use config::SessionConfig;
pub use errors::EngineError;
pub use grid::{Grid, PixelSlot};
pub use pixel::{NullSink, Pixel, PixelSink, RenderHandle};
pub use session::{ClickOutcome, Interaction, Session, Tool};
pub use shapes::{CircleShape, LineShape, PointShape, Shape, ShapeKind, Transform};
pub use types::{Angle, Bounds, Delta, NumericError, Pos, ScaleFactor, pos};
