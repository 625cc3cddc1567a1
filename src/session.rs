//! Drawing session: the shape list, the live grid and the click state machine
//!
//! A GUI translates pointer clicks into [`Session::click`] calls and menu
//! commands into the other methods here. The session never talks to the GUI
//! except through the [`PixelSink`] it is handed.

use std::fmt;

use crate::algo::{ClipAlgorithm, DrawAlgorithm};
use crate::config::SessionConfig;
use crate::errors::EngineError;
use crate::grid::Grid;
use crate::log;
use crate::pixel::PixelSink;
use crate::shapes::{CircleShape, LineShape, PointShape, Shape};
use crate::types::{Bounds, Pos};

/// What the next click does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Point,
    Line,
    Circle,
    Crop,
}

impl Tool {
    /// Whether the tool needs a second click to complete.
    pub fn is_two_click(self) -> bool {
        !matches!(self, Tool::Point)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Point => "point",
            Tool::Line => "line",
            Tool::Circle => "circle",
            Tool::Crop => "crop",
        })
    }
}

/// Gesture state between clicks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// First click of a two-click tool has landed on `anchor`.
    Pending {
        tool: Tool,
        anchor: Pos,
        /// Anchor pixel value before the preview overwrote it
        previous_value: f64,
    },
}

/// Result of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click of a two-click gesture
    Armed { anchor: Pos },
    /// A shape was added at `index`
    Committed { index: usize },
    /// A crop finished
    Cropped { kept: usize, dropped: usize },
}

/// An interactive drawing session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    shapes: Vec<Shape>,
    tool: Tool,
    interaction: Interaction,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = Grid::try_new(config.rows, config.cols, config.origin)?;
        Ok(Self {
            config,
            grid,
            shapes: Vec::new(),
            tool: Tool::default(),
            interaction: Interaction::Idle,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shapes in insertion (and paint) order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Switch tools. A pending gesture is cancelled.
    pub fn set_tool(&mut self, sink: &mut dyn PixelSink, tool: Tool) {
        if tool != self.tool {
            self.cancel(sink);
            self.tool = tool;
        }
    }

    /// Algorithm used for lines plotted from now on.
    pub fn set_draw_algorithm(&mut self, algo: DrawAlgorithm) {
        self.config.draw_algorithm = algo;
    }

    pub fn set_clip_algorithm(&mut self, algo: ClipAlgorithm) {
        self.config.clip_algorithm = algo;
    }

    /// Feed one click at `at` into the state machine.
    pub fn click(
        &mut self,
        sink: &mut dyn PixelSink,
        at: Pos,
    ) -> Result<ClickOutcome, EngineError> {
        match self.interaction {
            Interaction::Idle if !self.tool.is_two_click() => {
                let index = self.push(sink, PointShape::new(at).into());
                Ok(ClickOutcome::Committed { index })
            }
            Interaction::Idle => {
                let previous_value = self.grid.value(at.x, at.y);
                self.grid
                    .get_pixel(at.x, at.y)
                    .set_value(sink, self.config.preview_value);
                self.interaction = Interaction::Pending {
                    tool: self.tool,
                    anchor: at,
                    previous_value,
                };
                log::debug!(tool = %self.tool, x = at.x, y = at.y, "gesture armed");
                Ok(ClickOutcome::Armed { anchor: at })
            }
            Interaction::Pending { tool, anchor, .. } => {
                self.cancel(sink);
                match tool {
                    Tool::Point | Tool::Line => {
                        let index = self.push(sink, LineShape::new(anchor, at).into());
                        Ok(ClickOutcome::Committed { index })
                    }
                    Tool::Circle => {
                        let index = self.push(sink, CircleShape::from_points(anchor, at).into());
                        Ok(ClickOutcome::Committed { index })
                    }
                    Tool::Crop => {
                        let (kept, dropped) = self.crop(sink, anchor, at)?;
                        Ok(ClickOutcome::Cropped { kept, dropped })
                    }
                }
            }
        }
    }

    /// Drop a pending gesture and restore the previewed anchor pixel.
    pub fn cancel(&mut self, sink: &mut dyn PixelSink) {
        if let Interaction::Pending {
            anchor,
            previous_value,
            ..
        } = self.interaction
        {
            self.grid
                .get_pixel(anchor.x, anchor.y)
                .set_value(sink, previous_value);
            self.interaction = Interaction::Idle;
        }
    }

    /// Commit a shape and plot it. Returns its index.
    pub fn push(&mut self, sink: &mut dyn PixelSink, shape: Shape) -> usize {
        shape.plot(sink, &mut self.grid, self.config.draw_algorithm);
        self.shapes.push(shape);
        log::debug!(%shape, count = self.shapes.len(), "shape committed");
        self.shapes.len() - 1
    }

    /// Forget every shape and start from a blank grid of the same size.
    pub fn reset(&mut self, sink: &mut dyn PixelSink) {
        self.shapes.clear();
        self.interaction = Interaction::Idle;
        self.grid = self.grid.cleared();
        sink.rebuilt(&self.grid);
        log::debug!("session reset");
    }

    /// Swap in a grid of `rows x cols` at the current origin and replay.
    pub fn resize(
        &mut self,
        sink: &mut dyn PixelSink,
        rows: usize,
        cols: usize,
    ) -> Result<(), EngineError> {
        let grid = Grid::try_new(rows, cols, self.grid.origin())?;
        self.install(sink, grid);
        Ok(())
    }

    /// Crop to the rectangle spanned by two corners.
    ///
    /// Every shape is clipped with the selected clip algorithm and the ones
    /// left wholly outside are dropped. The grid is rebuilt to cover exactly
    /// the crop area, with its origin at the lower corner, and survivors are
    /// replayed in order. Returns `(kept, dropped)`.
    pub fn crop(
        &mut self,
        sink: &mut dyn PixelSink,
        a: Pos,
        b: Pos,
    ) -> Result<(usize, usize), EngineError> {
        let bounds = Bounds::from_corners(a, b);
        if bounds.is_empty() {
            return Err(EngineError::EmptyCrop { bounds });
        }
        // spans wider than usize become usize::MAX, which the grid rejects
        let rows = usize::try_from(bounds.height()).unwrap_or(usize::MAX);
        let cols = usize::try_from(bounds.width()).unwrap_or(usize::MAX);
        let grid = Grid::try_new(rows, cols, bounds.min)?;

        let algo = self.config.clip_algorithm;
        let before = self.shapes.len();
        self.shapes = self
            .shapes
            .iter()
            .filter_map(|shape| shape.crop(&bounds, algo))
            .collect();
        let kept = self.shapes.len();

        log::debug!(%bounds, %algo, kept, dropped = before - kept, "crop applied");
        self.install(sink, grid);
        Ok((kept, before - kept))
    }

    /// Apply `f` to every shape, then redraw from scratch.
    pub fn transform_all(&mut self, sink: &mut dyn PixelSink, mut f: impl FnMut(&mut Shape)) {
        self.shapes.iter_mut().for_each(&mut f);
        self.redraw(sink);
    }

    /// Clear the grid and replay every shape.
    pub fn redraw(&mut self, sink: &mut dyn PixelSink) {
        let grid = self.grid.cleared();
        self.install(sink, grid);
    }

    fn install(&mut self, sink: &mut dyn PixelSink, grid: Grid) {
        self.cancel(sink);
        self.grid = grid;
        sink.rebuilt(&self.grid);

        let algo = self.config.draw_algorithm;
        for shape in &self.shapes {
            shape.plot(sink, &mut self.grid, algo);
        }
        log::debug!(shapes = self.shapes.len(), "grid replayed");
    }
}
