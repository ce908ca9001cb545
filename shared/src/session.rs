//! Drag session and shape store.
//!
//! ```text
//! Idle -> Dragging      begin(p), mode is Rect and p is on the surface
//! Dragging -> Dragging  update(p), preview follows p unclamped
//! Dragging -> Idle      end(p), commits anchor..clamp(p) when mode is Rect
//! Dragging -> Idle      cancel(p), commit or discard per LeavePolicy
//! ```
//!
//! Every other call is a no-op. Any change to what should be on screen
//! repaints the whole surface.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{validate_size, BoardConfig, ConfigError, LeavePolicy, StrokeStyle};
use crate::render::{repaint, Surface};
use crate::store::ShapeList;
use crate::{Point, Shape, Size};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// No drawing tool selected.
    #[default]
    Disabled,
    /// Freehand. Selectable but inert: a freehand stroke is neither a
    /// committed rectangle nor a preview, so it would not survive the next
    /// full repaint, and rectangles are the only kept shape type.
    Free,
    Rect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
        current: Point,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn anchor(&self) -> Option<Point> {
        match self {
            DragState::Dragging { anchor, .. } => Some(*anchor),
            DragState::Idle => None,
        }
    }

    pub fn preview(&self) -> Option<(Point, Point)> {
        match self {
            DragState::Dragging { anchor, current } => Some((*anchor, *current)),
            DragState::Idle => None,
        }
    }
}

pub struct Board<S: Surface> {
    surface: S,
    size: Size,
    style: StrokeStyle,
    leave_policy: LeavePolicy,
    mode: DrawMode,
    drag: DragState,
    shapes: ShapeList,
}

impl<S: Surface> Board<S> {
    /// Builds a board over `surface` and paints it empty.
    pub fn new(surface: S, config: &BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = Self {
            surface,
            size: config.size(),
            style: config.stroke_style(),
            leave_policy: config.leave_policy,
            mode: config.initial_mode,
            drag: DragState::Idle,
            shapes: ShapeList::new(),
        };
        board.repaint();
        Ok(board)
    }

    pub fn shapes(&self) -> &[Shape] {
        self.shapes.as_slice()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn leave_policy(&self) -> LeavePolicy {
        self.leave_policy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Starts a drag at `point`. Returns whether the drag started.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.mode != DrawMode::Rect {
            trace!("begin ignored: mode is {:?}", self.mode);
            return false;
        }
        if self.drag.is_dragging() {
            trace!("begin ignored: drag already active");
            return false;
        }
        if !self.size.contains(point) {
            trace!("begin ignored: ({}, {}) is off the surface", point.x, point.y);
            return false;
        }
        self.drag = DragState::Dragging {
            anchor: point,
            current: point,
        };
        true
    }

    /// Moves the live preview corner to `point`, which may lie off the
    /// surface.
    pub fn update(&mut self, point: Point) {
        if self.mode != DrawMode::Rect {
            return;
        }
        let DragState::Dragging { current, .. } = &mut self.drag else {
            return;
        };
        *current = point;
        self.repaint();
    }

    /// Finishes the drag. In `Rect` mode the release point is clamped onto
    /// the surface and the shape is committed and returned.
    pub fn end(&mut self, point: Point) -> Option<Shape> {
        let DragState::Dragging { anchor, .. } = self.drag else {
            trace!("end ignored: no active drag");
            return None;
        };
        self.drag = DragState::Idle;
        if self.mode != DrawMode::Rect {
            debug!("drag dropped without commit: mode is {:?}", self.mode);
            self.repaint();
            return None;
        }
        let shape = Shape::from_corners(anchor, point.clamp_to(self.size));
        self.shapes.push(shape);
        debug!(
            "committed shape #{} ({}, {}) -> ({}, {})",
            self.shapes.len(),
            shape.start_x,
            shape.start_y,
            shape.end_x,
            shape.end_y
        );
        self.repaint();
        Some(shape)
    }

    /// Pointer left the surface or the touch was cancelled.
    pub fn cancel(&mut self, point: Point) -> Option<Shape> {
        match self.leave_policy {
            LeavePolicy::Commit => self.end(point),
            LeavePolicy::Discard => {
                if self.drag.is_dragging() {
                    debug!("drag discarded");
                    self.drag = DragState::Idle;
                    self.repaint();
                }
                None
            }
        }
    }

    /// Selects the tool used by the next `begin`. An active drag is kept.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn undo(&mut self) -> Option<Shape> {
        let removed = self.shapes.pop();
        if removed.is_some() {
            debug!("undo: {} shapes left", self.shapes.len());
        }
        self.repaint();
        removed
    }

    /// Drops every shape and turns drawing off.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} shapes", self.shapes.len());
        self.shapes.clear();
        self.drag = DragState::Idle;
        self.mode = DrawMode::Disabled;
        self.repaint();
    }

    /// New clamping bounds after the host resized the backing store.
    pub fn set_surface_size(&mut self, size: Size) -> Result<(), ConfigError> {
        validate_size(size)?;
        if self.size != size {
            debug!(
                "surface resized {}x{} -> {}x{}",
                self.size.width, self.size.height, size.width, size.height
            );
            self.size = size;
        }
        self.repaint();
        Ok(())
    }

    pub fn repaint(&mut self) {
        repaint(
            &mut self.surface,
            self.size,
            &self.style,
            self.shapes.as_slice(),
            self.drag.preview(),
        );
    }
}
