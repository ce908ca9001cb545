use serde::{Deserialize, Serialize};

pub mod config;
pub mod mapper;
pub mod render;
pub mod session;
pub mod store;

pub use config::{BoardConfig, ConfigError, LeavePolicy, StrokeStyle};
pub use mapper::{map_event, BoundingBox, PointerSource};
pub use render::{repaint, DrawOp, RecordingSurface, Surface};
pub use session::{Board, DragState, DrawMode};
pub use store::ShapeList;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps each axis independently into `[0, width] × [0, height]`.
    pub fn clamp_to(self, size: Size) -> Self {
        Self {
            x: clamp_axis(self.x, size.width),
            y: clamp_axis(self.y, size.height),
        }
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    value.max(0.0).min(max)
}

/// Intrinsic backing size of the drawing surface, in pixels.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// An axis-aligned rectangle given by two opposite corners.
///
/// The corners are kept as drawn: `end` may lie above or left of `start`, so
/// [`Shape::width`] and [`Shape::height`] can be negative.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Shape {
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    pub fn width(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }
}
