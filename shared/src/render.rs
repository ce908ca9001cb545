use crate::config::StrokeStyle;
use crate::{Point, Shape, Size};

/// A 2D drawing target. Only the primitives the board needs.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn begin_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeStyle(String),
    LineWidth(f64),
    BeginPath,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Stroke,
}

/// Surface that records every primitive it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Rectangles stroked since the last clear, in drawing order.
    pub fn visible_rects(&self) -> Vec<(f64, f64, f64, f64)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear { .. }))
            .map_or(0, |index| index + 1);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }
}

/// Strokes one rectangle between two corners. The extent stays signed.
pub fn draw_rect<S: Surface + ?Sized>(surface: &mut S, start: Point, end: Point) {
    surface.begin_path();
    surface.rect(start.x, start.y, end.x - start.x, end.y - start.y);
    surface.stroke();
}

/// Redraws the whole surface: clear, every committed shape in order, then
/// the live preview if one is given.
pub fn repaint<S: Surface + ?Sized>(
    surface: &mut S,
    size: Size,
    style: &StrokeStyle,
    shapes: &[Shape],
    preview: Option<(Point, Point)>,
) {
    surface.clear_rect(0.0, 0.0, size.width, size.height);
    surface.set_stroke_style(&style.color);
    surface.set_line_width(style.line_width);
    for shape in shapes {
        draw_rect(surface, shape.start(), shape.end());
    }
    if let Some((anchor, current)) = preview {
        draw_rect(surface, anchor, current);
    }
}
