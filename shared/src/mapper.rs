//! Conversion from raw pointer input to surface-local coordinates.

use serde::{Deserialize, Serialize};

use crate::{Point, Size};

/// On-screen rectangle of the drawing surface, in client coordinates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Client coordinates carried by a mouse or touch event.
#[derive(Clone, Copy, Debug)]
pub enum PointerSource<'a> {
    Mouse {
        client: Point,
    },
    Touch {
        /// Contacts still on the surface.
        touches: &'a [Point],
        /// Contacts that changed with this event; on release these are the
        /// lifted ones.
        changed_touches: &'a [Point],
    },
}

impl PointerSource<'_> {
    /// The contact the drag follows. Touch events prefer the first active
    /// contact and fall back to the first changed one, since `touchend`
    /// usually arrives with no active contacts left.
    pub fn primary(&self) -> Option<Point> {
        match self {
            PointerSource::Mouse { client } => Some(*client),
            PointerSource::Touch {
                touches,
                changed_touches,
            } => touches.first().or_else(|| changed_touches.first()).copied(),
        }
    }
}

/// Maps a pointer event into the surface's intrinsic pixel space.
///
/// The surface may be stretched by layout, so the client offset is scaled by
/// `intrinsic / rendered` on each axis. Returns `None` when the event has no
/// contact point or the bounding box is degenerate. No clamping happens here.
pub fn map_event(
    source: &PointerSource<'_>,
    bounding_box: BoundingBox,
    intrinsic: Size,
) -> Option<Point> {
    if bounding_box.width <= 0.0 || bounding_box.height <= 0.0 {
        return None;
    }
    let client = source.primary()?;
    let scale_x = intrinsic.width / bounding_box.width;
    let scale_y = intrinsic.height / bounding_box.height;
    let x = (client.x - bounding_box.left) * scale_x;
    let y = (client.y - bounding_box.top) * scale_y;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point { x, y })
}
