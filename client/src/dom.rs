use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, TouchList,
};

use canvasquare_shared::{map_event, BoundingBox, DrawMode, Point, PointerSource, Size};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Like [`get_element`] for controls the page may leave out.
pub fn find_button(document: &Document, id: &str) -> Option<HtmlButtonElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlButtonElement>()
        .ok()
}

const PRIMARY_BUTTON: i16 = 0;

/// Only the primary button draws; presses and releases of the others are
/// ignored so they cannot start or end a drag.
pub fn is_primary_button(button: i16) -> bool {
    button == PRIMARY_BUTTON
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_canvas_mode(canvas: &HtmlCanvasElement, mode: DrawMode) {
    let cursor = match mode {
        DrawMode::Rect => "crosshair",
        DrawMode::Free | DrawMode::Disabled => "default",
    };
    if let Ok(element) = canvas.clone().dyn_into::<HtmlElement>() {
        let _ = element.style().set_property("cursor", cursor);
    }
}

fn surface_point(canvas: &HtmlCanvasElement, source: &PointerSource<'_>) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    let bounding_box = BoundingBox::new(rect.left(), rect.top(), rect.width(), rect.height());
    let intrinsic = Size::new(f64::from(canvas.width()), f64::from(canvas.height()));
    map_event(source, bounding_box, intrinsic)
}

pub fn mouse_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Option<Point> {
    let source = PointerSource::Mouse {
        client: Point::new(f64::from(event.client_x()), f64::from(event.client_y())),
    };
    surface_point(canvas, &source)
}

fn touch_list_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect()
}

pub fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Point> {
    let touches = touch_list_points(&event.touches());
    let changed_touches = touch_list_points(&event.changed_touches());
    let source = PointerSource::Touch {
        touches: &touches,
        changed_touches: &changed_touches,
    };
    surface_point(canvas, &source)
}
