use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use log::{info, warn, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, KeyboardEvent,
    MouseEvent, TouchEvent,
};

use canvasquare_shared::{Board, BoardConfig, DrawMode};

use crate::dom::{
    find_button, get_element, is_primary_button, mouse_point, set_canvas_mode, set_tool_button,
    touch_point,
};
use crate::logger::{self, debug_enabled};
use crate::surface::CanvasSurface;

const CANVAS_ID: &str = "myPics";
const CONFIG_ATTRIBUTE: &str = "data-config";

type SharedBoard = Rc<RefCell<Board<CanvasSurface>>>;

/// Mode buttons plus the canvas cursor, kept in step with the board's mode.
#[derive(Clone)]
struct Toolbar {
    canvas: HtmlCanvasElement,
    rect_button: Option<HtmlButtonElement>,
    stop_button: Option<HtmlButtonElement>,
}

impl Toolbar {
    fn sync(&self, mode: DrawMode) {
        if let Some(button) = &self.rect_button {
            set_tool_button(button, mode == DrawMode::Rect);
        }
        if let Some(button) = &self.stop_button {
            set_tool_button(button, mode == DrawMode::Disabled);
        }
        set_canvas_mode(&self.canvas, mode);
    }
}

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn read_config(canvas: &HtmlCanvasElement) -> BoardConfig {
    let Some(text) = canvas.get_attribute(CONFIG_ATTRIBUTE) else {
        return BoardConfig::default();
    };
    let config = match serde_json::from_str::<BoardConfig>(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!("ignoring {CONFIG_ATTRIBUTE}: {err}");
            return BoardConfig::default();
        }
    };
    if let Err(err) = config.validate() {
        warn!("ignoring {CONFIG_ATTRIBUTE}: {err}");
        return BoardConfig::default();
    }
    config
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let level = if debug_enabled(&window) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    logger::init(level);
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, CANVAS_ID)?;
    let mut config = read_config(&canvas);
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
    config.width = f64::from(canvas.width());
    config.height = f64::from(canvas.height());

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let board = Board::new(CanvasSurface::new(ctx), &config)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let board: SharedBoard = Rc::new(RefCell::new(board));

    let toolbar = Toolbar {
        canvas: canvas.clone(),
        rect_button: find_button(&document, "rect-button"),
        stop_button: find_button(&document, "stop-button"),
    };
    toolbar.sync(config.initial_mode);

    bind_mouse(&window, &canvas, &board)?;
    bind_touch(&canvas, &board)?;
    bind_toolbar(&document, &board, &toolbar)?;
    bind_keyboard(&window, &board)?;

    info!(
        "canvas ready {}x{} mode={:?} leave={:?}",
        config.width, config.height, config.initial_mode, config.leave_policy
    );
    Ok(())
}

fn bind_mouse(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    board: &SharedBoard,
) -> Result<(), JsValue> {
    {
        let down_board = board.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if !is_primary_button(event.button()) {
                return;
            }
            if let Some(point) = mouse_point(&down_canvas, &event) {
                down_board.borrow_mut().begin(point);
            }
        });
        canvas.add_event_listener_with_callback("mousedown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_board = board.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(point) = mouse_point(&move_canvas, &event) {
                move_board.borrow_mut().update(point);
            }
        });
        canvas.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        // Released anywhere in the window; the board clamps the corner.
        let up_board = board.clone();
        let up_canvas = canvas.clone();
        let onup = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if !is_primary_button(event.button()) {
                return;
            }
            if let Some(point) = mouse_point(&up_canvas, &event) {
                up_board.borrow_mut().end(point);
            }
        });
        window.add_event_listener_with_callback("mouseup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let leave_board = board.clone();
        let leave_canvas = canvas.clone();
        let onleave = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(point) = mouse_point(&leave_canvas, &event) {
                leave_board.borrow_mut().cancel(point);
            }
        });
        canvas.add_event_listener_with_callback("mouseleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    Ok(())
}

fn bind_touch(canvas: &HtmlCanvasElement, board: &SharedBoard) -> Result<(), JsValue> {
    {
        let start_board = board.clone();
        let start_canvas = canvas.clone();
        let onstart = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(point) = touch_point(&start_canvas, &event) {
                start_board.borrow_mut().begin(point);
            }
        });
        canvas.add_event_listener_with_callback("touchstart", onstart.as_ref().unchecked_ref())?;
        onstart.forget();
    }

    {
        let move_board = board.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(point) = touch_point(&move_canvas, &event) {
                move_board.borrow_mut().update(point);
            }
        });
        canvas.add_event_listener_with_callback("touchmove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let end_board = board.clone();
        let end_canvas = canvas.clone();
        let onend = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(point) = touch_point(&end_canvas, &event) {
                end_board.borrow_mut().end(point);
            }
        });
        canvas.add_event_listener_with_callback("touchend", onend.as_ref().unchecked_ref())?;
        onend.forget();
    }

    {
        let cancel_board = board.clone();
        let cancel_canvas = canvas.clone();
        let oncancel = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            if let Some(point) = touch_point(&cancel_canvas, &event) {
                cancel_board.borrow_mut().cancel(point);
            }
        });
        canvas.add_event_listener_with_callback("touchcancel", oncancel.as_ref().unchecked_ref())?;
        oncancel.forget();
    }

    Ok(())
}

fn bind_toolbar(
    document: &web_sys::Document,
    board: &SharedBoard,
    toolbar: &Toolbar,
) -> Result<(), JsValue> {
    let mode_buttons = [
        ("rect-button", DrawMode::Rect),
        ("stop-button", DrawMode::Disabled),
    ];
    for (id, mode) in mode_buttons {
        let Some(button) = find_button(document, id) else {
            continue;
        };
        let click_board = board.clone();
        let click_toolbar = toolbar.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            click_board.borrow_mut().set_mode(mode);
            click_toolbar.sync(mode);
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    if let Some(button) = find_button(document, "undo-button") {
        let undo_board = board.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            undo_board.borrow_mut().undo();
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    if let Some(button) = find_button(document, "clear-button") {
        let clear_board = board.clone();
        let clear_toolbar = toolbar.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut board = clear_board.borrow_mut();
            board.clear();
            clear_toolbar.sync(board.mode());
        });
        button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}

fn bind_keyboard(window: &web_sys::Window, board: &SharedBoard) -> Result<(), JsValue> {
    let key_board = board.clone();
    let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let modifier = event.ctrl_key() || event.meta_key();
        if modifier && !event.shift_key() && event.key().eq_ignore_ascii_case("z") {
            event.prevent_default();
            key_board.borrow_mut().undo();
        }
    });
    window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
    onkeydown.forget();
    Ok(())
}
