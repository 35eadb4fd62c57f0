//! Browser shell: canvas, keyboard, resize and the `requestAnimationFrame` loop.
//!
//! All gameplay lives in [`Game`]; this module only moves DOM events into an
//! [`InputState`], steps the game once per animation frame and renders.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window, window};

use crate::config::Tuning;
use crate::error::GameError;
use crate::game::{Game, GameEvent};
use crate::geom::Viewport;
use crate::input::InputState;
use crate::render;

const CANVAS_ID: &str = "ember-canvas";

struct AppState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: Game,
    input: InputState,
}

thread_local! {
    static APP_STATE: std::cell::RefCell<Option<AppState>> = const { std::cell::RefCell::new(None) };
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Start (or restart with new tuning) the game on `#ember-canvas`, creating
/// the canvas if the page does not have one. Listeners and the frame loop are
/// only installed on the first call.
pub fn start(tuning: Tuning) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into().map_err(|_| GameError::Dom(format!("#{CANVAS_ID} is not a canvas")))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| GameError::Dom("created element is not a canvas".into()))?;
        c.set_id(CANVAS_ID);
        c.set_attribute("style", "position:fixed; left:0; top:0; display:block;").ok();
        doc.body().ok_or(GameError::NoBody)?.append_child(&c)?;
        c
    };
    let view = fit_canvas(&win, &canvas);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let game = Game::new(tuning, view, seed(&win))?;

    let already_running = APP_STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let running = slot.is_some();
        *slot = Some(AppState { canvas, ctx, game, input: InputState::default() });
        running
    });
    if already_running {
        log::info!("game restarted with new tuning");
        return Ok(());
    }

    install_listeners(&win)?;
    start_loop();
    log::info!("game started on #{} ({}x{})", CANVAS_ID, view.width, view.height);
    Ok(())
}

fn install_listeners(win: &Window) -> Result<(), GameError> {
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let consumed = state.input.apply_key(&evt.code(), pressed)
                        || state.input.apply_key(&evt.key(), pressed);
                    if consumed {
                        evt.prevent_default();
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keyup never arrives for keys held while focus leaves the page.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.input.release_all();
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            APP_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let view = fit_canvas(&win, &state.canvas);
                    state.game.resize(view);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn start_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                frame(state, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(state: &mut AppState, now: f64) {
    for event in state.game.step(&state.input, now) {
        match event {
            GameEvent::Landed => log::trace!("landed"),
            other => log::debug!("{:?}", other),
        }
    }
    render::render(&state.ctx, &state.game);
}

/// Size the canvas to the window and return the resulting viewport.
fn fit_canvas(win: &Window, canvas: &HtmlCanvasElement) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>, fallback: u32| {
        v.ok().and_then(|v| v.as_f64()).map(|d| d as u32).unwrap_or(fallback)
    };
    let width = dim(win.inner_width(), canvas.width());
    let height = dim(win.inner_height(), canvas.height());
    canvas.set_width(width);
    canvas.set_height(height);
    Viewport::new(width as f64, height as f64)
}

#[cfg(feature = "rng")]
fn seed(win: &Window) -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("getrandom failed ({e}), seeding from the clock");
            clock_seed(win)
        }
    }
}

#[cfg(not(feature = "rng"))]
fn seed(win: &Window) -> u64 {
    clock_seed(win)
}

fn clock_seed(win: &Window) -> u64 {
    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    now.to_bits() ^ 0x9E37_79B9_7F4A_7C15
}
