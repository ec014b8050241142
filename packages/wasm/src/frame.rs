//! `requestAnimationFrame` driver.
//!
//! The browser calls back once per display refresh. Each callback runs one
//! frame and schedules the next. A failed frame is logged and the loop keeps
//! going; only [`FrameLoop::stop`] or dropping the loop ends it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Milliseconds since page load, from `performance.now()`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// Run one frame, logging a failure. Returns whether the frame succeeded.
fn run_frame<F, E>(on_frame: &mut F, now: f64) -> bool
where
    F: FnMut(f64) -> Result<(), E>,
    E: fmt::Display,
{
    match on_frame(now) {
        Ok(()) => true,
        Err(err) => {
            log::error!("Frame at {now:.1}ms failed: {err}");
            false
        }
    }
}

/// A running animation loop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Call `on_frame(now_ms)` on every animation frame until stopped.
    pub fn start<F, E>(mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> Result<(), E> + 'static,
        E: fmt::Display,
    {
        let running = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let flag = Rc::clone(&running);
        let slot = Rc::clone(&pending);
        let next = Rc::clone(&callback);

        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            slot.set(None);
            if !flag.get() {
                return;
            }

            run_frame(&mut on_frame, now);

            // on_frame may have stopped the loop
            if !flag.get() {
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                match request_animation_frame(cb) {
                    Ok(id) => slot.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request_animation_frame(cb)?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        pending.set(Some(first));

        log::debug!("Frame loop started");
        Ok(Self {
            running,
            pending,
            callback,
        })
    }

    /// Check if frames are still being scheduled.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Stop scheduling frames and release the callback.
    pub fn stop(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the callback -> closure -> callback cycle
        self.callback.borrow_mut().take();
        log::debug!("Frame loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
