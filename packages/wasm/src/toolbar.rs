//! Layout buttons.
//!
//! Each scheme has a button whose element id is the scheme name
//! (`table`, `sphere`, `helix`, `grid`). Listeners are removed when the
//! [`Toolbar`] is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::layout::LayoutScheme;
use crate::scene::SceneError;

/// Click listeners bound to the layout buttons.
pub struct Toolbar {
    bindings: Vec<(Element, Closure<dyn FnMut()>)>,
}

impl Toolbar {
    /// Call `on_select(scheme)` when the button for `scheme` is clicked.
    ///
    /// Buttons missing from the page are skipped with a warning.
    pub fn bind<F>(document: &Document, on_select: F) -> Result<Self, SceneError>
    where
        F: FnMut(LayoutScheme) + 'static,
    {
        let on_select = Rc::new(RefCell::new(on_select));
        let mut bindings = Vec::with_capacity(LayoutScheme::ALL.len());

        for scheme in LayoutScheme::ALL {
            let Some(button) = document.get_element_by_id(scheme.as_str()) else {
                log::warn!("No `{scheme}` button on the page");
                continue;
            };

            let handler = Rc::clone(&on_select);
            let closure = Closure::<dyn FnMut()>::new(move || {
                // A click delivered while a handler is running is dropped
                if let Ok(mut on_select) = handler.try_borrow_mut() {
                    (&mut *on_select)(scheme);
                }
            });

            button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|err| SceneError::Dom(format!("{err:?}")))?;
            bindings.push((button, closure));
        }

        log::debug!("Bound {} layout buttons", bindings.len());
        Ok(Self { bindings })
    }

    /// Number of buttons found and bound.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Drop for Toolbar {
    fn drop(&mut self) {
        for (button, closure) in &self.bindings {
            let _ = button.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }
}
