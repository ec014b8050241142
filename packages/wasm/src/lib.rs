//! Networth Atlas - WASM Module
//!
//! Arranges one 3D card per person in a dataset and animates the cards
//! between table, sphere, helix and grid layouts. Compiled to WebAssembly
//! and exposed to JavaScript via wasm-bindgen.
//!
//! # Architecture
//!
//! - `records`: dataset rows, CSV import, summary and synthetic fallback
//! - `layout`: pure target generators for each scheme
//! - `transition`: eased tweens with one owner per object
//! - `scene`: the scene collaborator trait and its CSS3D DOM implementation
//! - `session`: the single owner of all mutable state
//! - `frame` / `toolbar`: browser event sources driving the session

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod frame;
pub mod layout;
pub mod records;
pub mod scene;
pub mod session;
pub mod toolbar;
pub mod transition;

use config::AtlasConfig;
use frame::{FrameLoop, now_ms};
use layout::{LayoutConfig, LayoutScheme};
use records::{DataOrigin, Record, load_remote, parse_csv, resolve_dataset, synthetic_records};
use scene::DomScene;
use session::VisualizationSession;
use toolbar::Toolbar;

/// Published CSV export of the company spreadsheet.
pub const DEFAULT_DATA_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT44IwXP9zrBQ-XQaJeEz6aA2AoTp_F3lSxKUddPBUzslCP6Kl2TMqwpI673diqw3EVPf1ePgxKuhGr/pub?output=csv";

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_logger();
}

#[cfg(feature = "console_log")]
fn init_logger() {
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logger() {}

fn js_error(value: JsValue) -> JsError {
    JsError::new(&format!("{value:?}"))
}

fn decode_config(value: JsValue) -> Result<AtlasConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(AtlasConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Main entry point for the visualization.
///
/// Wraps a [`VisualizationSession`] drawing into the DOM and provides the
/// public API exposed to JavaScript.
#[wasm_bindgen]
pub struct NetworthAtlasWasm {
    session: Rc<RefCell<VisualizationSession<DomScene>>>,
    frames: Option<FrameLoop>,
    toolbar: Option<Toolbar>,
}

#[wasm_bindgen]
impl NetworthAtlasWasm {
    /// Mount an empty scene inside the element with id `container_id`.
    ///
    /// `config` is an optional, possibly partial, configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config: JsValue) -> Result<NetworthAtlasWasm, JsError> {
        let config = decode_config(config)?;
        let scene = DomScene::mount(container_id)?;
        let session = VisualizationSession::new(scene, config, js_sys::Date::now() as u64);

        Ok(Self {
            session: Rc::new(RefCell::new(session)),
            frames: None,
            toolbar: None,
        })
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Parse CSV text and show its rows. Returns the number of cards.
    #[wasm_bindgen(js_name = loadCsv)]
    pub fn load_csv(&mut self, text: &str) -> Result<u32, JsError> {
        let records = parse_csv(text)?;
        self.load(records, DataOrigin::Inline)
    }

    /// Show `count` generated records.
    #[wasm_bindgen(js_name = loadSynthetic)]
    pub fn load_synthetic(&mut self, count: usize, seed: u64) -> Result<u32, JsError> {
        self.load(
            synthetic_records(count, seed),
            DataOrigin::Synthetic {
                reason: "requested".into(),
            },
        )
    }

    /// Number of cards.
    #[wasm_bindgen(js_name = objectCount)]
    pub fn object_count(&self) -> u32 {
        self.session.borrow().object_count() as u32
    }

    /// `{ count, known, mean }` for net worth.
    pub fn summary(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.borrow().summary())?)
    }

    /// The first records, as plain objects.
    pub fn preview(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.session.borrow().preview())?)
    }

    /// `{ kind: "inline" | "remote" | "synthetic", ... }`.
    #[wasm_bindgen(js_name = dataOrigin)]
    pub fn data_origin(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.session.borrow().origin())?)
    }

    // =========================================================================
    // Layout & Animation
    // =========================================================================

    /// Start a transition to the named layout.
    ///
    /// Returns the number of cards set in motion.
    #[wasm_bindgen(js_name = applyLayout)]
    pub fn apply_layout(&mut self, name: &str) -> Result<u32, JsError> {
        let scheme: LayoutScheme = name.parse()?;
        let started = self.session.borrow_mut().apply_layout(scheme, now_ms())?;
        Ok(started as u32)
    }

    /// Replace the layout parameters and re-run the current layout.
    ///
    /// `config` is a possibly partial `{ table, sphere, helix, grid }` object.
    #[wasm_bindgen(js_name = setLayoutConfig)]
    pub fn set_layout_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let layout: LayoutConfig = serde_wasm_bindgen::from_value(config)?;
        self.session.borrow_mut().set_layout_config(layout, now_ms())?;
        Ok(())
    }

    /// The most recently requested layout.
    #[wasm_bindgen(js_name = currentLayout)]
    pub fn current_layout(&self) -> Option<String> {
        self.session.borrow().scheme().map(|s| s.to_string())
    }

    /// Advance and render one frame manually. Returns the cards still moving.
    pub fn tick(&mut self, now: f64) -> Result<u32, JsError> {
        Ok(self.session.borrow_mut().tick(now)? as u32)
    }

    /// Check if a transition is in progress.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.session.borrow().is_animating()
    }

    /// Drive the session from `requestAnimationFrame`.
    #[wasm_bindgen(js_name = startAnimation)]
    pub fn start_animation(&mut self) -> Result<(), JsError> {
        if self.frames.as_ref().is_some_and(FrameLoop::is_running) {
            return Ok(());
        }

        let session = Rc::clone(&self.session);
        let frames = FrameLoop::start(move |now| match session.try_borrow_mut() {
            Ok(mut session) => session.tick(now).map(|_| ()),
            // Session is busy in a JS call; skip this frame
            Err(_) => Ok(()),
        })
        .map_err(js_error)?;

        self.frames = Some(frames);
        Ok(())
    }

    /// Stop the animation loop.
    #[wasm_bindgen(js_name = stopAnimation)]
    pub fn stop_animation(&mut self) {
        self.frames = None;
    }

    /// Bind the `table`, `sphere`, `helix` and `grid` buttons.
    ///
    /// Returns the number of buttons found.
    #[wasm_bindgen(js_name = bindToolbar)]
    pub fn bind_toolbar(&mut self) -> Result<u32, JsError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("no document"))?;

        // Unbind first so the old listeners are removed
        self.toolbar = None;

        let session = Rc::clone(&self.session);
        let toolbar = Toolbar::bind(&document, move |scheme| {
            let Ok(mut session) = session.try_borrow_mut() else {
                return;
            };
            if let Err(err) = session.apply_layout(scheme, now_ms()) {
                log::warn!("Cannot switch to {scheme}: {err}");
            }
        })?;

        let bound = toolbar.len() as u32;
        self.toolbar = Some(toolbar);
        Ok(bound)
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Current positions as a Float32Array `[x0, y0, z0, x1, y1, z1, ...]`.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Float32Array {
        let positions = self.session.borrow().positions_flat();
        Float32Array::from(&positions[..])
    }
}

impl NetworthAtlasWasm {
    fn load(&mut self, records: Vec<Record>, origin: DataOrigin) -> Result<u32, JsError> {
        let mut session = self.session.borrow_mut();
        let count = session.load(records, origin, now_ms())?;

        let scene = session.scene();
        if let DataOrigin::Synthetic { reason } = session.origin() {
            scene.show_banner(&format!("Showing sample data: {reason}"))?;
        }
        scene.render_summary(&session.summary(), session.preview())?;

        Ok(count as u32)
    }

    /// The active configuration.
    pub fn config(&self) -> AtlasConfig {
        self.session.borrow().config().clone()
    }
}

/// Mount, load data and start animating.
///
/// Fetches `data_url` (or the default spreadsheet export). If that fails the
/// scene is filled with synthetic records, a warning is logged and a banner
/// says why. Layout buttons are bound and the animation loop is started.
#[wasm_bindgen]
pub async fn start(
    container_id: String,
    data_url: Option<String>,
    config: JsValue,
) -> Result<NetworthAtlasWasm, JsError> {
    let mut atlas = NetworthAtlasWasm::new(&container_id, config)?;
    let url = data_url.unwrap_or_else(|| DEFAULT_DATA_URL.to_owned());

    let fetched = load_remote(&url).await;
    let (records, origin) = resolve_dataset(
        fetched,
        &url,
        atlas.config().synthetic_count,
        js_sys::Date::now() as u64,
    );
    atlas.load(records, origin)?;

    atlas.bind_toolbar()?;
    atlas.start_animation()?;
    Ok(atlas)
}
