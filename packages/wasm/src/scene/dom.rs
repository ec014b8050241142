//! Browser scene built from HTML elements and CSS 3D transforms.
//!
//! The element tree is:
//!
//! ```text
//! #container
//! └── div.atlas-viewport   perspective: <focal>px
//!     └── div.atlas-stage  transform: camera matrix, preserve-3d
//!         └── div.element  transform: panel world matrix  (one per card)
//!             ├── div.name
//!             └── div.details > div (one per line)
//! ```
//!
//! Panel transforms are written when they are set. `render_frame` only
//! updates the camera, and skips the write when nothing changed.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::camera::Camera;
use super::css::{camera_css_transform, object_css_transform};
use super::panel::PanelPayload;
use super::{SceneCollaborator, SceneError};
use crate::layout::Transform;
use crate::records::{Record, Summary};

/// Handle to a panel element owned by a [`DomScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelHandle(pub usize);

fn js(err: JsValue) -> SceneError {
    SceneError::Dom(format!("{err:?}"))
}

fn create_element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, SceneError> {
    let element = document
        .create_element(tag)
        .map_err(js)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SceneError::Dom(format!("<{tag}> is not an HtmlElement")))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), SceneError> {
    element.style().set_property(property, value).map_err(js)
}

/// CSS 3D scene mounted inside a container element.
pub struct DomScene {
    document: Document,
    container: Element,
    viewport: HtmlElement,
    stage: HtmlElement,
    panels: Vec<Option<HtmlElement>>,
    width: f32,
    height: f32,
    /// Last values written, to avoid restyling an unchanged camera.
    perspective_css: String,
    stage_css: String,
}

impl DomScene {
    /// Build the viewport inside the element with id `container_id`.
    pub fn mount(container_id: &str) -> Result<Self, SceneError> {
        let window = web_sys::window().ok_or_else(|| SceneError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SceneError::Dom("no document".into()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| SceneError::MissingElement(container_id.to_owned()))?;

        let viewport = create_element(&document, "div", "atlas-viewport")?;
        set_style(&viewport, "position", "relative")?;
        set_style(&viewport, "overflow", "hidden")?;
        set_style(&viewport, "width", "100%")?;
        set_style(&viewport, "height", "100%")?;

        let stage = create_element(&document, "div", "atlas-stage")?;
        set_style(&stage, "transform-style", "preserve-3d")?;
        set_style(&stage, "pointer-events", "none")?;

        viewport.append_child(&stage).map_err(js)?;
        container.append_child(&viewport).map_err(js)?;

        let mut scene = Self {
            document,
            container,
            viewport,
            stage,
            panels: Vec::new(),
            width: 0.0,
            height: 0.0,
            perspective_css: String::new(),
            stage_css: String::new(),
        };
        scene.measure()?;
        Ok(scene)
    }

    /// Read the container size and size the stage to match.
    fn measure(&mut self) -> Result<(), SceneError> {
        self.width = self.container.client_width().max(1) as f32;
        self.height = self.container.client_height().max(1) as f32;
        set_style(&self.stage, "width", &format!("{}px", self.width))?;
        set_style(&self.stage, "height", &format!("{}px", self.height))?;
        Ok(())
    }

    fn panel(&self, handle: &PanelHandle) -> Result<&HtmlElement, SceneError> {
        self.panels
            .get(handle.0)
            .and_then(Option::as_ref)
            .ok_or(SceneError::UnknownPanel(handle.0))
    }

    /// Show a notice above the scene, replacing any earlier one.
    pub fn show_banner(&self, message: &str) -> Result<(), SceneError> {
        if let Some(old) = self.document.get_element_by_id("atlas-banner") {
            old.remove();
        }
        let banner = create_element(&self.document, "div", "atlas-banner")?;
        banner.set_id("atlas-banner");
        banner.set_text_content(Some(message));
        set_style(&banner, "position", "absolute")?;
        set_style(&banner, "top", "0")?;
        set_style(&banner, "width", "100%")?;
        set_style(&banner, "z-index", "1")?;
        self.viewport.append_child(&banner).map_err(js)?;
        Ok(())
    }

    /// Write the summary and preview table into `#summary`, if the page has one.
    pub fn render_summary(&self, summary: &Summary, preview: &[Record]) -> Result<(), SceneError> {
        let Some(target) = self.document.get_element_by_id("summary") else {
            return Ok(());
        };
        target.set_text_content(None);

        let heading = create_element(&self.document, "p", "summary-totals")?;
        let mean = summary
            .mean
            .map_or_else(|| "unknown".to_owned(), |m| format!("RM {m}"));
        heading.set_text_content(Some(&format!(
            "{} records, average net worth {mean} ({} known)",
            summary.count, summary.known
        )));
        target.append_child(&heading).map_err(js)?;

        let table = create_element(&self.document, "table", "summary-preview")?;
        let header = create_element(&self.document, "tr", "")?;
        for label in ["Name", "Role", "Company", "Net worth"] {
            let cell = create_element(&self.document, "th", "")?;
            cell.set_text_content(Some(label));
            header.append_child(&cell).map_err(js)?;
        }
        table.append_child(&header).map_err(js)?;

        for record in preview {
            let row = create_element(&self.document, "tr", "")?;
            let company = record.company.as_deref().unwrap_or("");
            let net_worth = record.net_worth.to_string();
            for value in [record.name.as_str(), record.role.as_str(), company, &net_worth] {
                let cell = create_element(&self.document, "td", "")?;
                cell.set_text_content(Some(value));
                row.append_child(&cell).map_err(js)?;
            }
            table.append_child(&row).map_err(js)?;
        }
        target.append_child(&table).map_err(js)?;
        Ok(())
    }
}

impl SceneCollaborator for DomScene {
    type Handle = PanelHandle;

    fn create_panel(&mut self, payload: &PanelPayload) -> Result<PanelHandle, SceneError> {
        let element = create_element(&self.document, "div", "element")?;
        set_style(&element, "position", "absolute")?;
        set_style(&element, "background", payload.tier.css_background())?;

        let name = create_element(&self.document, "div", "name")?;
        name.set_text_content(Some(&payload.title));
        element.append_child(&name).map_err(js)?;

        let details = create_element(&self.document, "div", "details")?;
        for line in &payload.details {
            let row = create_element(&self.document, "div", "")?;
            row.set_text_content(Some(line));
            details.append_child(&row).map_err(js)?;
        }
        element.append_child(&details).map_err(js)?;

        let handle = PanelHandle(self.panels.len());
        self.panels.push(Some(element));
        Ok(handle)
    }

    fn set_transform(&mut self, handle: &PanelHandle, transform: &Transform) -> Result<(), SceneError> {
        let element = self.panel(handle)?;
        set_style(element, "transform", &object_css_transform(&transform.matrix()))
    }

    fn add_to_scene(&mut self, handle: &PanelHandle) -> Result<(), SceneError> {
        let element = self.panel(handle)?;
        self.stage.append_child(element).map_err(js)?;
        Ok(())
    }

    fn remove_from_scene(&mut self, handle: &PanelHandle) -> Result<(), SceneError> {
        let element = self
            .panels
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(SceneError::UnknownPanel(handle.0))?;
        element.remove();

        // Reuse the index space once every panel is gone
        if self.panels.iter().all(Option::is_none) {
            self.panels.clear();
        }
        Ok(())
    }

    fn render_frame(&mut self, camera: &Camera) -> Result<(), SceneError> {
        let focal = camera.focal_length(self.height);

        let perspective = format!("{focal}px");
        if perspective != self.perspective_css {
            set_style(&self.viewport, "perspective", &perspective)?;
            self.perspective_css = perspective;
        }

        let stage = camera_css_transform(&camera.view_matrix(), focal, self.width, self.height);
        if stage != self.stage_css {
            set_style(&self.stage, "transform", &stage)?;
            self.stage_css = stage;
        }
        Ok(())
    }
}
