//! Scene collaborator: turns positioned panels into pixels.
//!
//! Layout and transition code only talks to the [`SceneCollaborator`]
//! trait. The browser implementation is [`DomScene`], which positions HTML
//! elements with CSS 3D transforms. Tests use an in-memory recorder.

pub mod camera;
pub mod css;
pub mod dom;
pub mod object;
pub mod panel;
#[cfg(test)]
pub(crate) mod recording;

use thiserror::Error;

use crate::layout::Transform;

pub use camera::{Camera, CameraConfig};
pub use dom::{DomScene, PanelHandle};
pub use object::ObjectId;
pub use panel::{PanelPayload, WealthTier};

/// Failure reported by a scene implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("panel {0} does not exist")]
    UnknownPanel(usize),
}

/// Rendering capability consumed by the visualization session.
///
/// Handles are opaque to the caller. A handle passed to
/// [`remove_from_scene`](Self::remove_from_scene) must not be used again.
pub trait SceneCollaborator {
    /// Opaque reference to one renderable panel.
    type Handle: Clone;

    /// Create a panel showing `payload`. It is not visible until added.
    fn create_panel(&mut self, payload: &PanelPayload) -> Result<Self::Handle, SceneError>;

    /// Place a panel in world space.
    fn set_transform(&mut self, handle: &Self::Handle, transform: &Transform) -> Result<(), SceneError>;

    /// Make a panel part of the rendered scene.
    fn add_to_scene(&mut self, handle: &Self::Handle) -> Result<(), SceneError>;

    /// Remove a panel from the scene and release it.
    fn remove_from_scene(&mut self, handle: &Self::Handle) -> Result<(), SceneError>;

    /// Draw the current scene as seen by `camera`.
    fn render_frame(&mut self, camera: &Camera) -> Result<(), SceneError>;
}
