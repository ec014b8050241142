//! In-memory scene that records every call, for tests.

use super::camera::Camera;
use super::panel::PanelPayload;
use super::{SceneCollaborator, SceneError};
use crate::layout::Transform;

/// One panel as the recorder sees it.
#[derive(Debug, Clone)]
pub struct RecordedPanel {
    pub payload: PanelPayload,
    pub transform: Option<Transform>,
    pub in_scene: bool,
    pub removed: bool,
}

#[derive(Debug, Default)]
pub struct RecordingScene {
    pub panels: Vec<RecordedPanel>,
    pub frames: usize,
    pub transform_writes: usize,
    pub fail_render: bool,
    /// Fail `set_transform` for this handle.
    pub fail_transform_on: Option<usize>,
    /// Fail `add_to_scene` for this handle.
    pub fail_add_on: Option<usize>,
    /// Fail `remove_from_scene` for this handle.
    pub fail_remove_on: Option<usize>,
}

impl RecordingScene {
    pub fn live(&self) -> impl Iterator<Item = &RecordedPanel> {
        self.panels.iter().filter(|p| p.in_scene && !p.removed)
    }

    fn panel_mut(&mut self, handle: usize) -> Result<&mut RecordedPanel, SceneError> {
        self.panels
            .get_mut(handle)
            .filter(|p| !p.removed)
            .ok_or(SceneError::UnknownPanel(handle))
    }
}

impl SceneCollaborator for RecordingScene {
    type Handle = usize;

    fn create_panel(&mut self, payload: &PanelPayload) -> Result<usize, SceneError> {
        self.panels.push(RecordedPanel {
            payload: payload.clone(),
            transform: None,
            in_scene: false,
            removed: false,
        });
        Ok(self.panels.len() - 1)
    }

    fn set_transform(&mut self, handle: &usize, transform: &Transform) -> Result<(), SceneError> {
        if self.fail_transform_on == Some(*handle) {
            return Err(SceneError::Dom("transform failed".into()));
        }
        self.panel_mut(*handle)?.transform = Some(*transform);
        self.transform_writes += 1;
        Ok(())
    }

    fn add_to_scene(&mut self, handle: &usize) -> Result<(), SceneError> {
        if self.fail_add_on == Some(*handle) {
            return Err(SceneError::Dom("add failed".into()));
        }
        self.panel_mut(*handle)?.in_scene = true;
        Ok(())
    }

    fn remove_from_scene(&mut self, handle: &usize) -> Result<(), SceneError> {
        if self.fail_remove_on == Some(*handle) {
            return Err(SceneError::Dom("remove failed".into()));
        }
        let panel = self.panel_mut(*handle)?;
        panel.in_scene = false;
        panel.removed = true;
        Ok(())
    }

    fn render_frame(&mut self, _camera: &Camera) -> Result<(), SceneError> {
        if self.fail_render {
            return Err(SceneError::Dom("render failed".into()));
        }
        self.frames += 1;
        Ok(())
    }
}
