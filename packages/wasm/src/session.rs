//! Visualization session: the single owner of all mutable state.
//!
//! A session holds the loaded records, one managed object per record, the
//! current transform of each object, the active transitions and the scene
//! the objects are drawn into. Per-object state is stored as parallel
//! vectors indexed by [`ObjectId`], so object `i` always shows record `i`.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::AtlasConfig;
use crate::layout::{LayoutCache, LayoutConfig, LayoutError, LayoutScheme, Transform};
use crate::records::{DataOrigin, MetricField, Record, RecordId, Summary, preview, summarize};
use crate::scene::{Camera, ObjectId, PanelPayload, SceneCollaborator, SceneError};
use crate::transition::{TransitionEngine, TransitionError};

/// Failure of a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Records, their managed objects, and everything that moves them.
pub struct VisualizationSession<S: SceneCollaborator> {
    scene: S,
    camera: Camera,
    config: AtlasConfig,

    records: Vec<Record>,
    handles: Vec<S::Handle>,
    transforms: Vec<Transform>,

    transitions: TransitionEngine,
    layouts: LayoutCache,
    scheme: Option<LayoutScheme>,

    origin: DataOrigin,
    summary: Summary,
    rng: StdRng,
    /// Transforms changed outside a transition and must be pushed on the next tick.
    dirty: bool,
}

impl<S: SceneCollaborator> VisualizationSession<S> {
    /// Create an empty session drawing into `scene`.
    ///
    /// `seed` drives the initial scatter, so runs are reproducible.
    pub fn new(scene: S, config: AtlasConfig, seed: u64) -> Self {
        Self {
            scene,
            camera: Camera::from_config(&config.camera),
            transitions: TransitionEngine::new(config.transition.easing),
            layouts: LayoutCache::new(config.layout.clone()),
            config,
            records: Vec::new(),
            handles: Vec::new(),
            transforms: Vec::new(),
            scheme: None,
            origin: DataOrigin::Inline,
            summary: Summary::default(),
            rng: StdRng::seed_from_u64(seed),
            dirty: false,
        }
    }

    /// Replace the dataset.
    ///
    /// Old panels are removed, one panel is created per record at a random
    /// position, and the configured initial layout is started at `now_ms`.
    /// Record ids are renumbered to match their position. Returns the
    /// number of managed objects.
    ///
    /// If the scene fails while building panels, the panels built so far
    /// are released and the session is left empty.
    pub fn load(
        &mut self,
        mut records: Vec<Record>,
        origin: DataOrigin,
        now_ms: f64,
    ) -> Result<usize, SessionError> {
        self.clear()?;

        for (i, record) in records.iter_mut().enumerate() {
            record.id = RecordId(i as u32);
        }

        let mut handles = Vec::with_capacity(records.len());
        let mut transforms = Vec::with_capacity(records.len());

        for record in &records {
            match self.spawn_panel(record) {
                Ok((handle, transform)) => {
                    handles.push(handle);
                    transforms.push(transform);
                }
                Err(err) => {
                    for handle in &handles {
                        self.release(handle);
                    }
                    return Err(err.into());
                }
            }
        }

        self.handles = handles;
        self.transforms = transforms;
        self.summary = summarize(&records, MetricField::NetWorth);
        self.records = records;
        self.origin = origin;

        log::info!(
            "Loaded {} records ({} with known net worth)",
            self.summary.count,
            self.summary.known
        );

        self.apply_layout(self.config.initial_layout, now_ms)?;
        Ok(self.records.len())
    }

    /// Create, scatter and show the panel for `record`.
    fn spawn_panel(&mut self, record: &Record) -> Result<(S::Handle, Transform), SceneError> {
        let handle = self.scene.create_panel(&PanelPayload::from_record(record))?;

        let half = self.config.scatter_extent.abs() / 2.0;
        let transform = Transform::from_position(Vec3::new(
            self.rng.random_range(-half..=half),
            self.rng.random_range(-half..=half),
            self.rng.random_range(-half..=half),
        ));

        let shown = self
            .scene
            .set_transform(&handle, &transform)
            .and_then(|()| self.scene.add_to_scene(&handle));
        match shown {
            Ok(()) => Ok((handle, transform)),
            Err(err) => {
                self.release(&handle);
                Err(err)
            }
        }
    }

    /// Best-effort removal while unwinding a failed load.
    fn release(&mut self, handle: &S::Handle) {
        if let Err(err) = self.scene.remove_from_scene(handle) {
            log::warn!("Could not release panel: {err}");
        }
    }

    /// Remove every panel and forget the dataset.
    ///
    /// Every panel removal is attempted and the session is always left
    /// empty. The first removal failure is returned.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.transitions.cancel_all();

        let mut first_error = None;
        for handle in std::mem::take(&mut self.handles) {
            if let Err(err) = self.scene.remove_from_scene(&handle) {
                log::warn!("Could not remove panel: {err}");
                first_error.get_or_insert(err);
            }
        }

        self.transforms.clear();
        self.records.clear();
        self.summary = Summary::default();
        self.scheme = None;
        self.dirty = false;

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Start moving every object to its place in `scheme`.
    ///
    /// Any in-flight transition is replaced as a whole. On error nothing
    /// changes. Returns the number of tweens started.
    pub fn apply_layout(&mut self, scheme: LayoutScheme, now_ms: f64) -> Result<usize, SessionError> {
        let targets = self.layouts.targets(scheme, self.transforms.len())?;
        let started = self.transitions.transition(
            &self.transforms,
            targets,
            now_ms,
            self.config.transition.duration_ms,
        )?;

        log::debug!("Transition to {scheme} started for {started} objects");
        self.scheme = Some(scheme);
        Ok(started)
    }

    /// Advance to `now_ms`, push moved transforms to the scene and render.
    ///
    /// Returns the number of objects still moving.
    pub fn tick(&mut self, now_ms: f64) -> Result<usize, SessionError> {
        let moving = !self.transitions.is_idle();
        let active = self.transitions.advance(now_ms, &mut self.transforms);

        // Stays set until a push completes, so a failed push is retried
        if moving {
            self.dirty = true;
        }
        if self.dirty {
            for (handle, transform) in self.handles.iter().zip(&self.transforms) {
                self.scene.set_transform(handle, transform)?;
            }
            self.dirty = false;
        }

        self.scene.render_frame(&self.camera)?;
        Ok(active)
    }

    /// Replace the layout configuration.
    ///
    /// Cached targets are dropped if it changed, and the current layout is
    /// restarted at `now_ms` so the cards move to the new targets.
    pub fn set_layout_config(&mut self, layout: LayoutConfig, now_ms: f64) -> Result<(), SessionError> {
        self.layouts.set_config(layout.clone());
        self.config.layout = layout;
        if let Some(scheme) = self.scheme {
            self.apply_layout(scheme, now_ms)?;
        }
        Ok(())
    }

    /// Move object `id` without animation, cancelling its tween.
    pub fn place(&mut self, id: ObjectId, transform: Transform) -> bool {
        let Some(slot) = self.transforms.get_mut(id.index()) else {
            return false;
        };
        self.transitions.cancel(id);
        *slot = transform;
        self.dirty = true;
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The first records of the dataset, for the preview list.
    pub fn preview(&self) -> &[Record] {
        preview(&self.records, self.config.preview_limit)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    /// The most recently requested layout.
    pub fn scheme(&self) -> Option<LayoutScheme> {
        self.scheme
    }

    pub fn object_count(&self) -> usize {
        self.transforms.len()
    }

    /// Check if any object is still moving.
    pub fn is_animating(&self) -> bool {
        !self.transitions.is_idle()
    }

    /// Current transform of every object.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Current transform of one object.
    pub fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.transforms.get(id.index()).copied()
    }

    /// Where object `id` is heading, if it is moving.
    pub fn target(&self, id: ObjectId) -> Option<Transform> {
        self.transitions.target(id)
    }

    /// Positions as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.transforms
            .iter()
            .flat_map(|t| t.position.to_array())
            .collect()
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridConfig, GridOverflow, SphereConfig, generate};
    use crate::records::{Metric, synthetic_records};
    use crate::scene::recording::RecordingScene;

    const EPS: f32 = 1e-3;

    fn session(config: AtlasConfig) -> VisualizationSession<RecordingScene> {
        VisualizationSession::new(RecordingScene::default(), config, 7)
    }

    fn loaded(count: usize) -> VisualizationSession<RecordingScene> {
        let mut s = session(AtlasConfig::default());
        s.load(synthetic_records(count, 1), DataOrigin::Inline, 0.0).unwrap();
        s
    }

    fn assert_at(transforms: &[Transform], targets: &[Transform]) {
        assert_eq!(transforms.len(), targets.len());
        for (i, (t, target)) in transforms.iter().zip(targets).enumerate() {
            assert!(t.abs_diff_eq(target, EPS), "object {i}: {t:?} != {target:?}");
        }
    }

    #[test]
    fn test_load_creates_one_panel_per_record() {
        let s = loaded(30);
        assert_eq!(s.object_count(), 30);
        assert_eq!(s.scene().live().count(), 30);
        assert_eq!(s.scheme(), Some(LayoutScheme::Table));
        assert!(s.is_animating());
        assert_eq!(s.summary().count, 30);
    }

    #[test]
    fn test_load_renumbers_ids() {
        let mut s = session(AtlasConfig::default());
        let records = vec![
            Record::new(RecordId(9), "a", "", Metric::Known(1)),
            Record::new(RecordId(4), "b", "", Metric::Known(2)),
        ];
        s.load(records, DataOrigin::Inline, 0.0).unwrap();
        let ids: Vec<_> = s.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(1)]);
    }

    #[test]
    fn test_initial_scatter_within_extent() {
        let s = loaded(50);
        let half = AtlasConfig::default().scatter_extent / 2.0;
        for t in s.transforms() {
            assert!(t.position.abs().max_element() <= half, "{}", t.position);
        }
    }

    #[test]
    fn test_settles_on_table_layout() {
        let mut s = loaded(45);
        assert_eq!(s.tick(2000.0).unwrap(), 0);
        assert!(!s.is_animating());

        let table = generate(LayoutScheme::Table, 45, &LayoutConfig::default()).unwrap();
        assert_at(s.transforms(), &table);

        for (panel, target) in s.scene().live().zip(&table) {
            assert!(panel.transform.unwrap().abs_diff_eq(target, EPS));
        }
    }

    #[test]
    fn test_switch_mid_flight_supersedes() {
        let mut s = loaded(40);
        s.tick(2000.0).unwrap();

        s.apply_layout(LayoutScheme::Sphere, 2000.0).unwrap();
        s.tick(2500.0).unwrap();
        s.apply_layout(LayoutScheme::Helix, 2500.0).unwrap();

        let helix = generate(LayoutScheme::Helix, 40, &LayoutConfig::default()).unwrap();
        for i in 0..40u32 {
            assert!(s.target(ObjectId(i)).unwrap().abs_diff_eq(&helix[i as usize], EPS));
        }

        s.tick(4500.0).unwrap();
        assert!(!s.is_animating());
        assert_at(s.transforms(), &helix);
        assert_eq!(s.scheme(), Some(LayoutScheme::Helix));
    }

    #[test]
    fn test_repeat_layout_is_stationary() {
        let mut s = loaded(25);
        s.tick(2000.0).unwrap();
        let settled = s.transforms().to_vec();

        s.apply_layout(LayoutScheme::Table, 3000.0).unwrap();
        for now in [3000.0, 3500.0, 4000.0, 5000.0] {
            s.tick(now).unwrap();
            assert_at(s.transforms(), &settled);
        }
    }

    #[test]
    fn test_idle_tick_skips_transform_writes() {
        let mut s = loaded(10);
        s.tick(2000.0).unwrap();
        let writes = s.scene().transform_writes;
        let frames = s.scene().frames;

        s.tick(2100.0).unwrap();
        assert_eq!(s.scene().transform_writes, writes);
        assert_eq!(s.scene().frames, frames + 1);
    }

    #[test]
    fn test_place_cancels_tween_and_pushes() {
        let mut s = loaded(5);
        let spot = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert!(s.place(ObjectId(2), spot));
        assert!(!s.place(ObjectId(99), spot));
        assert!(s.target(ObjectId(2)).is_none());

        s.tick(2000.0).unwrap();
        assert_eq!(s.transform(ObjectId(2)), Some(spot));
        assert_eq!(s.scene().panels[2].transform, Some(spot));
    }

    #[test]
    fn test_reload_replaces_panels() {
        let mut s = loaded(10);
        s.load(synthetic_records(4, 2), DataOrigin::Inline, 100.0).unwrap();

        assert_eq!(s.object_count(), 4);
        assert_eq!(s.scene().live().count(), 4);
        assert_eq!(s.scene().panels.iter().filter(|p| p.removed).count(), 10);
    }

    #[test]
    fn test_grid_reject_leaves_state_untouched() {
        let config = AtlasConfig {
            layout: LayoutConfig {
                grid: GridConfig {
                    overflow: GridOverflow::Reject,
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let mut s = session(config);
        s.load(synthetic_records(101, 3), DataOrigin::Inline, 0.0).unwrap();

        let err = s.apply_layout(LayoutScheme::Grid, 10.0).unwrap_err();
        assert_eq!(
            err,
            SessionError::Layout(LayoutError::CapacityExceeded {
                count: 101,
                capacity: 100
            })
        );
        assert_eq!(s.scheme(), Some(LayoutScheme::Table));
        assert!(s.is_animating());
    }

    #[test]
    fn test_render_error_propagates() {
        let mut s = loaded(3);
        s.scene_mut().fail_render = true;
        assert!(matches!(s.tick(10.0), Err(SessionError::Scene(SceneError::Dom(_)))));
    }

    #[test]
    fn test_failed_push_is_retried_next_tick() {
        let mut s = loaded(10);
        s.scene_mut().fail_transform_on = Some(3);
        assert!(s.tick(2000.0).is_err());
        assert!(!s.is_animating());

        s.scene_mut().fail_transform_on = None;
        s.tick(2016.0).unwrap();

        let table = generate(LayoutScheme::Table, 10, &LayoutConfig::default()).unwrap();
        assert_eq!(s.scene().live().count(), 10);
        for (i, (panel, target)) in s.scene().live().zip(&table).enumerate() {
            assert!(panel.transform.unwrap().abs_diff_eq(target, EPS), "panel {i}");
        }
    }

    #[test]
    fn test_reload_with_failed_removal_leaves_session_empty() {
        let mut s = loaded(5);
        s.scene_mut().fail_remove_on = Some(1);

        let err = s.load(synthetic_records(3, 2), DataOrigin::Inline, 10.0).unwrap_err();
        assert!(matches!(err, SessionError::Scene(SceneError::Dom(_))));
        assert_eq!(s.object_count(), 0);
        assert!(s.records().is_empty());
        assert_eq!(s.summary().count, 0);
        assert_eq!(s.scheme(), None);
        // Only the panel that refused removal is left behind
        assert_eq!(s.scene().live().count(), 1);
        assert!(s.tick(20.0).is_ok());

        s.scene_mut().fail_remove_on = None;
        assert_eq!(s.load(synthetic_records(3, 2), DataOrigin::Inline, 30.0).unwrap(), 3);
        assert_eq!(s.records().len(), s.object_count());
    }

    #[test]
    fn test_failed_panel_creation_releases_built_panels() {
        let mut s = session(AtlasConfig::default());
        s.scene_mut().fail_add_on = Some(2);

        assert!(s.load(synthetic_records(6, 1), DataOrigin::Inline, 0.0).is_err());
        assert_eq!(s.object_count(), 0);
        assert!(s.records().is_empty());
        assert_eq!(s.summary().count, 0);
        assert_eq!(s.scene().live().count(), 0);
        assert_eq!(s.scene().panels.iter().filter(|p| p.removed).count(), 3);

        s.scene_mut().fail_add_on = None;
        assert_eq!(s.load(synthetic_records(6, 1), DataOrigin::Inline, 0.0).unwrap(), 6);
        assert_eq!(s.scene().live().count(), 6);
    }

    #[test]
    fn test_layout_config_change_retargets_current_layout() {
        let mut s = loaded(20);
        s.apply_layout(LayoutScheme::Sphere, 0.0).unwrap();
        s.tick(2000.0).unwrap();

        let layout = LayoutConfig {
            sphere: SphereConfig { radius: 300.0 },
            ..Default::default()
        };
        s.set_layout_config(layout.clone(), 2000.0).unwrap();
        assert!(s.is_animating());
        assert_eq!(s.config().layout, layout);

        s.tick(4000.0).unwrap();
        let sphere = generate(LayoutScheme::Sphere, 20, &layout).unwrap();
        assert_at(s.transforms(), &sphere);
    }

    #[test]
    fn test_layout_config_before_load_only_stores() {
        let mut s = session(AtlasConfig::default());
        let layout = LayoutConfig {
            sphere: SphereConfig { radius: 300.0 },
            ..Default::default()
        };
        s.set_layout_config(layout.clone(), 0.0).unwrap();
        assert_eq!(s.config().layout, layout);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_empty_dataset() {
        let mut s = session(AtlasConfig::default());
        assert_eq!(s.load(Vec::new(), DataOrigin::Inline, 0.0).unwrap(), 0);
        assert_eq!(s.tick(16.0).unwrap(), 0);
        assert!(s.positions_flat().is_empty());
        assert_eq!(s.summary().mean, None);
    }

    #[test]
    fn test_positions_flat_layout() {
        let mut s = loaded(3);
        s.tick(2000.0).unwrap();
        let flat = s.positions_flat();
        assert_eq!(flat.len(), 9);
        assert_eq!(flat[3..6], s.transforms()[1].position.to_array());
    }
}
