//! Per-object transition ownership.
//!
//! The engine keeps at most one active [`Tween`] per object. Starting a new
//! tween for an object replaces the old one in place, so two tweens never
//! fight over the same transform. Tweens for different objects are
//! independent and are all stepped by the same `now` on each tick.

use std::collections::HashMap;

use super::TransitionError;
use super::easing::Easing;
use super::tween::Tween;
use crate::layout::Transform;
use crate::scene::ObjectId;

/// Active transitions keyed by object.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    active: HashMap<ObjectId, Tween>,
    easing: Easing,
}

impl TransitionEngine {
    /// Create an engine whose new tweens use `easing`.
    pub fn new(easing: Easing) -> Self {
        Self {
            active: HashMap::new(),
            easing,
        }
    }

    /// Start moving `id` from `from` to `to`.
    ///
    /// Returns the tween it superseded, if any.
    pub fn start(
        &mut self,
        id: ObjectId,
        from: Transform,
        to: Transform,
        now_ms: f64,
        duration_ms: f64,
    ) -> Option<Tween> {
        self.active
            .insert(id, Tween::new(from, to, now_ms, duration_ms, self.easing))
    }

    /// Replace every active tween with a batch moving `current[i]` to `targets[i]`.
    ///
    /// The old set is dropped and the new set installed in one call, so no
    /// tick can observe a mix of old and new targets. Returns the number of
    /// tweens started.
    pub fn transition(
        &mut self,
        current: &[Transform],
        targets: &[Transform],
        now_ms: f64,
        duration_ms: f64,
    ) -> Result<usize, TransitionError> {
        if current.len() != targets.len() {
            return Err(TransitionError::LengthMismatch {
                objects: current.len(),
                targets: targets.len(),
            });
        }

        self.active.clear();
        self.active.reserve(targets.len());

        for (i, (from, to)) in current.iter().zip(targets).enumerate() {
            self.start(ObjectId(i as u32), *from, *to, now_ms, duration_ms);
        }

        Ok(targets.len())
    }

    /// Cancel the tween for `id`, leaving the object where it is.
    pub fn cancel(&mut self, id: ObjectId) -> Option<Tween> {
        self.active.remove(&id)
    }

    /// Cancel every tween. Returns how many were active.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    /// Check if `id` is moving.
    pub fn is_active(&self, id: ObjectId) -> bool {
        self.active.contains_key(&id)
    }

    /// The destination of the active tween for `id`.
    pub fn target(&self, id: ObjectId) -> Option<Transform> {
        self.active.get(&id).map(|tween| tween.to)
    }

    /// Number of active tweens.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Check if nothing is moving.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Step every tween to `now_ms`, writing into `transforms[id]`.
    ///
    /// Finished tweens land exactly on their target and are removed. Tweens
    /// whose object is outside `transforms` are dropped. Returns the number
    /// still active.
    pub fn advance(&mut self, now_ms: f64, transforms: &mut [Transform]) -> usize {
        self.active.retain(|id, tween| {
            let Some(slot) = transforms.get_mut(id.index()) else {
                return false;
            };
            *slot = tween.sample(now_ms);
            !tween.is_finished(now_ms)
        });
        self.active.len()
    }
}
