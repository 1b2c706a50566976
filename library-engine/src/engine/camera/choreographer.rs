use crate::engine::camera::pose::CameraPose;
use crate::engine::camera::settings::{ChoreographySettings, SettingsError};
use crate::engine::scene::geometry::SceneGeometryProvider;
use crate::navigation::error::NavigationError;
use crate::navigation::state::{Level, NavigationState};
use bevy::prelude::*;
use futures::channel::oneshot;
use serde::Serialize;

/// Identifies one requested camera transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TransitionId(pub u64);

/// Handle for a started transition.
///
/// `completion` resolves with the id once the camera settles. If a newer
/// transition cancels this one the sender is dropped and the receiver reports
/// `Canceled` instead.
#[derive(Debug)]
pub struct CameraTransition {
    pub id: TransitionId,
    pub completion: oneshot::Receiver<TransitionId>,
}

struct Interpolation {
    id: TransitionId,
    from: CameraPose,
    to: CameraPose,
    duration: f32,
    elapsed: f32,
    completion: oneshot::Sender<TransitionId>,
}

/// Cubic ease-in/ease-out: monotonic, zero slope at both ends.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
    }
}

/// Resource owning the camera pose and the single in-flight interpolation.
#[derive(Resource)]
pub struct CameraChoreographer {
    pose: CameraPose,
    active: Option<Interpolation>,
    settings: ChoreographySettings,
    next_id: u64,
}

impl Default for CameraChoreographer {
    fn default() -> Self {
        Self::new(ChoreographySettings::default(), CameraPose::default())
    }
}

impl CameraChoreographer {
    /// Settings that fail validation are replaced by the defaults.
    pub fn new(settings: ChoreographySettings, pose: CameraPose) -> Self {
        let mut choreographer = Self {
            pose,
            active: None,
            settings: ChoreographySettings::default(),
            next_id: 0,
        };
        if let Err(error) = choreographer.set_settings(settings) {
            error!("Rejected camera settings, using defaults: {}", error);
        }
        choreographer
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn settings(&self) -> &ChoreographySettings {
        &self.settings
    }

    /// Install new framing. Invalid settings are refused and the current ones stay.
    pub fn set_settings(&mut self, settings: ChoreographySettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_transition(&self) -> Option<TransitionId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn duration_for(&self, level: Level) -> f32 {
        self.settings.duration_for(level)
    }

    /// Pose that frames `state`, or `TargetNotFound` when the scene has no object for it.
    pub fn target_pose<G>(
        &self,
        state: &NavigationState,
        geometry: &G,
    ) -> Result<CameraPose, NavigationError>
    where
        G: SceneGeometryProvider + ?Sized,
    {
        let target = geometry
            .world_transform(state)
            .ok_or(NavigationError::TargetNotFound {
                level: state.level(),
            })?;
        Ok(CameraPose::framing(state.level(), &target, &self.settings))
    }

    /// Start moving towards `target`, cancelling whatever was in flight.
    ///
    /// The new interpolation starts from the current pose, which may be
    /// mid-flight. A request for the pose the camera already rests at
    /// resolves immediately.
    pub fn transition_to(&mut self, target: CameraPose, duration: f32) -> CameraTransition {
        self.cancel();

        let id = TransitionId(self.next_id);
        self.next_id += 1;
        let (sender, completion) = oneshot::channel();

        if duration <= 0.0 || self.pose.approx_eq(&target) {
            self.pose = target;
            let _ = sender.send(id);
            debug!("Camera transition {:?} resolved immediately", id);
        } else {
            self.active = Some(Interpolation {
                id,
                from: self.pose,
                to: target,
                duration,
                elapsed: 0.0,
                completion: sender,
            });
        }

        CameraTransition { id, completion }
    }

    /// Drop the in-flight interpolation without resolving it. The pose stays where it is.
    pub fn cancel(&mut self) -> Option<TransitionId> {
        let cancelled = self.active.take()?;
        debug!("Camera transition {:?} cancelled", cancelled.id);
        Some(cancelled.id)
    }

    /// Cancel any motion and jump straight to `pose`.
    pub fn snap_to(&mut self, pose: CameraPose) {
        self.cancel();
        self.pose = pose;
    }

    /// Advance the interpolation by `delta_secs`. Safe to call every frame;
    /// an idle camera keeps its pose. Returns the id of a transition that
    /// finished during this step.
    pub fn update(&mut self, delta_secs: f32) -> Option<TransitionId> {
        let active = self.active.as_mut()?;
        active.elapsed += delta_secs.max(0.0);
        let progress = (active.elapsed / active.duration).min(1.0);
        self.pose = active.from.lerp(&active.to, ease_in_out_cubic(progress));

        if progress < 1.0 {
            return None;
        }

        let finished = self.active.take()?;
        self.pose = finished.to;
        // Nobody may be listening; the completion event still goes out.
        let _ = finished.completion.send(finished.id);
        debug!("Camera transition {:?} settled", finished.id);
        Some(finished.id)
    }
}
