use crate::engine::camera::settings::ChoreographySettings;
use crate::engine::scene::geometry::WorldTransform;
use crate::navigation::state::Level;
use bevy::prelude::*;
use constants::camera::REST_EPSILON;

/// Camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Frame `target` the way `level` asks for: back away along the outward
    /// normal, lift, and look at the object's centre.
    pub fn framing(level: Level, target: &WorldTransform, settings: &ChoreographySettings) -> Self {
        let framing = settings.framing(level);
        let position = target.position
            + target.outward_normal() * settings.base_standoff * framing.standoff
            + Vec3::Y * settings.base_standoff * framing.lift;
        Self::new(position, target.position)
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> Self {
        Self::new(
            self.position.lerp(other.position, t),
            self.look_at.lerp(other.look_at, t),
        )
    }

    pub fn approx_eq(&self, other: &CameraPose) -> bool {
        self.position.distance(other.position) <= REST_EPSILON
            && self.look_at.distance(other.look_at) <= REST_EPSILON
    }

    /// Place the camera at this pose, aimed at the look-at point.
    pub fn apply_to(&self, transform: &mut Transform) {
        *transform = Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y);
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 12.0), Vec3::new(0.0, 2.0, 0.0))
    }
}
