use crate::navigation::state::NavigationState;
use bevy::prelude::*;

/// World-space placement of a library object.
/// The object's local +Z axis is the outward normal the camera backs away along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl WorldTransform {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn outward_normal(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize_or_zero()
    }

    /// Place a point given in this object's local frame.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.orientation)
    }
}

/// Resolves a hierarchy position to the object that represents it in the scene.
///
/// Returns `None` when the selection has no object, which aborts the
/// transition before any state changes.
pub trait SceneGeometryProvider {
    fn world_transform(&self, state: &NavigationState) -> Option<WorldTransform>;
}
