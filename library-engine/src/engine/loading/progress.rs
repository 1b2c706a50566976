use bevy::prelude::*;

/// Milestones of the startup sequence, read by the state transitions.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub manifest_failed: bool,
    pub scene_spawned: bool,
}
