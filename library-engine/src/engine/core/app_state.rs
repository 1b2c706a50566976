use crate::engine::loading::progress::LoadingProgress;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    SceneReady,
    Running,
}

// Transition to SceneReady once catalog and layout are installed
pub fn transition_to_scene_ready(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.manifest_loaded {
        info!("→ Transitioning to SceneReady state");
        next_state.set(AppState::SceneReady);
    }
}

pub fn mark_scene_spawned(mut loading_progress: ResMut<LoadingProgress>) {
    loading_progress.scene_spawned = true;
}

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.scene_spawned {
        info!("→ Library ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
