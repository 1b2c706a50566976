use crate::navigation::controller::NavigationRequest;
use bevy::prelude::*;

/// Keyboard shortcuts for leaving the current level (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_navigation_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: EventWriter<NavigationRequest>,
) {
    if keyboard.just_pressed(KeyCode::Home) {
        requests.write(NavigationRequest::Reset);
        return;
    }

    if keyboard.any_just_pressed([KeyCode::Escape, KeyCode::Backspace]) {
        requests.write(NavigationRequest::GoBack);
    }
}

/// Placeholder system for WASM builds where the frontend drives navigation over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_navigation_shortcuts() {}
