use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::path::MANIFEST_EXTENSION;
// Crate engine modules
use crate::engine::assets::catalog::LibraryCatalog;
use crate::engine::assets::library_manifest::LibraryManifest;
use crate::engine::camera::systems::CameraChoreographyPlugin;
use crate::engine::core::app_state::{
    AppState, mark_scene_spawned, transition_to_running, transition_to_scene_ready,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, load_manifest_system, report_manifest_failure, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::library_builder::{
    frame_current_level, spawn_library, spawn_library_camera, spawn_lighting,
};
// Interaction and navigation
use crate::interaction::keyboard::handle_navigation_shortcuts;
use crate::interaction::picking::pick_on_click;
use crate::navigation::plugin::NavigationPlugin;
// Create Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::interaction::breadcrumb::{spawn_breadcrumb_overlay, update_breadcrumb_text};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers LibraryManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<LibraryManifest>::new(&[MANIFEST_EXTENSION]))
        .add_plugins(CameraChoreographyPlugin)
        .add_plugins(NavigationPlugin)
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>();

    // State-based system scheduling
    app.add_systems(
        Startup,
        (
            (spawn_lighting, spawn_library_camera),
            start_loading,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            // Loading phase systems
            report_manifest_failure,
            load_manifest_system,
            transition_to_scene_ready,
        )
            .chain()
            .run_if(in_state(AppState::Loading)),
    )
    .add_systems(
        OnEnter(AppState::SceneReady),
        (spawn_library, frame_current_level, mark_scene_spawned).chain(),
    )
    .add_systems(
        Update,
        transition_to_running.run_if(in_state(AppState::SceneReady)),
    );

    // Base runtime systems that run on all platforms.
    let runtime_systems = (
        pick_on_click.run_if(resource_exists::<LibraryCatalog>),
        handle_navigation_shortcuts, // Native shortcuts or no-op for WASM
    );

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_breadcrumb_overlay)
            .add_systems(Update, update_breadcrumb_text);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
