use crate::engine::assets::library_manifest::LibraryManifest;
use crate::engine::camera::choreographer::CameraChoreographer;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::layout::LibraryLayout;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::MANIFEST_PATH;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<LibraryManifest>>,
}

// Start the loading process
pub fn start_loading(
    mut manifest_loader: ResMut<ManifestLoader>,
    asset_server: Res<AssetServer>,
) {
    if manifest_loader.handle.is_some() {
        return;
    }
    info!("Loading library manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Install catalog, layout and camera settings once the manifest is available.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<LibraryManifest>>,
    mut camera: ResMut<CameraChoreographer>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    let Some(manifest) = manifest_loader
        .handle
        .as_ref()
        .and_then(|handle| manifests.get(handle))
    else {
        return;
    };

    let catalog = manifest.to_catalog();
    let layout = LibraryLayout::new(manifest.layout.clone(), &catalog);
    info!(
        "✓ Library manifest loaded: {} sections, {} items",
        layout.section_count(),
        catalog.item_count()
    );

    if let Err(error) = camera.set_settings(manifest.camera.clone()) {
        error!("Ignoring camera settings from {}: {}", MANIFEST_PATH, error);
    }
    commands.insert_resource(catalog);
    commands.insert_resource(layout);
    loading_progress.manifest_loaded = true;
}

/// Log a manifest that could not be read or parsed. Loading stays blocked.
pub fn report_manifest_failure(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.manifest_failed || loading_progress.manifest_loaded {
        return;
    }
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };

    if let LoadState::Failed(error) = asset_server.load_state(handle) {
        error!("Failed to load library manifest {}: {}", MANIFEST_PATH, error);
        loading_progress.manifest_failed = true;
    }
}
