use crate::engine::assets::catalog::LibraryCatalog;
use crate::engine::camera::choreographer::CameraChoreographer;
use crate::engine::camera::pose::CameraPose;
use crate::engine::camera::systems::LibraryCamera;
use crate::engine::scene::geometry::WorldTransform;
use crate::engine::scene::layout::{ItemAddress, LibraryLayout};
use crate::interaction::picking::{PickBounds, PickTarget};
use crate::navigation::controller::NavigationController;
use crate::navigation::navigator::Navigator;
use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, CLEAR_COLOUR, DIRECTIONAL_ILLUMINANCE, ITEM_COLOUR, SHELF_COLOUR,
    WALL_COLOUR,
};

/// Marker for every spawned wall, shelf and item.
#[derive(Component)]
pub struct LibraryGeometry;

/// One box of the library: what it is, where it goes, how big it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub target: PickTarget,
    pub transform: WorldTransform,
    pub size: Vec3,
    pub name: String,
}

/// Every wall, shelf and item slot the catalog describes, placed by the layout.
pub fn library_placements(catalog: &LibraryCatalog, layout: &LibraryLayout) -> Vec<Placement> {
    let settings = layout.settings();
    let mut placements = Vec::with_capacity(catalog.item_count() + catalog.sections().len() * 3);

    for (section, section_record) in catalog.sections().iter().enumerate() {
        let Some(wall) = layout.section_transform(section) else {
            continue;
        };
        placements.push(Placement {
            target: PickTarget::Section { section },
            transform: wall,
            size: settings.wall_size(),
            name: format!("section:{}", section_record.id),
        });

        for (shelf, shelf_record) in section_record.shelves.iter().enumerate() {
            if let Some(transform) = layout.shelf_transform(section, shelf) {
                placements.push(Placement {
                    target: PickTarget::Shelf { section, shelf },
                    transform,
                    size: settings.shelf_size(),
                    name: format!("shelf:{}", shelf_record.id),
                });
            }

            for (slot, item) in shelf_record.items.iter().enumerate() {
                let address = ItemAddress {
                    section,
                    shelf,
                    slot,
                };
                if let Some(transform) = layout.item_transform(address) {
                    placements.push(Placement {
                        target: PickTarget::Item {
                            section,
                            shelf,
                            id: item.id.clone(),
                        },
                        transform,
                        size: settings.item_size(),
                        name: format!("item:{}", item.id),
                    });
                }
            }
        }
    }

    placements
}

/// Spawn the library geometry once the catalog and layout are in place.
pub fn spawn_library(
    mut commands: Commands,
    catalog: Res<LibraryCatalog>,
    layout: Res<LibraryLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOUR,
        perceptual_roughness: 0.9,
        ..default()
    });
    let shelf_material = materials.add(StandardMaterial {
        base_color: SHELF_COLOUR,
        perceptual_roughness: 0.8,
        ..default()
    });
    let item_material = materials.add(StandardMaterial {
        base_color: ITEM_COLOUR,
        perceptual_roughness: 0.6,
        ..default()
    });

    let placements = library_placements(&catalog, &layout);
    for placement in &placements {
        let material = match placement.target {
            PickTarget::Section { .. } => wall_material.clone(),
            PickTarget::Shelf { .. } => shelf_material.clone(),
            PickTarget::Item { .. } => item_material.clone(),
        };
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(placement.size))),
            MeshMaterial3d(material),
            placement.transform.to_transform(),
            placement.target.clone(),
            PickBounds(placement.size),
            Name::new(placement.name.clone()),
            LibraryGeometry,
        ));
    }

    info!(
        "Spawned library: {} sections, {} objects",
        layout.section_count(),
        placements.len()
    );
}

/// Put the camera on the framing of the current state without animating.
pub fn frame_current_level(
    mut controller: ResMut<NavigationController>,
    mut camera: ResMut<CameraChoreographer>,
    layout: Res<LibraryLayout>,
) {
    let framed = Navigator::new(&mut *controller, &mut *camera, &*layout).snap_to_current();
    if let Err(error) = framed {
        warn!("Could not frame {:?}: {}", controller.level(), error);
    }
}

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(CLEAR_COLOUR));
    commands.insert_resource(AmbientLight {
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

pub fn spawn_library_camera(mut commands: Commands) {
    let mut transform = Transform::default();
    CameraPose::default().apply_to(&mut transform);
    commands.spawn((Camera3d::default(), transform, LibraryCamera));
}
