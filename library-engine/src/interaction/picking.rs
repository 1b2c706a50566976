use crate::engine::assets::catalog::LibraryCatalog;
use crate::engine::camera::systems::LibraryCamera;
use crate::interaction::ray::ray_hits_obb;
use crate::navigation::controller::{NavigationController, NavigationRequest, SceneObjectKind};
use crate::navigation::state::NavigationState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// A clickable library object and where it sits in the hierarchy.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    Section { section: usize },
    Shelf { section: usize, shelf: usize },
    Item { section: usize, shelf: usize, id: String },
}

/// Full extents of the pickable box, in the entity's local frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickBounds(pub Vec3);

impl PickTarget {
    pub fn kind(&self) -> SceneObjectKind {
        match self {
            Self::Section { .. } => SceneObjectKind::Section,
            Self::Shelf { .. } => SceneObjectKind::Shelf,
            Self::Item { .. } => SceneObjectKind::Item,
        }
    }

    /// Shelves answer only inside the selected section, items only on the selected shelf.
    pub fn is_within(&self, state: &NavigationState) -> bool {
        match self {
            Self::Section { .. } => true,
            Self::Shelf { section, .. } => state.section_index() == Some(*section),
            Self::Item { section, shelf, .. } => {
                state.section_index() == Some(*section) && state.shelf_index() == Some(*shelf)
            }
        }
    }

    /// The request activating this object. Items take their snapshot from the catalog.
    pub fn to_request(&self, catalog: &LibraryCatalog) -> Option<NavigationRequest> {
        match self {
            Self::Section { section } => Some(NavigationRequest::SelectSection(*section)),
            Self::Shelf { shelf, .. } => Some(NavigationRequest::SelectShelf(*shelf)),
            Self::Item { section, shelf, id } => catalog
                .snapshot(*section, *shelf, id)
                .map(|snapshot| NavigationRequest::SelectItem {
                    id: id.clone(),
                    snapshot,
                }),
        }
    }
}

/// Closest hit among the objects that are navigable from `state`.
///
/// Objects of any other kind are skipped before the intersection test, so a
/// distant item can never be activated from the overview.
pub fn nearest_target<'a>(
    origin: Vec3,
    dir: Vec3,
    clickable: Option<SceneObjectKind>,
    state: &NavigationState,
    candidates: impl IntoIterator<Item = (&'a PickTarget, &'a GlobalTransform, &'a PickBounds)>,
) -> Option<&'a PickTarget> {
    let clickable = clickable?;
    let mut best: Option<(&PickTarget, f32)> = None;

    for (target, xf, PickBounds(size)) in candidates {
        if target.kind() != clickable || !target.is_within(state) {
            continue;
        }
        let Some(t) = ray_hits_obb(origin, dir, xf, *size) else {
            continue;
        };
        if best.is_none_or(|(_, best_t)| t < best_t) {
            best = Some((target, t));
        }
    }

    best.map(|(target, _)| target)
}

/// Turns a left click on a navigable object into a navigation request.
pub fn pick_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<LibraryCamera>>,
    targets: Query<(&PickTarget, &GlobalTransform, &PickBounds)>,
    controller: Res<NavigationController>,
    catalog: Res<LibraryCatalog>,
    mut requests: EventWriter<NavigationRequest>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };

    let hit = nearest_target(
        ray.origin,
        ray.direction.as_vec3(),
        controller.clickable_level_below(),
        controller.state(),
        &targets,
    );

    let Some(target) = hit else {
        return;
    };
    match target.to_request(&catalog) {
        Some(request) => {
            debug!("Picked {:?}", target);
            requests.write(request);
        }
        None => warn!("Picked {:?} but it is not in the catalog", target),
    }
}
