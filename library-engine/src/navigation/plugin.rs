use crate::engine::camera::choreographer::CameraChoreographer;
use crate::engine::scene::layout::LibraryLayout;
use crate::navigation::controller::{NavigationController, NavigationRequest};
use crate::navigation::error::NavigationError;
use crate::navigation::navigator::Navigator;
use crate::navigation::state::{Level, NavigationState};
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// Broadcast after every committed transition.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct NavigationChanged {
    pub state: NavigationState,
    pub previous_level: Level,
}

/// A request that was refused; nothing changed.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct NavigationFailed {
    pub request: &'static str,
    pub error: NavigationError,
}

/// Changes collected by the controller observer, drained into events each frame.
#[derive(Resource, Clone, Default)]
pub struct NavigationFeed(Arc<Mutex<Vec<NavigationChanged>>>);

impl NavigationFeed {
    fn drain(&self) -> Vec<NavigationChanged> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

/// Plugin wiring the navigation state machine into the ECS.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        let feed = NavigationFeed::default();
        let sink = feed.clone();
        let mut controller = NavigationController::default();
        controller.on_state_change(move |state, previous_level| {
            sink.0
                .lock()
                .map_err(|_| "navigation feed lock poisoned")?
                .push(NavigationChanged {
                    state: state.clone(),
                    previous_level,
                });
            Ok(())
        });

        app.insert_resource(controller)
            .insert_resource(feed)
            .add_event::<NavigationRequest>()
            .add_event::<NavigationChanged>()
            .add_event::<NavigationFailed>()
            .add_systems(
                Update,
                (apply_navigation_requests, publish_navigation_changes).chain(),
            );
    }
}

/// Run queued requests through the navigator in arrival order.
pub fn apply_navigation_requests(
    mut requests: EventReader<NavigationRequest>,
    mut controller: ResMut<NavigationController>,
    mut camera: ResMut<CameraChoreographer>,
    layout: Option<Res<LibraryLayout>>,
    mut failures: EventWriter<NavigationFailed>,
) {
    let Some(layout) = layout else {
        for request in requests.read() {
            debug!("Dropping {} request: library not loaded", request.name());
        }
        return;
    };

    for request in requests.read() {
        let name = request.name();
        let result =
            Navigator::new(&mut *controller, &mut *camera, &*layout).navigate(request.clone());
        if let Err(error) = result {
            warn!("Navigation request {} rejected: {}", name, error);
            failures.write(NavigationFailed {
                request: name,
                error,
            });
        }
    }
}

pub fn publish_navigation_changes(
    feed: Res<NavigationFeed>,
    mut changes: EventWriter<NavigationChanged>,
) {
    for change in feed.drain() {
        changes.write(change);
    }
}
