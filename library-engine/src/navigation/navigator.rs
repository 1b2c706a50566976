use crate::engine::camera::choreographer::{CameraChoreographer, CameraTransition};
use crate::engine::scene::geometry::SceneGeometryProvider;
use crate::navigation::controller::{NavigationController, NavigationRequest};
use crate::navigation::error::NavigationError;
use bevy::prelude::*;

/// Couples the state machine with the camera for a single request.
///
/// A request either fully happens (new state, one notification, camera on its
/// way) or leaves both the state and the camera exactly as they were.
pub struct Navigator<'a, G: SceneGeometryProvider + ?Sized> {
    controller: &'a mut NavigationController,
    camera: &'a mut CameraChoreographer,
    geometry: &'a G,
}

impl<'a, G: SceneGeometryProvider + ?Sized> Navigator<'a, G> {
    pub fn new(
        controller: &'a mut NavigationController,
        camera: &'a mut CameraChoreographer,
        geometry: &'a G,
    ) -> Self {
        Self {
            controller,
            camera,
            geometry,
        }
    }

    /// Validate, resolve the camera target, then commit and start moving.
    ///
    /// `Ok(None)` is a request with nothing to do, such as going back from the
    /// overview.
    pub fn navigate(
        &mut self,
        request: NavigationRequest,
    ) -> Result<Option<CameraTransition>, NavigationError> {
        let Some(planned) = self.controller.plan(&request)? else {
            debug!("Navigation request {} is a no-op", request.name());
            return Ok(None);
        };

        let target = self.camera.target_pose(planned.next(), self.geometry)?;
        let level = self.controller.commit(planned)?;
        let duration = self.camera.duration_for(level);
        Ok(Some(self.camera.transition_to(target, duration)))
    }

    /// Point the camera at whatever the current state frames, without animation.
    pub fn snap_to_current(&mut self) -> Result<(), NavigationError> {
        let pose = self
            .camera
            .target_pose(self.controller.state(), self.geometry)?;
        self.camera.snap_to(pose);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::sample_catalog;
    use crate::engine::scene::layout::{LayoutSettings, LibraryLayout};
    use crate::navigation::state::{Level, NavigationState};
    use std::sync::{Arc, Mutex};

    struct Fixture {
        controller: NavigationController,
        camera: CameraChoreographer,
        layout: LibraryLayout,
        notifications: Arc<Mutex<usize>>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut controller = NavigationController::default();
            let notifications = Arc::new(Mutex::new(0));
            let sink = notifications.clone();
            controller.on_state_change(move |_, _| {
                *sink.lock().unwrap() += 1;
                Ok(())
            });
            Self {
                controller,
                camera: CameraChoreographer::default(),
                layout: LibraryLayout::new(LayoutSettings::default(), &sample_catalog()),
                notifications,
            }
        }

        fn navigate(
            &mut self,
            request: NavigationRequest,
        ) -> Result<Option<CameraTransition>, NavigationError> {
            Navigator::new(&mut self.controller, &mut self.camera, &self.layout).navigate(request)
        }

        fn settle(&mut self) {
            for _ in 0..200 {
                self.camera.update(0.05);
            }
        }
    }

    #[test]
    fn successful_request_moves_state_and_camera() {
        let mut fixture = Fixture::new();
        let mut transition = fixture
            .navigate(NavigationRequest::SelectSection(1))
            .unwrap()
            .unwrap();

        assert_eq!(fixture.controller.level(), Level::Section);
        assert!(fixture.camera.is_animating());
        fixture.settle();

        let expected = fixture
            .camera
            .target_pose(&NavigationState::at_section(1), &fixture.layout)
            .unwrap();
        assert_eq!(fixture.camera.pose(), expected);
        assert_eq!(transition.completion.try_recv(), Ok(Some(transition.id)));
        assert_eq!(*fixture.notifications.lock().unwrap(), 1);
    }

    #[test]
    fn missing_target_leaves_everything_untouched() {
        let mut fixture = Fixture::new();
        let pose = fixture.camera.pose();

        let err = fixture
            .navigate(NavigationRequest::SelectSection(99))
            .unwrap_err();

        assert_eq!(err, NavigationError::TargetNotFound { level: Level::Section });
        assert_eq!(*fixture.controller.state(), NavigationState::overview());
        assert_eq!(fixture.camera.pose(), pose);
        assert!(!fixture.camera.is_animating());
        assert_eq!(*fixture.notifications.lock().unwrap(), 0);
    }

    #[test]
    fn invalid_transition_does_not_touch_the_camera() {
        let mut fixture = Fixture::new();
        let err = fixture
            .navigate(NavigationRequest::SelectShelf(0))
            .unwrap_err();
        assert!(matches!(err, NavigationError::InvalidTransition { .. }));
        assert!(!fixture.camera.is_animating());
    }

    #[test]
    fn item_on_another_shelf_is_not_found() {
        let mut fixture = Fixture::new();
        let snapshot = sample_catalog().snapshot(2, 0, "x42").unwrap();
        fixture.navigate(NavigationRequest::SelectSection(2)).unwrap();
        fixture.navigate(NavigationRequest::SelectShelf(1)).unwrap();

        let err = fixture
            .navigate(NavigationRequest::SelectItem {
                id: "x42".to_string(),
                snapshot,
            })
            .unwrap_err();
        assert_eq!(err, NavigationError::TargetNotFound { level: Level::Item });
        assert_eq!(fixture.controller.level(), Level::Shelf);
    }

    #[test]
    fn go_back_from_overview_starts_nothing() {
        let mut fixture = Fixture::new();
        assert!(fixture.navigate(NavigationRequest::GoBack).unwrap().is_none());
        assert!(!fixture.camera.is_animating());
        assert_eq!(*fixture.notifications.lock().unwrap(), 0);
    }

    #[test]
    fn rapid_requests_cancel_the_earlier_flight() {
        let mut fixture = Fixture::new();
        let mut first = fixture
            .navigate(NavigationRequest::SelectSection(0))
            .unwrap()
            .unwrap();
        fixture.camera.update(0.1);
        let second = fixture
            .navigate(NavigationRequest::SelectShelf(1))
            .unwrap()
            .unwrap();

        assert!(first.completion.try_recv().is_err());
        assert_eq!(fixture.camera.active_transition(), Some(second.id));
        fixture.settle();

        let expected = fixture
            .camera
            .target_pose(&NavigationState::at_shelf(0, 1), &fixture.layout)
            .unwrap();
        assert_eq!(fixture.camera.pose(), expected);
    }

    #[test]
    fn reset_flies_home_from_an_item() {
        let mut fixture = Fixture::new();
        let snapshot = sample_catalog().snapshot(0, 0, "mesh-queue").unwrap();
        fixture.navigate(NavigationRequest::SelectSection(0)).unwrap();
        fixture.navigate(NavigationRequest::SelectShelf(0)).unwrap();
        fixture
            .navigate(NavigationRequest::SelectItem {
                id: "mesh-queue".to_string(),
                snapshot,
            })
            .unwrap();
        fixture.settle();

        fixture.navigate(NavigationRequest::Reset).unwrap();
        fixture.settle();

        let home = fixture
            .camera
            .target_pose(&NavigationState::overview(), &fixture.layout)
            .unwrap();
        assert_eq!(fixture.camera.pose(), home);
        assert_eq!(*fixture.notifications.lock().unwrap(), 4);
    }
}
