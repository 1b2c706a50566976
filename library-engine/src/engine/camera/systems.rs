use crate::engine::camera::choreographer::{CameraChoreographer, TransitionId};
use bevy::prelude::*;

/// Marker for the camera the choreographer drives.
#[derive(Component)]
pub struct LibraryCamera;

/// A camera transition reached its target.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSettled {
    pub transition: TransitionId,
}

pub struct CameraChoreographyPlugin;

impl Plugin for CameraChoreographyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraChoreographer>()
            .add_event::<CameraSettled>()
            .add_systems(Update, drive_camera);
    }
}

/// Advance the interpolation and copy the pose onto the camera entity.
pub fn drive_camera(
    time: Res<Time>,
    mut choreographer: ResMut<CameraChoreographer>,
    mut cameras: Query<&mut Transform, With<LibraryCamera>>,
    mut settled: EventWriter<CameraSettled>,
) {
    let finished = choreographer.update(time.delta_secs());
    let pose = choreographer.pose();
    for mut transform in &mut cameras {
        pose.apply_to(&mut transform);
    }

    if let Some(transition) = finished {
        settled.write(CameraSettled { transition });
    }
}
