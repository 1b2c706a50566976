use crate::engine::assets::catalog::LibraryCatalog;
use crate::navigation::controller::{BreadcrumbEntry, BreadcrumbLabels, breadcrumb_for};
use crate::navigation::plugin::NavigationChanged;
use bevy::prelude::*;
use constants::render_settings::BREADCRUMB_FONT_SIZE;

#[derive(Component)]
pub struct BreadcrumbText;

pub fn format_breadcrumb(trail: &[BreadcrumbEntry]) -> String {
    trail
        .iter()
        .map(|entry| entry.label.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn spawn_breadcrumb_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Library"),
                TextFont {
                    font_size: BREADCRUMB_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                BreadcrumbText,
            ));
        });
}

/// Rewrite the overlay from the latest navigation change.
pub fn update_breadcrumb_text(
    mut changes: EventReader<NavigationChanged>,
    catalog: Option<Res<LibraryCatalog>>,
    mut query: Query<&mut Text, With<BreadcrumbText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };

    let labels = catalog.as_deref().map(|catalog| catalog as &dyn BreadcrumbLabels);
    let label = format_breadcrumb(&breadcrumb_for(&change.state, labels));
    for mut text in &mut query {
        text.0 = label.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::sample_catalog;
    use crate::navigation::state::{Level, NavigationState};

    #[test]
    fn overlay_text_follows_navigation() {
        let mut app = App::new();
        app.insert_resource(sample_catalog())
            .add_event::<NavigationChanged>()
            .add_systems(Update, update_breadcrumb_text);
        let text = app
            .world_mut()
            .spawn((Text::new("Library"), BreadcrumbText))
            .id();

        app.world_mut().send_event(NavigationChanged {
            state: NavigationState::at_section(1),
            previous_level: Level::Overview,
        });
        app.update();

        assert_eq!(
            app.world().get::<Text>(text).unwrap().0,
            "Library / Platform"
        );
    }

    #[test]
    fn breadcrumb_joins_labels_root_first() {
        let trail = vec![
            BreadcrumbEntry {
                level: Level::Overview,
                label: "Library".into(),
            },
            BreadcrumbEntry {
                level: Level::Section,
                label: "Lab".into(),
            },
        ];
        assert_eq!(format_breadcrumb(&trail), "Library / Lab");
    }
}
