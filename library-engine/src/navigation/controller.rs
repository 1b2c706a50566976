use crate::navigation::error::NavigationError;
use crate::navigation::state::{ItemSnapshot, Level, NavigationState};
use bevy::prelude::*;
use serde::Serialize;

/// Error type observers may return; it is logged and never stops other observers.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

type StateObserver =
    Box<dyn FnMut(&NavigationState, Level) -> Result<(), ObserverError> + Send + Sync>;

/// Handle returned by [`NavigationController::on_state_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Kind of scene object that can be activated at a given depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneObjectKind {
    Section,
    Shelf,
    Item,
}

impl SceneObjectKind {
    /// The level a successful activation of this kind lands on.
    pub fn target_level(self) -> Level {
        match self {
            Self::Section => Level::Section,
            Self::Shelf => Level::Shelf,
            Self::Item => Level::Item,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbEntry {
    pub level: Level,
    pub label: String,
}

/// Human-readable names for breadcrumb entries.
pub trait BreadcrumbLabels {
    fn section_label(&self, section: usize) -> Option<String>;
    fn shelf_label(&self, section: usize, shelf: usize) -> Option<String>;
}

/// A navigation request from picking, keyboard, or RPC.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum NavigationRequest {
    SelectSection(usize),
    SelectShelf(usize),
    SelectItem { id: String, snapshot: ItemSnapshot },
    GoBack,
    Reset,
}

impl NavigationRequest {
    /// Validate a raw index; negative or oversized values are rejected.
    pub fn select_section<I: TryInto<usize>>(index: I) -> Result<Self, NavigationError> {
        index
            .try_into()
            .map(Self::SelectSection)
            .map_err(|_| NavigationError::InvalidIndex { kind: "section" })
    }

    pub fn select_shelf<I: TryInto<usize>>(index: I) -> Result<Self, NavigationError> {
        index
            .try_into()
            .map(Self::SelectShelf)
            .map_err(|_| NavigationError::InvalidIndex { kind: "shelf" })
    }

    pub fn select_item(
        id: impl Into<String>,
        snapshot: ItemSnapshot,
    ) -> Result<Self, NavigationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(NavigationError::InvalidIndex { kind: "item" });
        }
        Ok(Self::SelectItem { id, snapshot })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSection(_) => "select_section",
            Self::SelectShelf(_) => "select_shelf",
            Self::SelectItem { .. } => "select_item",
            Self::GoBack => "go_back",
            Self::Reset => "reset",
        }
    }
}

/// A validated transition that has not been applied yet.
///
/// Only the controller creates these, and it refuses to commit one that was
/// planned against an older state.
#[derive(Debug, Clone)]
pub struct PlannedTransition {
    revision: u64,
    previous: Level,
    next: NavigationState,
}

impl PlannedTransition {
    pub fn next(&self) -> &NavigationState {
        &self.next
    }

    pub fn previous_level(&self) -> Level {
        self.previous
    }
}

/// Resource owning the navigation state machine.
///
/// Each level-changing call notifies observers exactly once, after the new
/// state is fully in place.
#[derive(Resource, Default)]
pub struct NavigationController {
    state: NavigationState,
    revision: u64,
    observers: Vec<(Subscription, StateObserver)>,
    next_subscription: u64,
}

impl NavigationController {
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn level(&self) -> Level {
        self.state.level()
    }

    /// Validate `request` against the current state without touching it.
    /// `Ok(None)` means the request is a no-op (going back from the overview).
    pub fn plan(
        &self,
        request: &NavigationRequest,
    ) -> Result<Option<PlannedTransition>, NavigationError> {
        let next = match request {
            NavigationRequest::SelectSection(section) => NavigationState::at_section(*section),
            NavigationRequest::SelectShelf(shelf) => {
                let section = self.require_section(Level::Shelf)?;
                NavigationState::at_shelf(section, *shelf)
            }
            NavigationRequest::SelectItem { id, snapshot } => {
                if id.trim().is_empty() {
                    return Err(NavigationError::InvalidIndex { kind: "item" });
                }
                let section = self.require_section(Level::Item)?;
                let shelf = self.state.shelf_index().ok_or(NavigationError::InvalidTransition {
                    current: self.level(),
                    requested: Level::Item,
                })?;
                NavigationState::at_item(section, shelf, id.clone(), snapshot.clone())
            }
            NavigationRequest::GoBack => match self.level().shallower() {
                Some(level) => self.state.truncated(level),
                None => return Ok(None),
            },
            NavigationRequest::Reset => NavigationState::overview(),
        };

        Ok(Some(PlannedTransition {
            revision: self.revision,
            previous: self.level(),
            next,
        }))
    }

    /// Apply a planned transition and notify observers once.
    pub fn commit(&mut self, planned: PlannedTransition) -> Result<Level, NavigationError> {
        if planned.revision != self.revision {
            return Err(NavigationError::InvalidTransition {
                current: self.level(),
                requested: planned.next.level(),
            });
        }

        self.install(planned.next, planned.previous);
        Ok(self.level())
    }

    /// Plan and commit in one step.
    pub fn apply(&mut self, request: NavigationRequest) -> Result<Option<Level>, NavigationError> {
        match self.plan(&request)? {
            Some(planned) => self.commit(planned).map(Some),
            None => Ok(None),
        }
    }

    pub fn select_section<I: TryInto<usize>>(&mut self, index: I) -> Result<(), NavigationError> {
        self.apply(NavigationRequest::select_section(index)?)
            .map(|_| ())
    }

    pub fn select_shelf<I: TryInto<usize>>(&mut self, index: I) -> Result<(), NavigationError> {
        self.apply(NavigationRequest::select_shelf(index)?).map(|_| ())
    }

    pub fn select_item(
        &mut self,
        id: impl Into<String>,
        snapshot: ItemSnapshot,
    ) -> Result<(), NavigationError> {
        self.apply(NavigationRequest::select_item(id, snapshot)?)
            .map(|_| ())
    }

    /// Step one level towards the root. Returns `None` when already at the overview.
    pub fn go_back(&mut self) -> Option<Level> {
        let level = self.level().shallower()?;
        let previous = self.level();
        self.install(self.state.truncated(level), previous);
        Some(level)
    }

    /// Jump straight to the overview with a single notification.
    pub fn reset(&mut self) {
        let previous = self.level();
        self.install(NavigationState::overview(), previous);
    }

    /// The kind of object the picking layer may activate at the current depth.
    pub fn clickable_level_below(&self) -> Option<SceneObjectKind> {
        clickable_below(self.level())
    }

    /// Labels for every set level, root first, with generic names.
    pub fn breadcrumb(&self) -> Vec<BreadcrumbEntry> {
        breadcrumb_for(&self.state, None)
    }

    /// Labels for every set level, root first, named from `labels`.
    pub fn breadcrumb_with(&self, labels: &dyn BreadcrumbLabels) -> Vec<BreadcrumbEntry> {
        breadcrumb_for(&self.state, Some(labels))
    }

    /// Register an observer called with `(new_state, previous_level)`.
    pub fn on_state_change<F>(&mut self, observer: F) -> Subscription
    where
        F: FnMut(&NavigationState, Level) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    /// Remove an observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    fn require_section(&self, requested: Level) -> Result<usize, NavigationError> {
        self.state
            .section_index()
            .ok_or(NavigationError::InvalidTransition {
                current: self.level(),
                requested,
            })
    }

    // Swap in a whole new state, invalidate outstanding plans, notify once.
    fn install(&mut self, next: NavigationState, previous: Level) {
        debug_assert!(next.is_consistent());
        self.state = next;
        self.revision += 1;
        info!(
            "Navigation: {} -> {}",
            previous.as_str(),
            self.level().as_str()
        );
        self.notify(previous);
    }

    fn notify(&mut self, previous: Level) {
        for (subscription, observer) in self.observers.iter_mut() {
            if let Err(error) = observer(&self.state, previous) {
                warn!("Navigation observer {:?} failed: {}", subscription, error);
            }
        }
    }
}

/// The kind of object that is interactive at `level`.
pub fn clickable_below(level: Level) -> Option<SceneObjectKind> {
    match level {
        Level::Overview => Some(SceneObjectKind::Section),
        Level::Section => Some(SceneObjectKind::Shelf),
        Level::Shelf => Some(SceneObjectKind::Item),
        Level::Item => None,
    }
}

/// Breadcrumb of an arbitrary state; generic names where `labels` has none.
pub fn breadcrumb_for(
    state: &NavigationState,
    labels: Option<&dyn BreadcrumbLabels>,
) -> Vec<BreadcrumbEntry> {
    let mut trail = vec![BreadcrumbEntry {
        level: Level::Overview,
        label: "Library".to_string(),
    }];

    if let Some(section) = state.section_index() {
        let label = labels
            .and_then(|labels| labels.section_label(section))
            .unwrap_or_else(|| format!("Section {}", section + 1));
        trail.push(BreadcrumbEntry {
            level: Level::Section,
            label,
        });

        if let Some(shelf) = state.shelf_index() {
            let label = labels
                .and_then(|labels| labels.shelf_label(section, shelf))
                .unwrap_or_else(|| format!("Shelf {}", shelf + 1));
            trail.push(BreadcrumbEntry {
                level: Level::Shelf,
                label,
            });
        }
    }

    if let Some(snapshot) = state.item_snapshot() {
        trail.push(BreadcrumbEntry {
            level: Level::Item,
            label: snapshot.title.clone(),
        });
    }

    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::tests::sample_catalog;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(NavigationState, Level)>>>;

    fn observed() -> (NavigationController, Log) {
        let mut controller = NavigationController::default();
        let log: Log = Arc::default();
        let sink = log.clone();
        controller.on_state_change(move |state, previous| {
            sink.lock().unwrap().push((state.clone(), previous));
            Ok(())
        });
        (controller, log)
    }

    fn snapshot() -> ItemSnapshot {
        sample_catalog().snapshot(2, 0, "x42").unwrap()
    }

    #[test]
    fn drill_down_and_back_out() {
        let (mut nav, log) = observed();

        nav.select_section(2).unwrap();
        assert_eq!(nav.level(), Level::Section);
        assert_eq!(nav.state().section_index(), Some(2));

        nav.select_shelf(1).unwrap();
        assert_eq!(nav.level(), Level::Shelf);
        assert_eq!(nav.state().section_index(), Some(2));
        assert_eq!(nav.state().shelf_index(), Some(1));

        nav.select_item("x42", snapshot()).unwrap();
        assert_eq!(nav.level(), Level::Item);
        assert_eq!(nav.state().item_id(), Some("x42"));

        assert_eq!(nav.go_back(), Some(Level::Shelf));
        assert_eq!(nav.state().item_id(), None);
        assert!(nav.state().item_snapshot().is_none());

        assert_eq!(nav.go_back(), Some(Level::Section));
        assert_eq!(nav.state().shelf_index(), None);

        assert_eq!(nav.go_back(), Some(Level::Overview));
        assert_eq!(nav.state().section_index(), None);

        assert_eq!(nav.go_back(), None);
        assert_eq!(nav.level(), Level::Overview);

        let previous: Vec<Level> = log.lock().unwrap().iter().map(|(_, p)| *p).collect();
        assert_eq!(
            previous,
            vec![
                Level::Overview,
                Level::Section,
                Level::Shelf,
                Level::Item,
                Level::Shelf,
                Level::Section
            ]
        );
    }

    #[test]
    fn shelf_without_section_is_rejected() {
        let (mut nav, log) = observed();

        let err = nav.select_shelf(0).unwrap_err();
        assert_eq!(
            err,
            NavigationError::InvalidTransition {
                current: Level::Overview,
                requested: Level::Shelf
            }
        );
        assert_eq!(*nav.state(), NavigationState::overview());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn item_without_shelf_is_rejected() {
        let mut nav = NavigationController::default();
        nav.select_section(0).unwrap();

        let err = nav.select_item("x42", snapshot()).unwrap_err();
        assert!(matches!(err, NavigationError::InvalidTransition { .. }));
        assert_eq!(*nav.state(), NavigationState::at_section(0));
    }

    #[test]
    fn nonsensical_indices_are_rejected() {
        let mut nav = NavigationController::default();
        assert_eq!(
            nav.select_section(-1).unwrap_err(),
            NavigationError::InvalidIndex { kind: "section" }
        );
        nav.select_section(0).unwrap();
        assert_eq!(
            nav.select_shelf(-3i64).unwrap_err(),
            NavigationError::InvalidIndex { kind: "shelf" }
        );
        nav.select_shelf(0).unwrap();
        assert_eq!(
            nav.select_item("  ", snapshot()).unwrap_err(),
            NavigationError::InvalidIndex { kind: "item" }
        );
        assert_eq!(nav.level(), Level::Shelf);
    }

    #[test]
    fn go_back_from_overview_is_silent() {
        let (mut nav, log) = observed();
        assert_eq!(nav.go_back(), None);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn go_back_notifies_once_per_step() {
        let (mut nav, log) = observed();
        nav.select_section(1).unwrap();
        nav.select_shelf(0).unwrap();
        log.lock().unwrap().clear();

        assert_eq!(nav.go_back(), Some(Level::Section));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn reset_is_a_single_notification_from_any_level() {
        for depth in 0..4 {
            let (mut nav, log) = observed();
            if depth >= 1 {
                nav.select_section(0).unwrap();
            }
            if depth >= 2 {
                nav.select_shelf(0).unwrap();
            }
            if depth >= 3 {
                nav.select_item("x42", snapshot()).unwrap();
            }
            log.lock().unwrap().clear();

            nav.reset();

            assert_eq!(*nav.state(), NavigationState::overview());
            let log = log.lock().unwrap();
            assert_eq!(log.len(), 1, "depth {depth}");
            assert_eq!(log[0].0, NavigationState::overview());
            assert_eq!(log[0].1, Level::ALL[depth]);
        }
    }

    #[test]
    fn clickable_kind_per_level() {
        let mut nav = NavigationController::default();
        let mut seen = Vec::new();
        seen.push((nav.level(), nav.clickable_level_below()));
        nav.select_section(0).unwrap();
        seen.push((nav.level(), nav.clickable_level_below()));
        nav.select_shelf(0).unwrap();
        seen.push((nav.level(), nav.clickable_level_below()));
        nav.select_item("x42", snapshot()).unwrap();
        seen.push((nav.level(), nav.clickable_level_below()));

        assert_eq!(
            seen,
            vec![
                (Level::Overview, Some(SceneObjectKind::Section)),
                (Level::Section, Some(SceneObjectKind::Shelf)),
                (Level::Shelf, Some(SceneObjectKind::Item)),
                (Level::Item, None),
            ]
        );
    }

    #[test]
    fn observers_see_complete_state() {
        let mut nav = NavigationController::default();
        nav.on_state_change(|state, _| {
            assert!(state.is_consistent());
            Ok(())
        });
        nav.select_section(3).unwrap();
        nav.select_shelf(2).unwrap();
        // Changing section from a deep level must not leave the old shelf behind.
        nav.select_section(1).unwrap();
        assert_eq!(nav.state().shelf_index(), None);
    }

    #[test]
    fn failing_observer_does_not_block_later_ones() {
        let mut nav = NavigationController::default();
        let order: Arc<Mutex<Vec<&'static str>>> = Arc::default();

        let first = order.clone();
        nav.on_state_change(move |_, _| {
            first.lock().unwrap().push("first");
            Err("first observer broke".into())
        });
        let second = order.clone();
        nav.on_state_change(move |_, _| {
            second.lock().unwrap().push("second");
            Ok(())
        });

        nav.select_section(0).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let mut nav = NavigationController::default();
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let subscription = nav.on_state_change(move |_, _| {
            *sink.lock().unwrap() += 1;
            Ok(())
        });

        nav.select_section(0).unwrap();
        assert!(nav.unsubscribe(subscription));
        assert!(!nav.unsubscribe(subscription));
        nav.reset();
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn stale_plan_is_refused() {
        let mut nav = NavigationController::default();
        let planned = nav
            .plan(&NavigationRequest::SelectSection(4))
            .unwrap()
            .unwrap();
        nav.select_section(1).unwrap();

        assert!(matches!(
            nav.commit(planned),
            Err(NavigationError::InvalidTransition { .. })
        ));
        assert_eq!(nav.state().section_index(), Some(1));
    }

    #[test]
    fn deeper_fields_stay_unset_for_every_sequence() {
        let ops: [fn(&mut NavigationController); 5] = [
            |nav| {
                let _ = nav.select_section(2);
            },
            |nav| {
                let _ = nav.select_shelf(1);
            },
            |nav| {
                let _ = nav.select_item("x42", sample_catalog().snapshot(2, 0, "x42").unwrap());
            },
            |nav| {
                nav.go_back();
            },
            |nav| nav.reset(),
        ];

        // Every sequence of five operations.
        for mut code in 0..ops.len().pow(5) {
            let mut nav = NavigationController::default();
            for _ in 0..5 {
                ops[code % ops.len()](&mut nav);
                code /= ops.len();
                assert!(nav.state().is_consistent(), "{:?}", nav.state());
            }
        }
    }

    #[test]
    fn breadcrumb_lists_set_levels_root_first() {
        let catalog = sample_catalog();
        let mut nav = NavigationController::default();
        assert_eq!(nav.breadcrumb().len(), 1);

        nav.select_section(2).unwrap();
        nav.select_shelf(0).unwrap();
        let generic: Vec<String> = nav.breadcrumb().into_iter().map(|e| e.label).collect();
        assert_eq!(generic, vec!["Library", "Section 3", "Shelf 1"]);

        nav.select_item("x42", catalog.snapshot(2, 0, "x42").unwrap())
            .unwrap();
        let named: Vec<String> = nav
            .breadcrumb_with(&catalog)
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(
            named,
            vec!["Library", "Lab", "Experimental Prototypes", "Acoustic Hash Grid"]
        );
    }

    #[test]
    fn go_back_and_reset_invalidate_older_plans() {
        let mut nav = NavigationController::default();
        nav.select_section(0).unwrap();

        let planned = nav.plan(&NavigationRequest::SelectShelf(1)).unwrap().unwrap();
        nav.go_back();
        assert!(matches!(
            nav.commit(planned),
            Err(NavigationError::InvalidTransition { .. })
        ));
        assert_eq!(nav.level(), Level::Overview);

        nav.select_section(1).unwrap();
        let planned = nav.plan(&NavigationRequest::SelectShelf(0)).unwrap().unwrap();
        nav.reset();
        assert!(nav.commit(planned).is_err());
        assert_eq!(*nav.state(), NavigationState::overview());
    }
}
