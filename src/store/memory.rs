//! In-process content store.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::{ContentStore, LoadError, Selection, StoryData};
use crate::render::metadata::ViewMode;

/// Hook state released by the coordinator, in release order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasedHooks {
    Story(String),
    Kind(String),
}

#[derive(Default)]
struct StoreState {
    selection: Selection,
    stories: HashMap<String, StoryData>,
    revision: u64,
    load_error: Option<LoadError>,
    released: Vec<ReleasedHooks>,
}

/// Content store backed by a map of stories.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a story definition
    pub fn add_story(&self, story: StoryData) {
        self.state.lock().stories.insert(story.id.clone(), story);
    }

    pub fn remove_story(&self, story_id: &str) -> Option<StoryData> {
        self.state.lock().stories.remove(story_id)
    }

    pub fn select(&self, story_id: impl Into<String>, view_mode: ViewMode) {
        self.state.lock().selection = Selection::new(story_id, view_mode);
    }

    /// Mark story definitions as reloaded; returns the new revision
    pub fn reload(&self) -> u64 {
        let mut state = self.state.lock();
        state.revision += 1;
        state.revision
    }

    pub fn set_load_error(&self, error: Option<LoadError>) {
        self.state.lock().load_error = error;
    }

    pub fn released_hooks(&self) -> Vec<ReleasedHooks> {
        self.state.lock().released.clone()
    }
}

impl ContentStore for MemoryStore {
    fn load_error(&self) -> Option<LoadError> {
        self.state.lock().load_error.clone()
    }

    fn selection(&self) -> Selection {
        self.state.lock().selection.clone()
    }

    fn resolve_by_id(&self, story_id: &str) -> Option<StoryData> {
        self.state.lock().stories.get(story_id).cloned()
    }

    fn revision(&self) -> u64 {
        self.state.lock().revision
    }

    fn release_hooks_for_story(&self, story_id: &str) {
        self.state
            .lock()
            .released
            .push(ReleasedHooks::Story(story_id.to_string()));
    }

    fn release_hooks_for_kind(&self, kind: &str) {
        self.state
            .lock()
            .released
            .push(ReleasedHooks::Kind(kind.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DecoratedStory, Parameters};

    fn story(id: &str) -> StoryData {
        StoryData {
            id: id.to_string(),
            kind: "Button".to_string(),
            name: "Primary".to_string(),
            parameters: Some(Parameters::default()),
            story_fn: Some(DecoratedStory::new(|| "<button/>".to_string())),
        }
    }

    #[test]
    fn resolves_added_stories_only() {
        let store = MemoryStore::new();
        store.add_story(story("btn-1"));

        assert_eq!(store.resolve_by_id("btn-1").unwrap().kind, "Button");
        assert!(store.resolve_by_id("ghost").is_none());

        store.remove_story("btn-1");
        assert!(store.resolve_by_id("btn-1").is_none());
    }

    #[test]
    fn reload_bumps_revision() {
        let store = MemoryStore::new();
        assert_eq!(store.revision(), 0);
        assert_eq!(store.reload(), 1);
        assert_eq!(store.reload(), 2);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn selection_and_load_error_round_trip_through_store() {
        let store = MemoryStore::new();
        store.select("btn-1", ViewMode::Docs);
        assert_eq!(store.selection(), Selection::new("btn-1", ViewMode::Docs));

        store.set_load_error(Some(LoadError {
            message: "bad build".to_string(),
            stack: String::new(),
        }));
        assert!(store.load_error().is_some());
        store.set_load_error(None);
        assert!(store.load_error().is_none());
    }

    #[test]
    fn records_released_hooks_in_order() {
        let store = MemoryStore::new();
        store.release_hooks_for_story("btn-1");
        store.release_hooks_for_kind("Button");
        assert_eq!(
            store.released_hooks(),
            vec![
                ReleasedHooks::Story("btn-1".to_string()),
                ReleasedHooks::Kind("Button".to_string())
            ]
        );
    }
}
