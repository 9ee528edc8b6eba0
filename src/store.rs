//! Content store abstraction.
//!
//! The store owns story definitions, the current selection, the revision counter and the
//! per-story/per-kind hook state that the coordinator releases on teardown.

pub mod memory;

pub use memory::{MemoryStore, ReleasedHooks};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::render::metadata::ViewMode;

/// Story id standing for "no particular story selected".
pub const UNIVERSAL_STORY_ID: &str = "*";

/// The selection the host page currently requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub story_id: String,
    pub view_mode: ViewMode,
}

impl Selection {
    pub fn new(story_id: impl Into<String>, view_mode: ViewMode) -> Self {
        Self {
            story_id: story_id.into(),
            view_mode,
        }
    }
}

/// Failure of the store to produce story data at all (for example a broken build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
    pub stack: String,
}

/// Documentation components declared by a story.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsParameters {
    pub container: Option<String>,
    pub page: Option<String>,
}

/// Parameters a story declares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Story only exists as documentation; always rendered in docs mode
    pub docs_only: bool,
    pub layout: Option<String>,
    pub docs: Option<DocsParameters>,
}

/// A story function with all decorators applied; produces the story's markup.
#[derive(Clone)]
pub struct DecoratedStory(Arc<dyn Fn() -> String + Send + Sync>);

impl DecoratedStory {
    pub fn new(story_fn: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(story_fn))
    }

    pub fn call(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for DecoratedStory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecoratedStory(..)")
    }
}

/// A story resolved from the store.
#[derive(Debug, Clone)]
pub struct StoryData {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub parameters: Option<Parameters>,
    /// Absent when the story could not be prepared for rendering
    pub story_fn: Option<DecoratedStory>,
}

impl StoryData {
    pub fn docs_only(&self) -> bool {
        self.parameters.as_ref().is_some_and(|p| p.docs_only)
    }

    pub fn layout(&self) -> Option<&str> {
        self.parameters.as_ref().and_then(|p| p.layout.as_deref())
    }
}

/// Core trait for the story store the coordinator reads from.
pub trait ContentStore: Send + Sync {
    /// The store's load failure, if story definitions could not be produced
    fn load_error(&self) -> Option<LoadError>;

    fn selection(&self) -> Selection;

    /// Resolve a story by id; `None` for unknown or deleted stories
    fn resolve_by_id(&self, story_id: &str) -> Option<StoryData>;

    /// Counter bumped every time story definitions are reloaded
    fn revision(&self) -> u64;

    fn release_hooks_for_story(&self, story_id: &str);

    fn release_hooks_for_kind(&self, kind: &str);
}
