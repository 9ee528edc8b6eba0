//! Render metadata snapshots and the diff between two of them.
//!
//! A [`RenderMetadata`] describes what the preview surface is showing. It is rebuilt on every
//! evaluation pass and compared against the snapshot of the last render to produce a
//! [`Transition`], which the coordinator walks to decide teardown, view switching and rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreviewError;

/// Which view the preview surface presents for the selected story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Render the story itself on the canvas
    #[default]
    Story,
    /// Render the aggregated documentation page
    Docs,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Story => "story",
            ViewMode::Docs => "docs",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "story" => Ok(ViewMode::Story),
            "docs" => Ok(ViewMode::Docs),
            other => Err(PreviewError::other(format!("unknown view mode '{other}'"))),
        }
    }
}

/// Snapshot of the last rendered target.
///
/// `id` and `kind` are absent when the selected story did not resolve in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderMetadata {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub revision: u64,
    pub view_mode: ViewMode,
}

/// Field-by-field differences between the previous and current metadata.
///
/// With no previous metadata (first render) every flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub first_render: bool,
    pub story_changed: bool,
    pub revision_changed: bool,
    pub view_mode_changed: bool,
    pub kind_changed: bool,
}

impl Transition {
    pub fn between(previous: Option<&RenderMetadata>, current: &RenderMetadata) -> Self {
        match previous {
            None => Self {
                first_render: true,
                story_changed: true,
                revision_changed: true,
                view_mode_changed: true,
                kind_changed: true,
            },
            Some(previous) => Self {
                first_render: false,
                story_changed: previous.id != current.id,
                revision_changed: previous.revision != current.revision,
                view_mode_changed: previous.view_mode != current.view_mode,
                kind_changed: previous.kind != current.kind,
            },
        }
    }

    /// True when the id, revision and view mode all match; `kind_changed` is not consulted.
    pub fn is_unchanged(&self) -> bool {
        !self.story_changed && !self.revision_changed && !self.view_mode_changed
    }

    /// A selection change between two renders of the same store revision.
    pub fn is_navigation(&self) -> bool {
        !self.first_render && !self.revision_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, kind: &str, revision: u64, view_mode: ViewMode) -> RenderMetadata {
        RenderMetadata {
            id: Some(id.to_string()),
            kind: Some(kind.to_string()),
            revision,
            view_mode,
        }
    }

    #[test]
    fn first_render_marks_everything_changed() {
        let current = meta("btn-1", "Button", 0, ViewMode::Story);
        let transition = Transition::between(None, &current);

        assert!(transition.first_render);
        assert!(transition.story_changed);
        assert!(transition.revision_changed);
        assert!(transition.view_mode_changed);
        assert!(transition.kind_changed);
        assert!(!transition.is_unchanged());
        assert!(!transition.is_navigation());
    }

    #[test]
    fn identical_snapshots_are_unchanged() {
        let previous = meta("btn-1", "Button", 3, ViewMode::Docs);
        let transition = Transition::between(Some(&previous), &previous.clone());
        assert!(transition.is_unchanged());
        assert!(!transition.kind_changed);
    }

    #[test]
    fn revision_bump_is_not_a_navigation() {
        let previous = meta("btn-1", "Button", 1, ViewMode::Story);
        let current = meta("btn-1", "Button", 2, ViewMode::Story);
        let transition = Transition::between(Some(&previous), &current);

        assert!(!transition.story_changed);
        assert!(transition.revision_changed);
        assert!(!transition.is_unchanged());
        assert!(!transition.is_navigation());
    }

    #[test]
    fn selecting_another_story_is_a_navigation() {
        let previous = meta("btn-1", "Button", 1, ViewMode::Story);
        let current = meta("input-1", "Input", 1, ViewMode::Story);
        let transition = Transition::between(Some(&previous), &current);

        assert!(transition.story_changed);
        assert!(transition.kind_changed);
        assert!(transition.is_navigation());
    }

    #[test]
    fn unresolved_story_differs_from_resolved_one() {
        let previous = meta("btn-1", "Button", 1, ViewMode::Story);
        let current = RenderMetadata {
            id: None,
            kind: None,
            revision: 1,
            view_mode: ViewMode::Story,
        };
        assert!(Transition::between(Some(&previous), &current).story_changed);
    }

    #[test]
    fn view_mode_parses_and_displays() {
        assert_eq!("docs".parse::<ViewMode>().unwrap(), ViewMode::Docs);
        assert_eq!(ViewMode::Story.to_string(), "story");
        assert!("canvas".parse::<ViewMode>().is_err());
    }
}
