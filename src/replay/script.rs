//! Replay script format.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{PreviewError, Result};
use crate::render::{Signal, ViewMode};
use crate::store::{DecoratedStory, Parameters, StoryData};

/// How a story's render function behaves when replayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StoryDefinition {
    pub id: String,
    pub kind: String,
    pub name: String,
    /// Markup produced by the story; a story without markup has no story function
    pub markup: Option<String>,
    pub parameters: Option<Parameters>,
    /// The render function fails with this message
    pub fail: Option<String>,
    /// The render function reports this `(title, description)` through `show_error`
    pub report_error: Option<ReportedError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportedError {
    pub title: String,
    pub description: String,
}

impl StoryDefinition {
    pub fn to_story_data(&self) -> StoryData {
        StoryData {
            id: self.id.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            parameters: self.parameters.clone(),
            story_fn: self.markup.clone().map(|markup| DecoratedStory::new(move || markup.clone())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
enum RawStep {
    Select {
        story: String,
        #[serde(default)]
        view_mode: ViewMode,
    },
    Signal {
        name: String,
    },
    Reload,
    Remove {
        story: String,
    },
    LoadError {
        message: String,
        #[serde(default)]
        stack: String,
    },
    ClearLoadError,
    Settle,
}

/// One validated replay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Select { story: String, view_mode: ViewMode },
    Signal(Signal),
    Reload,
    Remove { story: String },
    LoadError { message: String, stack: String },
    ClearLoadError,
    /// Wait for dispatched story renders to finish
    Settle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub stories: Vec<StoryDefinition>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

impl Script {
    pub fn parse(raw: &str) -> Result<Self> {
        let script: Script =
            toml::from_str(raw).map_err(|err| PreviewError::script(err.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PreviewError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|err| PreviewError::file_error(format!("reading {}", path.display()), err))?;
        Self::parse(&raw)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for story in &self.stories {
            if story.id.is_empty() {
                return Err(PreviewError::script("story without an id"));
            }
            if !seen.insert(story.id.as_str()) {
                return Err(PreviewError::script(format!(
                    "story '{}' defined twice",
                    story.id
                )));
            }
        }
        self.steps().map(|_| ())
    }

    /// Steps in order, with signal names resolved
    pub fn steps(&self) -> Result<Vec<Step>> {
        self.steps
            .iter()
            .cloned()
            .map(|raw| -> Result<Step> {
                Ok(match raw {
                    RawStep::Select { story, view_mode } => Step::Select { story, view_mode },
                    RawStep::Signal { name } => Step::Signal(name.parse()?),
                    RawStep::Reload => Step::Reload,
                    RawStep::Remove { story } => Step::Remove { story },
                    RawStep::LoadError { message, stack } => Step::LoadError { message, stack },
                    RawStep::ClearLoadError => Step::ClearLoadError,
                    RawStep::Settle => Step::Settle,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
[[stories]]
id = "btn-1"
kind = "Button"
name = "Primary"
markup = "<button>Primary</button>"

[stories.parameters]
layout = "centered"

[[stories]]
id = "intro"
kind = "Intro"
name = "Page"

[stories.parameters]
docs_only = true

[[steps]]
action = "select"
story = "btn-1"

[[steps]]
action = "signal"
name = "render-current-story"

[[steps]]
action = "load-error"
message = "bad build"
"#;

    #[test]
    fn parses_stories_and_steps() {
        let script = Script::parse(SCRIPT).unwrap();
        assert_eq!(script.stories.len(), 2);
        assert!(script.stories[1].parameters.as_ref().unwrap().docs_only);

        let steps = script.steps().unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Select {
                    story: "btn-1".to_string(),
                    view_mode: ViewMode::Story
                },
                Step::Signal(Signal::RenderCurrentStory),
                Step::LoadError {
                    message: "bad build".to_string(),
                    stack: String::new()
                },
            ]
        );
    }

    #[test]
    fn story_without_markup_has_no_story_fn() {
        let script = Script::parse(SCRIPT).unwrap();
        assert!(script.stories[0].to_story_data().story_fn.is_some());
        assert!(script.stories[1].to_story_data().story_fn.is_none());
    }

    #[test]
    fn rejects_unknown_signals() {
        let err = Script::parse("[[steps]]\naction = \"signal\"\nname = \"repaint\"\n").unwrap_err();
        assert!(matches!(err, PreviewError::UnknownSignal { .. }));
    }

    #[test]
    fn rejects_duplicate_story_ids() {
        let raw = "[[stories]]\nid = \"a\"\n[[stories]]\nid = \"a\"\n";
        assert!(matches!(
            Script::parse(raw),
            Err(PreviewError::ScriptError { .. })
        ));
    }

    #[test]
    fn rejects_unknown_actions() {
        assert!(Script::parse("[[steps]]\naction = \"explode\"\n").is_err());
    }
}
