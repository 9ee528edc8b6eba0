//! Protocol definitions shared between the render coordinator and the notification channel.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::PreviewError;
use crate::render::metadata::RenderMetadata;

/// Signals the coordinator subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Re-evaluate the current selection
    RenderCurrentStory,
    /// Story args were updated; re-render even if the selection is unchanged
    ArgsUpdated,
    /// Explicit re-render request
    ForceReRender,
}

impl Signal {
    pub const ALL: [Signal; 3] = [
        Signal::RenderCurrentStory,
        Signal::ArgsUpdated,
        Signal::ForceReRender,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::RenderCurrentStory => "render-current-story",
            Signal::ArgsUpdated => "args-updated",
            Signal::ForceReRender => "force-re-render",
        }
    }

    /// Whether this signal bypasses the unchanged fast path
    pub fn force_render(self) -> bool {
        !matches!(self, Signal::RenderCurrentStory)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|signal| signal.name() == s)
            .ok_or_else(|| PreviewError::unknown_signal(s))
    }
}

/// Message and stack of an uncaught render failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionReport {
    pub message: String,
    pub stack: String,
}

impl ExceptionReport {
    /// Build a report from an error; the stack is the full cause chain.
    pub fn from_error(error: &anyhow::Error) -> Self {
        Self {
            message: error.to_string(),
            stack: format!("{error:?}"),
        }
    }

    /// Build a report from a panic payload caught around a render.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "render function panicked".to_string());
        Self {
            stack: format!("panic: {message}"),
            message,
        }
    }
}

/// Outcomes the coordinator publishes on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Notification {
    StoryUnchanged {
        metadata: RenderMetadata,
        name: Option<String>,
    },
    StoryChanged {
        id: Option<String>,
    },
    StoryMissing {
        id: String,
    },
    StoryRendered {
        id: String,
    },
    StoryErrored {
        title: String,
        description: String,
    },
    StoryThrewException(ExceptionReport),
    DocsRendered {
        kind: Option<String>,
    },
}

impl Notification {
    pub fn name(&self) -> &'static str {
        match self {
            Notification::StoryUnchanged { .. } => "story-unchanged",
            Notification::StoryChanged { .. } => "story-changed",
            Notification::StoryMissing { .. } => "story-missing",
            Notification::StoryRendered { .. } => "story-rendered",
            Notification::StoryErrored { .. } => "story-errored",
            Notification::StoryThrewException(_) => "story-threw-exception",
            Notification::DocsRendered { .. } => "docs-rendered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::metadata::ViewMode;

    #[test]
    fn signal_names_round_trip() {
        for signal in Signal::ALL {
            assert_eq!(signal.name().parse::<Signal>().unwrap(), signal);
        }
        assert!(matches!(
            "render".parse::<Signal>(),
            Err(PreviewError::UnknownSignal { .. })
        ));
    }

    #[test]
    fn only_render_current_respects_fast_path() {
        assert!(!Signal::RenderCurrentStory.force_render());
        assert!(Signal::ArgsUpdated.force_render());
        assert!(Signal::ForceReRender.force_render());
    }

    #[test]
    fn exception_report_keeps_cause_chain() {
        let error = anyhow::anyhow!("disk gone").context("render failed");
        let report = ExceptionReport::from_error(&error);
        assert_eq!(report.message, "render failed");
        assert!(report.stack.contains("disk gone"));
    }

    #[test]
    fn exception_report_from_panic_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("bad state");
        assert_eq!(ExceptionReport::from_panic(payload.as_ref()).message, "bad state");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(ExceptionReport::from_panic(payload.as_ref()).message, "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(
            ExceptionReport::from_panic(payload.as_ref()).message,
            "render function panicked"
        );
    }

    #[test]
    fn notifications_serialize_with_event_tag() {
        let unchanged = Notification::StoryUnchanged {
            metadata: RenderMetadata {
                id: Some("btn-1".to_string()),
                kind: Some("Button".to_string()),
                revision: 2,
                view_mode: ViewMode::Story,
            },
            name: Some("Primary".to_string()),
        };
        let json = serde_json::to_value(&unchanged).unwrap();
        assert_eq!(json["event"], "story-unchanged");
        assert_eq!(json["metadata"]["view_mode"], "story");
        assert_eq!(unchanged.name(), "story-unchanged");

        let thrown = Notification::StoryThrewException(ExceptionReport {
            message: "boom".to_string(),
            stack: "boom".to_string(),
        });
        let json = serde_json::to_value(&thrown).unwrap();
        assert_eq!(json["event"], "story-threw-exception");
        assert_eq!(json["message"], "boom");
    }
}
