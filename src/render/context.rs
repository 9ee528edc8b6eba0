//! Payload handed to the render step and the callbacks it reports through.

use std::fmt;

use crate::render::display::DisplayHandle;
use crate::render::protocol::ExceptionReport;
use crate::store::{DecoratedStory, Parameters, StoryData};

/// Callbacks a render function uses to report outcomes back into the coordinator.
#[derive(Clone)]
pub struct RenderReporter {
    display: DisplayHandle,
}

impl RenderReporter {
    pub(crate) fn new(display: DisplayHandle) -> Self {
        Self { display }
    }

    /// The story rendered and the canvas should be visible
    pub fn show_main(&self) {
        self.display.show_main();
    }

    /// A deliberate, user-actionable problem
    pub fn show_error(&self, title: &str, description: &str) {
        self.display.show_error(title, description);
    }

    /// An unexpected failure the render function caught itself
    pub fn show_exception(&self, error: &anyhow::Error) {
        self.display.show_exception(ExceptionReport::from_error(error));
    }
}

impl fmt::Debug for RenderReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderReporter(..)")
    }
}

/// Everything a render function needs to draw one story.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The resolved story id, or the requested one when resolution failed
    pub id: String,
    pub story: Option<StoryData>,
    pub force_render: bool,
    pub reporter: RenderReporter,
}

impl RenderContext {
    pub fn kind(&self) -> Option<&str> {
        self.story.as_ref().map(|s| s.kind.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.story.as_ref().map(|s| s.name.as_str())
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.story.as_ref().and_then(|s| s.parameters.as_ref())
    }

    pub fn story_fn(&self) -> Option<&DecoratedStory> {
        self.story.as_ref().and_then(|s| s.story_fn.as_ref())
    }
}
