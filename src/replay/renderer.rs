//! Render function used by replayed sessions.

use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::script::{ReportedError, StoryDefinition};
use crate::render::{RenderContext, StoryRenderer};
use crate::view::{ComponentTree, ViewHost, ViewTarget};

#[derive(Debug, Clone)]
enum Behavior {
    Fail(String),
    ReportError(ReportedError),
}

/// Mounts each story's markup into the story target, or misbehaves as its definition asks.
pub struct ScriptRenderer {
    view: Arc<dyn ViewHost>,
    behaviors: HashMap<String, Behavior>,
}

impl ScriptRenderer {
    pub fn new(view: Arc<dyn ViewHost>, stories: &[StoryDefinition]) -> Self {
        let behaviors = stories
            .iter()
            .filter_map(|story| {
                let behavior = match (&story.fail, &story.report_error) {
                    (Some(message), _) => Behavior::Fail(message.clone()),
                    (None, Some(reported)) => Behavior::ReportError(reported.clone()),
                    (None, None) => return None,
                };
                Some((story.id.clone(), behavior))
            })
            .collect();
        Self { view, behaviors }
    }
}

#[async_trait]
impl StoryRenderer for ScriptRenderer {
    async fn render(&self, context: RenderContext) -> anyhow::Result<()> {
        match self.behaviors.get(&context.id) {
            Some(Behavior::Fail(message)) => return Err(anyhow!("{message}")),
            Some(Behavior::ReportError(reported)) => {
                context
                    .reporter
                    .show_error(&reported.title, &reported.description);
                return Ok(());
            }
            None => {}
        }

        let story_fn = context
            .story_fn()
            .ok_or_else(|| anyhow!("story {} has no story function", context.id))?;
        let markup = story_fn.call();
        self.view.mount(
            ViewTarget::Story,
            ComponentTree::Story {
                id: context.id.clone(),
                markup,
            },
        )?;
        context.reporter.show_main();
        Ok(())
    }
}
