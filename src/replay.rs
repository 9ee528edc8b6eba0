//! Scripted preview sessions.
//!
//! A replay script declares stories and an ordered list of steps (selection changes, signals,
//! reloads, load failures). [`replay`] wires a [`MemoryStore`], a [`LocalChannel`] and a
//! [`MemoryViewHost`] to a [`RenderCoordinator`], runs the steps and reports what was emitted
//! and what the surface ended up showing.

pub mod renderer;
pub mod script;

pub use renderer::ScriptRenderer;
pub use script::{Script, Step, StoryDefinition};

use log::debug;
use std::sync::Arc;

use crate::channel::{LocalChannel, NotificationChannel};
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::render::{Collaborators, Notification, RenderCoordinator, RenderMetadata};
use crate::store::{LoadError, MemoryStore, ReleasedHooks};
use crate::view::{MemoryViewHost, ViewSnapshot};

/// Outcome of a replayed session.
#[derive(Debug)]
pub struct ReplayReport {
    pub notifications: Vec<Notification>,
    pub view: ViewSnapshot,
    pub released: Vec<ReleasedHooks>,
    pub last_rendered: Option<RenderMetadata>,
}

/// Run `script` against fresh in-process collaborators.
pub async fn replay(script: &Script, config: &PreviewConfig) -> Result<ReplayReport> {
    let store = Arc::new(MemoryStore::new());
    for story in &script.stories {
        store.add_story(story.to_story_data());
    }

    let channel = Arc::new(LocalChannel::new());
    let view = Arc::new(MemoryViewHost::new());
    let renderer = Arc::new(ScriptRenderer::new(view.clone(), &script.stories));

    let mut coordinator = RenderCoordinator::new(
        Collaborators {
            store: store.clone(),
            channel: Some(channel.clone() as Arc<dyn NotificationChannel>),
            view: view.clone(),
            renderer,
        },
        config,
    );

    for (index, step) in script.steps()?.into_iter().enumerate() {
        debug!("step {index}: {step:?}");
        match step {
            Step::Select { story, view_mode } => store.select(story, view_mode),
            Step::Signal(signal) => coordinator.handle_signal(signal),
            Step::Reload => {
                store.reload();
            }
            Step::Remove { story } => {
                store.remove_story(&story);
            }
            Step::LoadError { message, stack } => {
                store.set_load_error(Some(LoadError { message, stack }))
            }
            Step::ClearLoadError => store.set_load_error(None),
            Step::Settle => coordinator.settle().await,
        }
    }
    coordinator.settle().await;

    Ok(ReplayReport {
        notifications: channel.emitted(),
        view: view.snapshot(),
        released: store.released_hooks(),
        last_rendered: coordinator.previous_metadata().cloned(),
    })
}
