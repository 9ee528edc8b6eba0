//! Render coordination.
//!
//! [`RenderCoordinator`] turns signals and the current store state into render decisions. Each
//! evaluation pass builds fresh [`RenderMetadata`], diffs it against the last render, tears down
//! the old view, switches the visible view when the mode moved, and hands the new target to the
//! docs composition or to the pluggable [`StoryRenderer`].
//!
//! Story renders are detached onto a [`JoinSet`] and never awaited by the pass that started
//! them. Their outcome is reported through the [`DisplayHandle`] and story id captured at
//! dispatch time. A render superseded by a newer pass is not cancelled; its outcome is simply
//! reported late, against its own id.

use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, info, warn};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::channel::NotificationChannel;
use crate::config::PreviewConfig;
use crate::render::context::{RenderContext, RenderReporter};
use crate::render::display::DisplayHandle;
use crate::render::docs;
use crate::render::layout::StyleMemo;
use crate::render::markup::{AnsiMarkup, MarkupConverter};
use crate::render::metadata::{RenderMetadata, Transition, ViewMode};
use crate::render::protocol::{ExceptionReport, Notification, Signal};
use crate::store::{ContentStore, StoryData};
use crate::view::{ComponentTree, ViewHost, ViewTarget};

/// The pluggable render function that draws a story into the story target.
///
/// Once invoked it is the sole writer of the story view. Returning an error, or panicking,
/// routes to the exception display.
#[async_trait]
pub trait StoryRenderer: Send + Sync {
    async fn render(&self, context: RenderContext) -> anyhow::Result<()>;
}

/// External collaborators the coordinator is constructed with.
pub struct Collaborators {
    pub store: Arc<dyn ContentStore>,
    /// Absent in headless mode
    pub channel: Option<Arc<dyn NotificationChannel>>,
    pub view: Arc<dyn ViewHost>,
    pub renderer: Arc<dyn StoryRenderer>,
}

pub struct RenderCoordinator {
    store: Arc<dyn ContentStore>,
    view: Arc<dyn ViewHost>,
    renderer: Arc<dyn StoryRenderer>,
    display: DisplayHandle,
    previous_metadata: Option<RenderMetadata>,
    styles: StyleMemo,
    in_flight: JoinSet<()>,
}

impl RenderCoordinator {
    pub fn new(collaborators: Collaborators, config: &PreviewConfig) -> Self {
        Self::with_converter(collaborators, config, Arc::new(AnsiMarkup::new()))
    }

    pub fn with_converter(
        collaborators: Collaborators,
        config: &PreviewConfig,
        converter: Arc<dyn MarkupConverter>,
    ) -> Self {
        let Collaborators {
            store,
            channel,
            view,
            renderer,
        } = collaborators;
        let channel = if config.headless { None } else { channel };
        let display = DisplayHandle::new(Arc::clone(&view), channel, converter);

        let coordinator = Self {
            store,
            view,
            renderer,
            display,
            previous_metadata: None,
            styles: StyleMemo::new(),
            in_flight: JoinSet::new(),
        };
        coordinator.prepare_surface();
        coordinator
    }

    /// The first story render never toggles visibility, so the story target starts visible and
    /// the docs target hidden.
    fn prepare_surface(&self) {
        self.view.set_hidden(ViewTarget::Story, false);
        self.view.set_hidden(ViewTarget::Docs, true);
    }

    pub fn previous_metadata(&self) -> Option<&RenderMetadata> {
        self.previous_metadata.as_ref()
    }

    /// Reporter for collaborators outside a render, such as a validation layer
    pub fn reporter(&self) -> RenderReporter {
        RenderReporter::new(self.display.clone())
    }

    /// Number of story renders dispatched and not yet reaped
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn handle_signal(&mut self, signal: Signal) {
        debug!("received {signal}");
        self.render_current(signal.force_render());
    }

    /// Evaluate the current selection and render it if anything relevant changed.
    ///
    /// Must be called within a tokio runtime; story renders are spawned onto it.
    pub fn render_current(&mut self, force_render: bool) {
        self.reap_finished();

        if let Some(error) = self.store.load_error() {
            warn!("store failed to load stories: {}", error.message);
            self.display.show_error_display(&error.message, &error.stack);
            return;
        }

        let selection = self.store.selection();
        let story = self.store.resolve_by_id(&selection.story_id);
        let view_mode = if story.as_ref().is_some_and(StoryData::docs_only) {
            ViewMode::Docs
        } else {
            selection.view_mode
        };

        let metadata = RenderMetadata {
            id: story.as_ref().map(|s| s.id.clone()),
            kind: story.as_ref().map(|s| s.kind.clone()),
            revision: self.store.revision(),
            view_mode,
        };

        self.styles
            .apply(story.as_ref().and_then(StoryData::layout), self.view.as_ref());

        // Keep the requested id when resolution failed so the outcome is attributable
        let context = RenderContext {
            id: metadata.id.clone().unwrap_or(selection.story_id),
            story,
            force_render,
            reporter: self.reporter(),
        };

        self.render_if_changed(metadata, context);
    }

    fn render_if_changed(&mut self, metadata: RenderMetadata, context: RenderContext) {
        let force_render = context.force_render;
        let transition = Transition::between(self.previous_metadata.as_ref(), &metadata);

        if !force_render && transition.is_unchanged() {
            debug!("story {} unchanged", context.id);
            self.display.emit(Notification::StoryUnchanged {
                metadata,
                name: context.name().map(str::to_string),
            });
            return;
        }

        if !force_render && transition.is_navigation() {
            self.display.emit(Notification::StoryChanged {
                id: metadata.id.clone(),
            });
        }

        self.teardown(&transition);

        if transition.view_mode_changed {
            self.switch_view(metadata.view_mode, transition.first_render);
        }

        match metadata.view_mode {
            ViewMode::Docs => self.render_docs(&context),
            ViewMode::Story => self.render_story(context),
        }

        let view_mode = metadata.view_mode;
        self.previous_metadata = Some(metadata);

        if !force_render && view_mode != ViewMode::Docs {
            self.view.reset_scroll();
        }
    }

    /// Release hook state and unmount the view of the previous render.
    fn teardown(&self, transition: &Transition) {
        let previous = self.previous_metadata.as_ref();
        match previous.map(|p| p.view_mode).unwrap_or_default() {
            ViewMode::Docs => {
                if transition.kind_changed || transition.view_mode_changed {
                    if let Some(kind) = previous.and_then(|p| p.kind.as_deref()) {
                        self.store.release_hooks_for_kind(kind);
                    }
                    debug!("tearing down docs view");
                    self.view.unmount(ViewTarget::Docs);
                }
            }
            ViewMode::Story => {
                let Some(previous) = previous else {
                    return;
                };
                if transition.story_changed || transition.view_mode_changed {
                    if let Some(id) = previous.id.as_deref() {
                        self.store.release_hooks_for_story(id);
                    }
                    debug!("tearing down story view");
                    self.view.unmount(ViewTarget::Story);
                }
            }
        }
    }

    fn switch_view(&self, view_mode: ViewMode, first_render: bool) {
        match view_mode {
            ViewMode::Docs => {
                // Main, then docs revealed, then story hidden
                self.display.show_main();
                self.view.set_hidden(ViewTarget::Docs, false);
                self.view.set_hidden(ViewTarget::Story, true);
            }
            ViewMode::Story => {
                if first_render {
                    return;
                }
                self.view.set_hidden(ViewTarget::Story, false);
                self.view.set_hidden(ViewTarget::Docs, true);
            }
        }
        debug!("switched to {view_mode} view");
    }

    fn render_story(&mut self, context: RenderContext) {
        if context.story_fn().is_none() {
            info!("no preview for story {}", context.id);
            self.display.show_no_preview();
            self.display
                .emit(Notification::StoryMissing { id: context.id });
            return;
        }

        let renderer = Arc::clone(&self.renderer);
        let display = self.display.clone();
        let id = context.id.clone();
        self.in_flight.spawn(async move {
            match AssertUnwindSafe(renderer.render(context)).catch_unwind().await {
                Ok(Ok(())) => display.emit(Notification::StoryRendered { id }),
                Ok(Err(error)) => display.show_exception(ExceptionReport::from_error(&error)),
                Err(payload) => display.show_exception(ExceptionReport::from_panic(payload.as_ref())),
            }
        });
    }

    fn render_docs(&self, context: &RenderContext) {
        let Some(composition) = docs::compose(context, Arc::clone(&self.store)) else {
            debug!("nothing to document for {}", context.id);
            return;
        };
        let kind = context.kind().map(str::to_string);
        match self
            .view
            .mount(ViewTarget::Docs, ComponentTree::Docs(composition))
        {
            Ok(()) => self.display.emit(Notification::DocsRendered { kind }),
            Err(error) => self
                .display
                .show_exception(ExceptionReport::from_error(&anyhow::Error::from(error))),
        }
    }

    /// Wait for every dispatched story render to report its outcome.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            Self::reap(joined);
        }
    }

    /// Drop renders that already reported their outcome.
    fn reap_finished(&mut self) {
        while let Some(joined) = self.in_flight.try_join_next() {
            Self::reap(joined);
        }
    }

    fn reap(joined: Result<(), tokio::task::JoinError>) {
        if let Err(err) = joined {
            warn!("story render task ended abnormally: {err}");
        }
    }

    /// Process signals until the channel's signal stream closes.
    ///
    /// Returns immediately when no channel is attached or its signals were already taken.
    pub async fn run(&mut self) {
        let Some(mut signals) = self.display.channel().and_then(|c| c.take_signals()) else {
            debug!("no notification channel attached; not subscribing to signals");
            return;
        };

        loop {
            tokio::select! {
                signal = signals.recv() => match signal {
                    Some(signal) => self.handle_signal(signal),
                    None => break,
                },
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    Self::reap(joined);
                }
            }
        }

        self.settle().await;
    }
}

#[cfg(test)]
mod coordinator_tests {
    use super::*;
    use crate::channel::LocalChannel;
    use crate::store::MemoryStore;
    use crate::view::{MemoryViewHost, StateClass, ViewOp};

    struct Unreachable;

    #[async_trait]
    impl StoryRenderer for Unreachable {
        async fn render(&self, _context: RenderContext) -> anyhow::Result<()> {
            anyhow::bail!("not expected to render")
        }
    }

    fn coordinator(view: Arc<MemoryViewHost>, channel: Arc<LocalChannel>) -> RenderCoordinator {
        RenderCoordinator::new(
            Collaborators {
                store: Arc::new(MemoryStore::new()),
                channel: Some(channel as Arc<dyn NotificationChannel>),
                view,
                renderer: Arc::new(Unreachable),
            },
            &PreviewConfig::default(),
        )
    }

    #[test]
    fn construction_prepares_default_visibility() {
        let view = Arc::new(MemoryViewHost::new());
        let _coordinator = coordinator(view.clone(), Arc::new(LocalChannel::new()));
        assert_eq!(
            view.snapshot().ops,
            vec![
                ViewOp::Reveal(ViewTarget::Story),
                ViewOp::Hide(ViewTarget::Docs)
            ]
        );
    }

    #[test]
    fn reporter_outside_render_reaches_display_and_channel() {
        let view = Arc::new(MemoryViewHost::new());
        let channel = Arc::new(LocalChannel::new());
        let coordinator = coordinator(view.clone(), channel.clone());

        coordinator.reporter().show_error("Invalid args", "`label` must be a string");
        assert_eq!(channel.emitted().len(), 1);
        assert_eq!(view.snapshot().active_class(), Some(StateClass::Error));

        coordinator.reporter().show_main();
        assert_eq!(view.snapshot().active_class(), Some(StateClass::Main));
    }

    #[tokio::test]
    async fn missing_selection_never_dispatches_a_render() {
        let view = Arc::new(MemoryViewHost::new());
        let channel = Arc::new(LocalChannel::new());
        let mut coordinator = coordinator(view, channel.clone());

        coordinator.render_current(false);
        assert_eq!(coordinator.in_flight(), 0);
        assert_eq!(
            channel.emitted(),
            vec![Notification::StoryMissing { id: String::new() }]
        );
    }
}
