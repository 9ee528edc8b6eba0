use async_trait::async_trait;
use proptest::prelude::*;
use std::sync::Arc;

use storyview::channel::{LocalChannel, NotificationChannel};
use storyview::config::PreviewConfig;
use storyview::render::{
    Collaborators, Notification, RenderContext, RenderCoordinator, StoryRenderer, ViewMode,
};
use storyview::store::{DecoratedStory, MemoryStore, Parameters, StoryData};
use storyview::view::MemoryViewHost;

struct NoopRenderer;

#[async_trait]
impl StoryRenderer for NoopRenderer {
    async fn render(&self, context: RenderContext) -> anyhow::Result<()> {
        context.reporter.show_main();
        Ok(())
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build runtime")
}

fn layout_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("centered".to_string())),
        Just(Some("fullscreen".to_string())),
        Just(Some("padded".to_string())),
        "[a-z]{3,6}".prop_map(Some),
    ]
}

fn view_mode_strategy() -> impl Strategy<Value = ViewMode> {
    prop_oneof![Just(ViewMode::Story), Just(ViewMode::Docs)]
}

struct Setup {
    store: Arc<MemoryStore>,
    channel: Arc<LocalChannel>,
    view: Arc<MemoryViewHost>,
    coordinator: RenderCoordinator,
}

fn setup(id: &str, kind: &str, layout: Option<String>, view_mode: ViewMode) -> Setup {
    let store = Arc::new(MemoryStore::new());
    let channel = Arc::new(LocalChannel::new());
    let view = Arc::new(MemoryViewHost::new());

    store.add_story(StoryData {
        id: id.to_string(),
        kind: kind.to_string(),
        name: "Story".to_string(),
        parameters: Some(Parameters {
            layout,
            ..Parameters::default()
        }),
        story_fn: Some(DecoratedStory::new(|| "<div/>".to_string())),
    });
    store.select(id, view_mode);

    let coordinator = RenderCoordinator::new(
        Collaborators {
            store: store.clone(),
            channel: Some(channel.clone() as Arc<dyn NotificationChannel>),
            view: view.clone(),
            renderer: Arc::new(NoopRenderer),
        },
        &PreviewConfig::default(),
    );

    Setup {
        store,
        channel,
        view,
        coordinator,
    }
}

proptest! {
    #[test]
    fn identical_metadata_only_emits_unchanged(
        id in "[a-z]{1,8}",
        kind in "[A-Z][a-z]{1,8}",
        layout in layout_strategy(),
        view_mode in view_mode_strategy(),
        reloads in 0u64..4,
        passes in 1usize..8,
    ) {
        let rt = runtime();
        rt.block_on(async {
            let mut s = setup(&id, &kind, layout, view_mode);
            for _ in 0..reloads {
                s.store.reload();
            }
            s.coordinator.render_current(false);
            s.coordinator.settle().await;
            s.channel.drain();
            s.view.clear_ops();

            for _ in 0..passes {
                s.coordinator.render_current(false);
                s.coordinator.settle().await;
            }

            let emitted = s.channel.emitted();
            prop_assert_eq!(emitted.len(), passes);
            let all_unchanged = emitted
                .iter()
                .all(|n| matches!(n, Notification::StoryUnchanged { .. }));
            prop_assert!(all_unchanged);
            prop_assert!(s.view.snapshot().ops.is_empty());
            Ok(())
        })?;
    }

    #[test]
    fn force_render_never_reports_unchanged(
        id in "[a-z]{1,8}",
        view_mode in view_mode_strategy(),
        passes in 1usize..8,
    ) {
        let rt = runtime();
        rt.block_on(async {
            let mut s = setup(&id, "Kind", None, view_mode);
            for _ in 0..passes {
                s.coordinator.render_current(true);
                s.coordinator.settle().await;
            }

            let emitted = s.channel.emitted();
            let any_unchanged = emitted
                .iter()
                .any(|n| matches!(n, Notification::StoryUnchanged { .. }));
            prop_assert!(!any_unchanged);
            let expected = match view_mode {
                ViewMode::Story => Notification::StoryRendered { id: id.clone() },
                ViewMode::Docs => Notification::DocsRendered { kind: Some("Kind".to_string()) },
            };
            prop_assert_eq!(emitted.iter().filter(|n| **n == expected).count(), passes);
            prop_assert_eq!(s.view.snapshot().scroll_resets, 0);
            Ok(())
        })?;
    }
}
