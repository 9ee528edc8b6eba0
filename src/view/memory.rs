//! In-process view host that records state and every mutation.
//!
//! Used by the integration tests and the replay tool in place of a real UI layer.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::{ComponentTree, StateClass, TextRegion, ViewHost, ViewTarget};
use crate::error::{PreviewError, Result};

/// One recorded view mutation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOp {
    Mount(ViewTarget),
    Unmount(ViewTarget),
    Hide(ViewTarget),
    Reveal(ViewTarget),
    SetText(TextRegion),
    SetClass(StateClass, bool),
    SetRootStyle,
    ResetScroll,
}

/// Point-in-time copy of the recorded view state.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub mounted: HashMap<ViewTarget, ComponentTree>,
    pub hidden: HashSet<ViewTarget>,
    pub text: HashMap<TextRegion, String>,
    pub classes: HashSet<StateClass>,
    pub root_style: Option<String>,
    pub style_writes: usize,
    pub scroll_resets: usize,
    pub ops: Vec<ViewOp>,
}

impl ViewSnapshot {
    /// The single state class currently set, if any
    pub fn active_class(&self) -> Option<StateClass> {
        StateClass::ALL
            .into_iter()
            .find(|class| self.classes.contains(class))
    }

    pub fn is_mounted(&self, target: ViewTarget) -> bool {
        self.mounted.contains_key(&target)
    }
}

#[derive(Default)]
pub struct MemoryViewHost {
    state: Mutex<ViewSnapshot>,
    failing_mounts: Mutex<HashSet<ViewTarget>>,
}

impl MemoryViewHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().clone()
    }

    /// Drop the operation log, keeping the current state
    pub fn clear_ops(&self) {
        self.state.lock().ops.clear();
    }

    /// Make subsequent mounts into `target` fail
    pub fn fail_mounts(&self, target: ViewTarget) {
        self.failing_mounts.lock().insert(target);
    }
}

impl ViewHost for MemoryViewHost {
    fn mount(&self, target: ViewTarget, tree: ComponentTree) -> Result<()> {
        if self.failing_mounts.lock().contains(&target) {
            return Err(PreviewError::mount(
                target.element_id(),
                "target rejected the component tree",
            ));
        }
        let mut state = self.state.lock();
        state.mounted.insert(target, tree);
        state.ops.push(ViewOp::Mount(target));
        Ok(())
    }

    fn unmount(&self, target: ViewTarget) {
        let mut state = self.state.lock();
        state.mounted.remove(&target);
        state.ops.push(ViewOp::Unmount(target));
    }

    fn set_hidden(&self, target: ViewTarget, hidden: bool) {
        let mut state = self.state.lock();
        if hidden {
            state.hidden.insert(target);
            state.ops.push(ViewOp::Hide(target));
        } else {
            state.hidden.remove(&target);
            state.ops.push(ViewOp::Reveal(target));
        }
    }

    fn is_hidden(&self, target: ViewTarget) -> bool {
        self.state.lock().hidden.contains(&target)
    }

    fn set_text(&self, region: TextRegion, markup: &str) {
        let mut state = self.state.lock();
        state.text.insert(region, markup.to_string());
        state.ops.push(ViewOp::SetText(region));
    }

    fn text(&self, region: TextRegion) -> String {
        self.state
            .lock()
            .text
            .get(&region)
            .cloned()
            .unwrap_or_default()
    }

    fn set_state_class(&self, class: StateClass, enabled: bool) {
        let mut state = self.state.lock();
        if enabled {
            state.classes.insert(class);
        } else {
            state.classes.remove(&class);
        }
        state.ops.push(ViewOp::SetClass(class, enabled));
    }

    fn has_state_class(&self, class: StateClass) -> bool {
        self.state.lock().classes.contains(&class)
    }

    fn set_root_style(&self, style: &str) {
        let mut state = self.state.lock();
        state.root_style = Some(style.to_string());
        state.style_writes += 1;
        state.ops.push(ViewOp::SetRootStyle);
    }

    fn root_style(&self) -> Option<String> {
        self.state.lock().root_style.clone()
    }

    fn reset_scroll(&self) {
        let mut state = self.state.lock();
        state.scroll_resets += 1;
        state.ops.push(ViewOp::ResetScroll);
    }
}
