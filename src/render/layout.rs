//! Layout presets and memoised application of their root styles.

use log::debug;

use crate::view::ViewHost;

/// Named presentation preset for the root container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    Centered,
    Fullscreen,
    #[default]
    Padded,
}

impl Layout {
    /// Resolve a declared layout name; unknown or absent names fall back to `padded`.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some("centered") => Layout::Centered,
            Some("fullscreen") => Layout::Fullscreen,
            _ => Layout::Padded,
        }
    }

    /// Root style payload for this preset.
    pub fn style(self) -> &'static str {
        match self {
            Layout::Centered => {
                "margin: 0; display: flex; justify-content: center; align-items: center; min-height: 100vh"
            }
            Layout::Fullscreen => "margin: 0",
            Layout::Padded => "margin: 1rem",
        }
    }
}

/// Remembers the last style written to the view host and skips identical writes.
#[derive(Debug, Default)]
pub struct StyleMemo {
    previous: Option<String>,
}

impl StyleMemo {
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Apply the style for `name`. Returns true when the view host was written to.
    ///
    /// Comparison is on the resolved style text, not on the layout name.
    pub fn apply(&mut self, name: Option<&str>, view: &dyn ViewHost) -> bool {
        let style = Layout::resolve(name).style();
        if self.previous.as_deref() == Some(style) {
            return false;
        }
        debug!("applying root style for layout {:?}", name.unwrap_or("padded"));
        view.set_root_style(style);
        self.previous = Some(style.to_string());
        true
    }

    pub fn current(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}
