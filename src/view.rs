//! View host abstraction.
//!
//! The coordinator never touches a concrete UI layer. It drives a [`ViewHost`], which owns the
//! named regions of the preview surface: two mount targets, two error text regions, three
//! mutually exclusive state classes on the root, the root style and the scroll offset.

pub mod memory;

pub use memory::{MemoryViewHost, ViewOp, ViewSnapshot};

use crate::error::Result;
use crate::render::docs::DocsComposition;
use std::fmt;

/// Mount target regions of the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTarget {
    /// Story canvas
    Story,
    /// Documentation page
    Docs,
}

impl ViewTarget {
    pub fn element_id(self) -> &'static str {
        match self {
            ViewTarget::Story => "root",
            ViewTarget::Docs => "docs-root",
        }
    }
}

impl fmt::Display for ViewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Text regions of the error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRegion {
    ErrorMessage,
    ErrorStack,
}

/// State classes on the root. At most one is set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    Main,
    NoPreview,
    Error,
}

impl StateClass {
    pub const ALL: [StateClass; 3] = [StateClass::Main, StateClass::NoPreview, StateClass::Error];

    pub fn class_name(self) -> &'static str {
        match self {
            StateClass::Main => "sb-show-main",
            StateClass::NoPreview => "sb-show-nopreview",
            StateClass::Error => "sb-show-errordisplay",
        }
    }
}

/// Content mounted into a target.
#[derive(Debug, Clone)]
pub enum ComponentTree {
    /// Markup produced by a story's decorated story function
    Story { id: String, markup: String },
    /// A documentation container wrapping a documentation page
    Docs(DocsComposition),
}

/// Core trait for the view layer the coordinator drives.
///
/// All methods take `&self`; implementations use interior mutability so the host can be shared
/// between the coordinator and detached story renders.
pub trait ViewHost: Send + Sync {
    /// Mount a component tree into `target`, replacing whatever was there
    fn mount(&self, target: ViewTarget, tree: ComponentTree) -> Result<()>;

    /// Unmount whatever is mounted in `target`; a no-op for an empty target
    fn unmount(&self, target: ViewTarget);

    /// Set or clear the hidden attribute on a target
    fn set_hidden(&self, target: ViewTarget, hidden: bool);

    fn is_hidden(&self, target: ViewTarget) -> bool;

    /// Replace the markup of an error text region
    fn set_text(&self, region: TextRegion, markup: &str);

    fn text(&self, region: TextRegion) -> String;

    fn set_state_class(&self, class: StateClass, enabled: bool);

    fn has_state_class(&self, class: StateClass) -> bool;

    fn set_root_style(&self, style: &str);

    fn root_style(&self) -> Option<String>;

    /// Scroll the surface back to the top-left origin
    fn reset_scroll(&self);
}
