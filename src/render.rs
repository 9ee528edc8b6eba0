//! Rendering subsystem.
//!
//! The coordinator lives in [`service`]; the remaining modules are the pieces it composes:
//! metadata diffing, layout styles, the shared display handle, docs composition and markup
//! conversion for the error display.

pub mod context;
pub mod display;
pub mod docs;
pub mod layout;
pub mod markup;
pub mod metadata;
pub mod protocol;
pub mod service;

pub use context::{RenderContext, RenderReporter};
pub use metadata::{RenderMetadata, Transition, ViewMode};
pub use protocol::{ExceptionReport, Notification, Signal};
pub use service::{Collaborators, RenderCoordinator, StoryRenderer};
