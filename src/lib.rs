//! # storyview - Render-Decision Engine for Story Previews
//!
//! Decides when an interactive preview surface re-renders, what it tears down first and which
//! view becomes visible: the story canvas, the documentation page, the error display or the
//! "no preview" placeholder.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - TOML configuration for the preview surface
//! - [`store`] - Content store abstraction and an in-memory store
//! - [`channel`] - Notification channel abstraction and an in-process channel
//! - [`view`] - View host abstraction and a recording view host
//! - [`render`] - The render coordinator and its building blocks
//! - [`replay`] - Scripted preview sessions driven through the coordinator

pub mod config;
pub mod error;

pub mod channel;
pub mod store;
pub mod view;

pub mod render;
pub mod replay;

pub use error::{PreviewError, Result};

pub use channel::{LocalChannel, NotificationChannel};
pub use config::PreviewConfig;
pub use render::{
    Collaborators, Notification, RenderContext, RenderCoordinator, RenderMetadata, Signal,
    StoryRenderer, ViewMode,
};
pub use store::{ContentStore, MemoryStore};
pub use view::{MemoryViewHost, ViewHost};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
