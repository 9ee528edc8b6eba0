//! Error types and handling infrastructure for storyview.
//!
//! Collaborator seams that can fail (view hosts, configuration, replay scripts) share a single
//! `thiserror` enum. The render coordinator itself never returns these to its caller: every
//! failure it observes ends in a display update or a notification.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for storyview operations.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// File system related errors (config or script could not be read)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Config or script file not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A view host could not mount content into a target region
    #[error("Mount into {target} failed: {message}")]
    MountError { target: String, message: String },

    /// Configuration could not be parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Replay script is malformed or refers to unknown stories
    #[error("Script error: {message}")]
    ScriptError { message: String },

    /// Unknown signal name received on the channel
    #[error("Unknown signal: {name}")]
    UnknownSignal { name: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for storyview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

impl PreviewError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a MountError for the named target
    pub fn mount(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MountError {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a ScriptError with a descriptive message
    pub fn script(message: impl Into<String>) -> Self {
        Self::ScriptError {
            message: message.into(),
        }
    }

    /// Create an UnknownSignal error
    pub fn unknown_signal(name: impl Into<String>) -> Self {
        Self::UnknownSignal { name: name.into() }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for PreviewError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: err.to_string(),
        }
    }
}
