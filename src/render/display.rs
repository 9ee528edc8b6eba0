//! Visible-state switching and error reporting shared by the coordinator and story renders.
//!
//! A [`DisplayHandle`] is cloned into every detached story render at dispatch time, so a render
//! that finishes late reports through the handle it was given rather than through whatever the
//! coordinator is showing by then.

use log::error;
use std::sync::Arc;

use crate::channel::NotificationChannel;
use crate::render::markup::MarkupConverter;
use crate::render::protocol::{ExceptionReport, Notification};
use crate::view::{StateClass, TextRegion, ViewHost};

#[derive(Clone)]
pub struct DisplayHandle {
    view: Arc<dyn ViewHost>,
    channel: Option<Arc<dyn NotificationChannel>>,
    converter: Arc<dyn MarkupConverter>,
}

impl DisplayHandle {
    pub fn new(
        view: Arc<dyn ViewHost>,
        channel: Option<Arc<dyn NotificationChannel>>,
        converter: Arc<dyn MarkupConverter>,
    ) -> Self {
        Self {
            view,
            channel,
            converter,
        }
    }

    pub fn channel(&self) -> Option<&Arc<dyn NotificationChannel>> {
        self.channel.as_ref()
    }

    /// Publish on the channel; dropped when running headless
    pub fn emit(&self, notification: Notification) {
        if let Some(channel) = &self.channel {
            channel.emit(notification);
        }
    }

    fn show_only(&self, class: StateClass) {
        for other in StateClass::ALL {
            if other != class && self.view.has_state_class(other) {
                self.view.set_state_class(other, false);
            }
        }
        self.view.set_state_class(class, true);
    }

    pub fn show_main(&self) {
        self.show_only(StateClass::Main);
    }

    pub fn show_no_preview(&self) {
        self.show_only(StateClass::NoPreview);
    }

    /// Write message and stack into the error regions and make the error display visible.
    pub fn show_error_display(&self, message: &str, stack: &str) {
        self.view
            .set_text(TextRegion::ErrorMessage, &self.converter.to_markup(message));
        self.view
            .set_text(TextRegion::ErrorStack, &self.converter.to_markup(stack));
        self.show_only(StateClass::Error);
    }

    /// Deliberate, user-facing error reported by a collaborator.
    pub fn show_error(&self, title: &str, description: &str) {
        self.emit(Notification::StoryErrored {
            title: title.to_string(),
            description: description.to_string(),
        });
        self.show_error_display(title, description);
    }

    /// Uncaught failure of a render.
    pub fn show_exception(&self, report: ExceptionReport) {
        self.emit(Notification::StoryThrewException(report.clone()));
        self.show_error_display(&report.message, &report.stack);
        error!("story render threw: {}\n{}", report.message, report.stack);
    }
}
