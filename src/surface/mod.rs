//! Interface to the host display.

use crate::format::RenderedMessage;

/// Events the host sends to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The user asked to send this text (untrimmed, as typed).
    SubmitRequested(String),
    /// Stop accepting input. An in-flight request still runs to completion.
    Shutdown,
}

/// Render sink provided by the host.
///
/// The pending placeholder is not a message: it is shown while a reply is
/// awaited and removed before the reply (or failure notice) is appended.
pub trait ChatSurface {
    fn append_to_display(&mut self, message: &RenderedMessage);

    fn show_pending(&mut self);

    fn remove_pending(&mut self);
}
