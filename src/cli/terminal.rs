//! Line-oriented terminal surface.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossterm::cursor::MoveToPreviousLine;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, style::Print};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::format::RenderedMessage;
use crate::surface::{ChatEvent, ChatSurface};
use crate::types::Role;

pub const PENDING_TEXT: &str = "Thinking...";
pub const QUIT_COMMAND: &str = "/quit";

/// Number of input lines the terminal has echoed, shared with [`forward_stdin`].
#[derive(Debug, Clone, Default)]
pub struct EchoCounter(Arc<AtomicUsize>);

impl EchoCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Prints rendered messages to a writer, one labeled message per paragraph group.
pub struct TerminalSurface<W: Write> {
    out: W,
    /// Replace the line the user just typed with the labeled message.
    replace_echo: bool,
    echoes: EchoCounter,
    /// Echo count when the placeholder was printed.
    pending_since: Option<usize>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, replace_echo: bool, echoes: EchoCounter) -> Self {
        Self {
            out,
            replace_echo,
            echoes,
            pending_since: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_previous_line(&mut self) -> std::io::Result<()> {
        queue!(self.out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))
    }

    fn write_message(&mut self, message: &RenderedMessage) -> std::io::Result<()> {
        let label = match message.role() {
            Role::User => "you".bold().green(),
            Role::Assistant => "waychat".bold().cyan(),
            Role::System => return Ok(()),
        };
        if message.role() == Role::User && self.replace_echo {
            self.clear_previous_line()?;
        }
        queue!(
            self.out,
            Print(label),
            Print(": "),
            Print(message.to_plain_text()),
            Print("\n")
        )?;
        if message.role() == Role::Assistant {
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }
}

impl<W: Write> ChatSurface for TerminalSurface<W> {
    fn append_to_display(&mut self, message: &RenderedMessage) {
        if let Err(err) = self.write_message(message) {
            tracing::warn!(error = %err, "terminal write failed");
        }
    }

    fn show_pending(&mut self) {
        self.pending_since = Some(self.echoes.get());
        let _ = queue!(self.out, Print(PENDING_TEXT.dim()), Print("\n"));
        let _ = self.out.flush();
    }

    /// Erase the placeholder and any input echoed below it while waiting.
    fn remove_pending(&mut self) {
        let Some(since) = self.pending_since.take() else {
            return;
        };
        let echoed = if self.replace_echo {
            self.echoes.get().saturating_sub(since)
        } else {
            0
        };
        let up = u16::try_from(echoed + 1).unwrap_or(u16::MAX);
        let _ = queue!(
            self.out,
            MoveToPreviousLine(up),
            Clear(ClearType::FromCursorDown)
        );
        let _ = self.out.flush();
    }
}

/// Forward stdin lines as submit events until EOF or `/quit`.
///
/// Every line read is recorded in `echoes` before its event is sent.
pub async fn forward_stdin(events: mpsc::Sender<ChatEvent>, echoes: EchoCounter) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = lines.next_line().await;
        if matches!(line, Ok(Some(_))) {
            echoes.record();
        }
        let event = match line {
            Ok(Some(line)) if line.trim() == QUIT_COMMAND => ChatEvent::Shutdown,
            Ok(Some(line)) => ChatEvent::SubmitRequested(line),
            Ok(None) => ChatEvent::Shutdown,
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed");
                ChatEvent::Shutdown
            }
        };
        let done = event == ChatEvent::Shutdown;
        if events.send(event).await.is_err() || done {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MessageFormatter;
    use crate::types::Turn;

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn assistant_sections_print_as_paragraphs() {
        let mut surface = TerminalSurface::new(Vec::new(), false, EchoCounter::new());
        let message = MessageFormatter::new()
            .render(&Turn::assistant("Script: hello\nTone: fun"))
            .unwrap();

        surface.append_to_display(&message);

        let text = output(surface);
        assert!(text.contains("waychat"));
        assert!(text.contains("Script: hello\n\nTone: fun\n"));
    }

    #[test]
    fn pending_line_is_cleared_once() {
        let mut surface = TerminalSurface::new(Vec::new(), false, EchoCounter::new());
        surface.show_pending();
        surface.remove_pending();
        let after_first = surface.out.len();
        surface.remove_pending();

        assert_eq!(surface.out.len(), after_first);
        let text = output(surface);
        assert!(text.contains(PENDING_TEXT));
        assert!(text.ends_with("\u{1b}[1F\u{1b}[J"));
    }

    #[test]
    fn input_echoed_while_waiting_is_erased_with_the_placeholder() {
        let echoes = EchoCounter::new();
        let mut surface = TerminalSurface::new(Vec::new(), true, echoes.clone());
        let formatter = MessageFormatter::new();

        echoes.record();
        surface.append_to_display(&formatter.render(&Turn::user("Hi")).unwrap());
        surface.show_pending();
        // Two lines typed and echoed by the terminal before the reply lands.
        echoes.record();
        echoes.record();
        surface.remove_pending();
        surface.append_to_display(&formatter.render(&Turn::assistant("Hello!")).unwrap());

        let text = output(surface);
        let (before, after) = text.split_once(PENDING_TEXT).unwrap();
        assert!(before.contains("Hi"));
        assert!(after.contains("\u{1b}[3F\u{1b}[J"));
        assert!(after.ends_with("Hello!\n\n"));
    }

    #[test]
    fn user_echo_is_left_alone_when_not_interactive() {
        let mut surface = TerminalSurface::new(Vec::new(), false, EchoCounter::new());
        let message = MessageFormatter::new().render(&Turn::user("hi <there>")).unwrap();
        surface.append_to_display(&message);

        let text = output(surface);
        assert!(text.contains("hi <there>"));
        assert!(!text.contains("\u{1b}[1F"));
    }
}
