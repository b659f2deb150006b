//! Submission lifecycle: one request in flight at a time.
//!
//! ```text
//! Idle --submit(non-empty)--> Resolving --reply/failure--> Idle
//!          submit(blank)  -> Idle      (ignored)
//!          submit(any) while Resolving (rejected)
//! ```

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ChatError;
use crate::format::MessageFormatter;
use crate::provider::CompletionClient;
use crate::surface::{ChatEvent, ChatSurface};
use crate::transcript::TranscriptStore;
use crate::types::{Role, Turn};

/// Assistant text appended when a request fails for any reason.
pub const FAILURE_MESSAGE: &str = "Error: Could not reach the assistant service. Please try again.";

/// Result of a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request is now in flight.
    Accepted,
    /// The text was blank after trimming.
    Ignored,
    /// Another request is still in flight.
    Rejected,
}

type ReplyResult = Result<String, ChatError>;

/// The in-flight request. Its presence is the single-flight lock.
#[derive(Debug)]
struct PendingRequest {
    id: Uuid,
    started: Instant,
    reply: oneshot::Receiver<ReplyResult>,
}

#[derive(Debug)]
enum State {
    Idle,
    Resolving(PendingRequest),
}

/// Drives the transcript, the completion client and the surface together.
pub struct ConversationController<S> {
    transcript: TranscriptStore,
    client: Arc<dyn CompletionClient>,
    formatter: MessageFormatter,
    surface: S,
    state: State,
}

impl<S: ChatSurface> ConversationController<S> {
    pub fn new(transcript: TranscriptStore, client: Arc<dyn CompletionClient>, surface: S) -> Self {
        Self {
            transcript,
            client,
            formatter: MessageFormatter::new(),
            surface,
            state: State::Idle,
        }
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Start a request for `text` if the controller is idle.
    ///
    /// Appends the trimmed user turn, renders it, shows the pending
    /// placeholder and spawns the completion call on the current tokio
    /// runtime. Must be called from within a runtime.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if let State::Resolving(pending) = &self.state {
            debug!(request_id = %pending.id, "submit rejected: request in flight");
            return SubmitOutcome::Rejected;
        }

        let turn = self.transcript.append(Role::User, text);
        self.display(&turn);
        self.surface.show_pending();

        let snapshot = self.transcript.snapshot();
        let client = Arc::clone(&self.client);
        let (reply_tx, reply_rx) = oneshot::channel();
        let id = Uuid::new_v4();

        debug!(
            request_id = %id,
            model = client.model_id(),
            turns = snapshot.len(),
            "completion request start"
        );
        tokio::spawn(async move {
            let _ = reply_tx.send(client.complete(&snapshot).await);
        });

        self.state = State::Resolving(PendingRequest {
            id,
            started: Instant::now(),
            reply: reply_rx,
        });
        SubmitOutcome::Accepted
    }

    /// Wait for the in-flight request and append its outcome.
    ///
    /// Returns the appended assistant turn, or `None` when idle. Failures
    /// become the [`FAILURE_MESSAGE`] turn; they are never returned. Dropping
    /// this future before it completes leaves the request in flight.
    pub async fn resolve(&mut self) -> Option<Turn> {
        let State::Resolving(pending) = &mut self.state else {
            return None;
        };
        let result = (&mut pending.reply).await;
        Some(self.settle(result.unwrap_or_else(|_| Err(ChatError::Canceled))))
    }

    /// Process events until shutdown, resolving requests as they finish.
    ///
    /// Submits that arrive while a request is in flight are rejected. After
    /// `Shutdown` (or when every sender is dropped) the loop still waits for
    /// the in-flight request before returning.
    pub async fn run(&mut self, mut events: mpsc::Receiver<ChatEvent>) {
        let mut accepting = true;
        loop {
            match &mut self.state {
                State::Idle => {
                    if !accepting {
                        break;
                    }
                    match events.recv().await {
                        Some(ChatEvent::SubmitRequested(text)) => {
                            self.submit(&text);
                        }
                        Some(ChatEvent::Shutdown) | None => accepting = false,
                    }
                }
                State::Resolving(pending) => {
                    // Events queued before the reply landed are handled first.
                    tokio::select! {
                        biased;
                        event = events.recv(), if accepting => match event {
                            Some(ChatEvent::SubmitRequested(text)) => {
                                self.submit(&text);
                            }
                            Some(ChatEvent::Shutdown) | None => accepting = false,
                        },
                        result = &mut pending.reply => {
                            self.settle(result.unwrap_or_else(|_| Err(ChatError::Canceled)));
                        }
                    }
                }
            }
        }
        debug!(turns = self.transcript.len(), "conversation loop stopped");
    }

    fn settle(&mut self, result: ReplyResult) -> Turn {
        let finished = std::mem::replace(&mut self.state, State::Idle);
        self.surface.remove_pending();

        let (request_id, elapsed_ms) = match &finished {
            State::Resolving(pending) => (
                Some(pending.id),
                pending.started.elapsed().as_millis() as u64,
            ),
            State::Idle => (None, 0),
        };

        let content = match result {
            Ok(reply) => {
                debug!(?request_id, elapsed_ms, "completion request done");
                reply
            }
            Err(err) => {
                warn!(
                    ?request_id,
                    elapsed_ms,
                    kind = %err.kind(),
                    error = %err,
                    "completion request failed"
                );
                FAILURE_MESSAGE.to_string()
            }
        };

        let turn = self.transcript.append(Role::Assistant, content);
        self.display(&turn);
        turn
    }

    fn display(&mut self, turn: &Turn) {
        if let Some(message) = self.formatter.render(turn) {
            self.surface.append_to_display(&message);
        }
    }
}
