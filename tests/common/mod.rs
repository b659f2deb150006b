//! Shared test helpers: scripted client and recording surface.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use waychat::error::ChatError;
use waychat::format::RenderedMessage;
use waychat::provider::CompletionClient;
use waychat::surface::ChatSurface;
use waychat::types::Turn;

pub const SYSTEM_PROMPT: &str = "You are a test assistant.";

/// A client that returns queued outcomes and records every request.
///
/// With a gate, each call waits for a permit from [`ScriptedClient::release`]
/// before answering, which keeps the controller in its resolving state.
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<String, ChatError>>>,
    requests: Mutex<Vec<Vec<Turn>>>,
    gate: Option<Semaphore>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: ChatError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> Vec<Turn> {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn model_id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, history: &[Turn]) -> Result<String, ChatError> {
        self.requests.lock().unwrap().push(history.to_vec());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock reply".to_string()))
    }
}

/// A client whose task dies before answering.
pub struct PanickingClient;

#[async_trait]
impl CompletionClient for PanickingClient {
    fn model_id(&self) -> &str {
        "panicking"
    }

    async fn complete(&self, _history: &[Turn]) -> Result<String, ChatError> {
        panic!("completion task crashed");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Append(RenderedMessage),
    ShowPending,
    RemovePending,
}

/// Records every call and tracks how many placeholders are visible.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
    pub pending: i32,
    pub max_pending: i32,
}

impl RecordingSurface {
    pub fn appended(&self) -> Vec<&RenderedMessage> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Append(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl ChatSurface for RecordingSurface {
    fn append_to_display(&mut self, message: &RenderedMessage) {
        self.ops.push(SurfaceOp::Append(message.clone()));
    }

    fn show_pending(&mut self) {
        self.ops.push(SurfaceOp::ShowPending);
        self.pending += 1;
        self.max_pending = self.max_pending.max(self.pending);
    }

    fn remove_pending(&mut self) {
        self.ops.push(SurfaceOp::RemovePending);
        self.pending -= 1;
    }
}

/// Controller over a fresh transcript, a shared client and a recording surface.
pub fn controller_with<C: CompletionClient + 'static>(
    client: Arc<C>,
) -> waychat::controller::ConversationController<RecordingSurface> {
    waychat::controller::ConversationController::new(
        waychat::transcript::TranscriptStore::new(SYSTEM_PROMPT),
        client,
        RecordingSurface::default(),
    )
}

/// (role, content) pairs of a transcript, for compact assertions.
pub fn shape(turns: &[Turn]) -> Vec<(String, String)> {
    turns
        .iter()
        .map(|t| (t.role().to_string(), t.content().to_string()))
        .collect()
}
