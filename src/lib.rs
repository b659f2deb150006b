//! WayChat: chat client core
//!
//! Keeps an append-only transcript that opens with a fixed system turn,
//! sends it to a chat-completions service one request at a time, and renders
//! each new turn for a host display.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use waychat::prelude::*;
//!
//! struct Stdout;
//!
//! impl ChatSurface for Stdout {
//!     fn append_to_display(&mut self, message: &RenderedMessage) {
//!         println!("{}", message.to_plain_text());
//!     }
//!     fn show_pending(&mut self) {}
//!     fn remove_pending(&mut self) {}
//! }
//!
//! # async fn example() -> waychat::error::Result<()> {
//! let config = ChatConfig::load(None)?;
//! let client = Arc::new(config.build_client()?);
//! let transcript = TranscriptStore::new(config.system_prompt.clone());
//! let mut controller = ConversationController::new(transcript, client, Stdout);
//!
//! controller.submit("A 15s spot for my bakery");
//! controller.resolve().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod surface;
pub mod transcript;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
