//! Core types for waychat.

pub mod generation;
pub mod message;

pub use generation::*;
pub use message::*;
