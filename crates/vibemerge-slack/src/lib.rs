//! # vibemerge-slack
//!
//! Minimal Slack Web API client. The relay only needs
//! `conversations.history` to read the metadata attached to the message a
//! reaction points at.

pub mod client;
pub mod error;
pub mod history;

pub use client::{SlackClient, DEFAULT_TIMEOUT};
pub use error::{SlackError, SlackResult};
pub use history::{HistoryMessage, HistoryParams, HistoryResponse, MessageMetadata};
