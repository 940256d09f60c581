//! # vibemerge-relay
//!
//! Watches the Slack reaction channel for the merge emoji, looks up the PR
//! metadata on the reacted message, queues `gh` commands for Poppit and
//! asks TimeBomb to delete the message later.

pub mod app;
pub mod dispatcher;
pub mod signal;

pub use app::run;
pub use dispatcher::{DispatchError, LoopExit, ProcessOutcome, ReactionDispatcher};
pub use signal::shutdown_signal;
