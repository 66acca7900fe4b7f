//! Write side of the tactical layer.
//!
//! Commands are fire-and-forget intents. The simulation re-validates and
//! applies them; nothing in this crate assumes a command succeeded.
mod command;

pub use command::{Command, CommandBuffer, CommandSink};
