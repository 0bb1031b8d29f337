//! Platform abstraction layer
//!
//! Browser-independent pieces of the host loop:
//! - Input events mapped to simulation commands
//! - Display-refresh time turned into fixed simulation ticks

pub mod input;
pub mod time;

pub use input::{Command, InputQueue, command_for_key};
pub use time::FrameClock;
