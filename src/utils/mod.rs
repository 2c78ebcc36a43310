//! Utility Module
//!
//! - [`FrameTimer`]: delta-time source for a frame loop

pub mod time;

pub use time::FrameTimer;
