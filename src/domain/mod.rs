//! Domain layer
//!
//! Pure value objects and arithmetic, no I/O:
//! - script: generated narration scripts and their segments
//! - timing: audio segment placement (prefix-sum timeline)
//! - subtitle: cue chunking and WebVTT rendering
//! - media: stock media search results

pub mod media;
pub mod script;
pub mod subtitle;
pub mod timing;
