//! HTTP Handlers

mod audio;
mod health;
mod media;
mod script;
mod subtitles;

pub use audio::*;
pub use health::*;
pub use media::*;
pub use script::*;
pub use subtitles::*;
