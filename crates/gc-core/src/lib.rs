//! Shared types, configuration and traits for glyphcast.
//!
//! This crate holds the pixel and animation data model, the glyph ramps,
//! the render/playback configuration and the seams (sink, clock) used by
//! the rest of the workspace.

pub mod charset;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod pixel;
pub mod traits;

pub use charset::GlyphRamp;
pub use clock::{CancelToken, SystemClock};
pub use config::{AppConfig, PlaybackConfig, RenderConfig, RenderMode};
pub use error::CoreError;
pub use frame::{Animation, AnimationFrame};
pub use pixel::PixelBuffer;
pub use traits::{Clock, OutputSink};
