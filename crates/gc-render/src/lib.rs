//! Output and playback module for glyphcast.
//!
//! Provides the terminal sink, the real-time frame pacer and playback
//! statistics.

pub mod pacer;
pub mod sink;
pub mod stats;

pub use pacer::{FramePacer, PacerState, PlaybackState};
pub use sink::{MemorySink, SinkEvent, TerminalSink};
pub use stats::PlaybackStats;
