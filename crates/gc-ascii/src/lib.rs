//! Pixel-to-glyph conversion engine for glyphcast.
//!
//! Resample → tone-map → glyph-map → colorize, assembled row by row by the
//! [`Interpreter`](interpreter::Interpreter).

pub mod colorize;
pub mod glyph;
pub mod interpreter;
pub mod resample;
pub mod tone;

pub use interpreter::Interpreter;
