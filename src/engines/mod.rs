//! Speech synthesis engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! - `placeholder` - synthetic harmonic stand-in audio, no model weights required

pub mod placeholder;
