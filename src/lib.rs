//! Stoton notation to PCM audio
//!
//! Provides the full conversion path for the Stoton melody notation:
//! - Notation: tokenize and interpret a notation string into note events
//! - Synth: render note events into a mono 16-bit sample buffer
//! - Encode: pack the sample buffer into an audio container

pub mod encode;
pub mod notation;
pub mod synth;
