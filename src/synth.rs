//! Sine-wave synthesizer for parsed note events
//!
//! Renders each event as a pure tone and concatenates the tones
//! back-to-back into one mono 16-bit buffer. There is no cross-fade or
//! click suppression at event boundaries; the raw amplitude
//! discontinuities are part of the sound.

use std::f64::consts::PI;

use crate::notation::NoteEvent;

/// Default output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44100;

/// Wall-clock length of one duration unit in seconds
pub const UNIT_SECONDS: f64 = 1.0;

/// Peak amplitude; sin stays within [-1, 1] so samples never clip
const AMPLITUDE: f64 = 32767.0;

/// Number of samples in one duration unit at the given sample rate
pub fn samples_per_unit(sample_rate: u32) -> usize {
    (f64::from(sample_rate) * UNIT_SECONDS).round() as usize
}

/// Render note events into a mono 16-bit sample buffer
///
/// The buffer is sized up front from the summed event durations and
/// written with a running offset, one sub-buffer per event in event
/// order. Every event contributes exactly
/// `duration_units * samples_per_unit(sample_rate)` samples; an empty
/// event list yields an empty buffer.
pub fn synthesize(events: &[NoteEvent], sample_rate: u32) -> Vec<i16> {
    let unit = samples_per_unit(sample_rate);
    let total: usize = events
        .iter()
        .map(|event| event.duration_units as usize * unit)
        .sum();

    let mut buffer = vec![0i16; total];
    let mut offset = 0;

    for event in events {
        let len = event.duration_units as usize * unit;
        write_tone(&mut buffer[offset..offset + len], event.frequency(), sample_rate);
        offset += len;
    }

    buffer
}

/// Fill a buffer with a sine tone at the given frequency
///
/// Frequency 0 (a rest) leaves the buffer silent.
fn write_tone(buffer: &mut [i16], frequency: f64, sample_rate: u32) {
    if frequency == 0.0 {
        return;
    }

    let step = 2.0 * PI * frequency / f64::from(sample_rate);
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample = ((step * i as f64).sin() * AMPLITUDE).round() as i16;
    }
}
