//! Audio container encoding for the rendered sample buffer
//!
//! The synthesizer hands over a mono 16-bit PCM buffer; everything
//! container-specific lives behind [`PcmEncoder`]. The crate ships a
//! WAV implementation; swapping in a lossy codec only means another
//! impl of the trait.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

/// Encoding errors
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode samples: {0}")]
    Encode(#[from] hound::Error),
    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// A codec that packs mono 16-bit PCM into an audio container
pub trait PcmEncoder {
    /// File extension for the container this encoder produces
    fn extension(&self) -> &'static str;

    /// Encode the sample buffer into a complete container byte stream
    fn encode(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError>;
}

/// 16-bit mono PCM WAV encoder
pub struct WavEncoder;

impl PcmEncoder for WavEncoder {
    fn extension(&self) -> &'static str {
        "wav"
    }

    fn encode(&self, samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        Ok(cursor.into_inner())
    }
}

/// Encode a sample buffer and write it to a file
pub fn write_audio(
    path: &Path,
    encoder: &dyn PcmEncoder,
    samples: &[i16],
    sample_rate: u32,
) -> Result<(), EncodeError> {
    let bytes = encoder.encode(samples, sample_rate)?;
    fs::write(path, bytes)?;
    Ok(())
}
