//! CLI tool for converting Stoton notation to an audio file
//!
//! Reads a notation file, renders the melody as 16-bit mono PCM, and
//! writes it out in a WAV container.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use stoton::encode::{write_audio, PcmEncoder, WavEncoder};
use stoton::notation::parse;
use stoton::synth::{synthesize, SAMPLE_RATE, UNIT_SECONDS};

#[derive(Parser)]
#[command(name = "stoton", about = "Convert Stoton notation to an audio file")]
struct Cli {
    /// Path to the notation file
    input: PathBuf,

    /// Output audio file path (defaults to the input path with the
    /// container extension)
    output: Option<PathBuf>,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = SAMPLE_RATE)]
    sample_rate: u32,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let encoder = WavEncoder;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(encoder.extension()));

    let notation = fs::read_to_string(&cli.input)
        .map_err(|e| format!("failed to read {}: {e}", cli.input.display()))?;

    let score = parse(&notation)?;

    for warning in &score.warnings {
        eprintln!("warning: {warning}");
    }

    if score.is_empty() {
        return Err("notation contains no playable notes".into());
    }

    println!("Parsed {} notes", score.notes.len());
    println!("Configuration:");
    println!("  Sample rate: {} Hz", cli.sample_rate);
    println!(
        "  Duration: {:.1} s",
        score.duration_units() as f64 * UNIT_SECONDS
    );
    println!();

    println!("Generating audio...");
    let samples = synthesize(&score.notes, cli.sample_rate);

    write_audio(&output_path, &encoder, &samples, cli.sample_rate)?;
    println!("✓ Generated {}", output_path.display());

    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
