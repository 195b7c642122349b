//! Plot the opening of a synthesized waveform to SVG
//!
//! Renders a notation string and draws the first window of the sample
//! buffer, useful for eyeballing tone boundaries and octave jumps.

use std::error::Error;

use clap::Parser;
use plotters::prelude::*;

use stoton::notation::parse;
use stoton::synth::{synthesize, SAMPLE_RATE};

#[derive(Parser)]
#[command(name = "plot-wave", about = "Plot a synthesized Stoton waveform to SVG")]
struct Cli {
    /// Notation string to render (e.g. "ドレミ")
    notation: String,

    /// Output SVG path
    output: String,

    /// Window to plot, in milliseconds from the start
    #[arg(long, default_value_t = 50.0)]
    window_ms: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = SAMPLE_RATE)]
    sample_rate: u32,
}

fn create_plot(cli: &Cli, samples: &[i16]) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(&cli.output, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let window_samples =
        ((cli.window_ms / 1000.0 * f64::from(cli.sample_rate)) as usize).min(samples.len());
    let window = &samples[..window_samples];
    let max_time = window_samples as f64 / f64::from(cli.sample_rate) * 1000.0;

    let title = format!("{} ({} Hz)", cli.notation, cli.sample_rate);

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_time, -1.05f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc("Time (ms)")
        .y_desc("Amplitude")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    chart.draw_series(LineSeries::new(
        window.iter().enumerate().map(|(i, &s)| {
            let t = i as f64 / f64::from(cli.sample_rate) * 1000.0;
            (t, f64::from(s) / 32767.0)
        }),
        BLUE.stroke_width(1),
    ))?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let score = parse(&cli.notation)?;
    for warning in &score.warnings {
        eprintln!("warning: {warning}");
    }
    if score.is_empty() {
        return Err("notation contains no playable notes".into());
    }

    print!("  Generating waveform... ");
    let samples = synthesize(&score.notes, cli.sample_rate);
    println!("done ({} samples)", samples.len());

    print!("  Creating plot... ");
    create_plot(&cli, &samples)?;
    println!("done");

    println!();
    println!("Output: {}", cli.output);

    Ok(())
}
