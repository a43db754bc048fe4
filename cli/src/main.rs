//! wavkit CLI - waveform, spectrum, band-pass filter and limiter tools for
//! 16-bit PCM WAV files.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wavkit")]
#[command(author, version, about = "16-bit PCM WAV audio tools", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the waveform of a WAV file
    Waveform(commands::waveform::WaveformArgs),

    /// Single-sided magnitude spectrum of a WAV file
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Apply a Butterworth band-pass filter
    Filter(commands::filter::FilterArgs),

    /// Clamp amplitude to a percentage of full scale
    Limit(commands::limit::LimitArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Waveform(args) => commands::waveform::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Filter(args) => commands::filter::run(args),
        Commands::Limit(args) => commands::limit::run(args),
    }
}
