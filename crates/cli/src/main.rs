use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Encode, decode and inspect 4-bit ADPCM streams
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress raw 16-bit little-endian PCM into an ADPCM stream
    Encode {
        /// Raw s16le PCM input
        input: PathBuf,

        /// Stream output
        output: PathBuf,

        /// Interleaved channels in the input
        #[arg(short, long, default_value_t = 1, env = "ADPCM_CHANNELS")]
        channels: u8,
    },

    /// Expand an ADPCM stream into raw 16-bit little-endian PCM
    Decode {
        /// Stream input
        input: PathBuf,

        /// Raw s16le PCM output
        output: PathBuf,

        /// Interleaved channels in the stream
        #[arg(short, long, default_value_t = 1, env = "ADPCM_CHANNELS")]
        channels: u8,
    },

    /// Print the stream header and check it against the payload
    Inspect {
        /// Stream input
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Encode {
            input,
            output,
            channels,
        } => {
            let summary = commands::encode_file(&input, &output, channels)?;
            println!("{}", summary);
        }
        Command::Decode {
            input,
            output,
            channels,
        } => {
            let summary = commands::decode_file(&input, &output, channels)?;
            println!("{}", summary);
        }
        Command::Inspect { input } => {
            let report = commands::inspect_file(&input)?;
            println!("{}", report);
        }
    }

    Ok(())
}
