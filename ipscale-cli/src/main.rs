//! ipscale CLI - a musical scale from your IP address
//!
//! Looks up the public IP, maps its decimal digits onto a chromatic scale and
//! generates random note sequences from the result.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod constants;
mod lookup;
mod output;

use commands::{completions, degrees, scale, sequence, LookupSettings};
use config::IpscaleConfig;
use output::{OutputConfig, OutputFormat};

/// Derive a musical scale from your IP address.
///
/// Every digit of the address selects a degree of the chromatic scale
/// starting at C. Duplicates collapse and the result is ordered by pitch.
#[derive(Parser)]
#[command(name = "ipscale")]
#[command(author, version)]
#[command(about = "Derive a musical scale from your IP address")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  ipscale scale                 Scale for your public IP
  ipscale scale 192.168.0.1     Scale for a given address
  ipscale sequence --seed 7     Reproducible random sequence
  ipscale degrees               Show the scale degree table")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,

    /// Disable colored output (overrides config)
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (default: ./.ipscalerc.toml, then the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Public IP endpoint returning {"ip": "..."} (overrides config)
    #[arg(long, global = true, env = "IPSCALE_ENDPOINT", value_name = "URL")]
    endpoint: Option<String>,

    /// Lookup timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the scale for an address (looks up the public IP if omitted)
    #[command(visible_alias = "s")]
    Scale {
        /// Dotted-decimal address, e.g. 192.168.0.1
        address: Option<String>,
    },

    /// Generate a random note sequence from the derived scale
    #[command(visible_alias = "seq")]
    Sequence {
        /// Dotted-decimal address (looks up the public IP if omitted)
        address: Option<String>,

        /// Number of steps (default: one per scale note)
        #[arg(short = 'n', long)]
        length: Option<usize>,

        /// Seed for reproducible sequences
        #[arg(long)]
        seed: Option<u64>,

        /// Lowest octave (default: 4)
        #[arg(long)]
        base_octave: Option<u8>,

        /// Number of octaves to pick from (default: 3)
        #[arg(long)]
        octave_span: Option<u8>,
    },

    /// Print the public IP address
    Lookup,

    /// Show the scale degree table and which degrees addresses can reach
    Degrees,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = IpscaleConfig::load(cli.config.as_deref(), std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| match config.default_format() {
        Some(f) => f.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config output.format: {}", e);
            OutputFormat::Table
        }),
        None => OutputFormat::Table,
    });

    let mut output = OutputConfig::auto_detect(format, config.use_color());
    if cli.compact {
        output = output.compact();
    }
    if cli.no_color {
        output = output.without_colors();
    }
    colored::control::set_override(output.use_colors());

    let lookup = LookupSettings {
        endpoint: cli
            .endpoint
            .clone()
            .unwrap_or_else(|| config.lookup_endpoint().to_string()),
        timeout: cli
            .timeout
            .map(std::time::Duration::from_secs)
            .unwrap_or_else(|| config.lookup_timeout()),
        show_progress: !cli.quiet && format == OutputFormat::Table,
    };

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Scale { address } => scale::run(address, &lookup, &output).await,
        Commands::Sequence {
            address,
            length,
            seed,
            base_octave,
            octave_span,
        } => {
            let args = sequence::SequenceArgs {
                address,
                length,
                seed,
                base_octave,
                octave_span,
            };
            sequence::run(args, config.sequence_options(), &lookup, &output).await
        }
        Commands::Lookup => commands::lookup::run(&lookup, &output).await,
        Commands::Degrees => degrees::run(&output),
        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::run_instructions(shell, &output)
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions(shell, &mut cmd);
                Ok(())
            }
        }
    }
}
