//! avimosh CLI — glitch AVI files by reordering, repeating, or dropping chunks.
//!
//! Usage:
//!   avimosh mosh -i <FILE> [OPTIONS]       Write a glitched copy beside the input
//!   avimosh inspect -i <FILE> [OPTIONS]    Show the frame index without writing
//!   avimosh modes                          List effect modes
//!   avimosh init [--force]                 Write a default config file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use avimosh_common::config::{AppConfig, MoshConfig, MoshDefaults};

mod commands;

#[derive(Parser)]
#[command(
    name = "avimosh",
    about = "Audio Video Interleave breaker: datamosh AVI files by shuffling their chunks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Glitch a file and write the result beside it
    Mosh {
        #[command(flatten)]
        input: InputArgs,

        /// Effect mode: void, random, reverse, invert, bloom, pulse, jiggle, overlap
        #[arg(short, long)]
        mode: Option<String>,

        /// Repeat count / pulse period / window size, depending on mode
        #[arg(short, long)]
        count: Option<usize>,

        /// Frame index / repeat amount / stride / jitter, depending on mode
        #[arg(short = 'n', long)]
        position: Option<usize>,

        /// Seed for random and jiggle modes
        #[arg(long)]
        seed: Option<u64>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the frame index of a file without writing anything
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List effect modes and how they read count and position
    Modes,

    /// Write a default config file to the user config directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by every command that reads an input file.
#[derive(Args)]
struct InputArgs {
    /// Input AVI file
    #[arg(short, long)]
    input: PathBuf,

    /// Also index audio chunks
    #[arg(short = 'a', long, num_args = 0..=1, default_missing_value = "true")]
    preserve_audio: Option<bool>,

    /// Pin the first video frame while cleaning
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    keep_first_frame: Option<bool>,

    /// Drop frames larger than this fraction of the biggest frame (0, 1]
    #[arg(short = 'k', long)]
    kill_ratio: Option<f64>,
}

impl InputArgs {
    fn into_config(self, defaults: &MoshDefaults) -> MoshConfig {
        let mut config = MoshConfig::with_defaults(self.input, defaults);
        if let Some(audio) = self.preserve_audio {
            config.preserve_audio = audio;
        }
        if let Some(keep) = self.keep_first_frame {
            config.keep_first_frame = keep;
        }
        if let Some(kill) = self.kill_ratio {
            config.kill_ratio = kill;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let app = AppConfig::load();

    // Initialize logging
    let mut logging = app.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    avimosh_common::logging::init_logging(&logging);
    tracing::debug!(
        config = %avimosh_common::config::config_file_path().display(),
        "user defaults"
    );

    match cli.command {
        Commands::Mosh {
            input,
            mode,
            count,
            position,
            seed,
            json,
        } => {
            let mut config = input.into_config(&app.defaults);
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if let Some(count) = count {
                config.count = count;
            }
            if let Some(position) = position {
                config.position = position;
            }
            config.seed = seed;
            commands::mosh::run(config, json)
        }
        Commands::Inspect { input, json } => {
            commands::inspect::run(input.into_config(&app.defaults), json)
        }
        Commands::Modes => commands::modes::run(),
        Commands::Init { force } => commands::init::run(force),
    }
}
