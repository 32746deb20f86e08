//! Terminal frontend for the Wildcall narrative engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wild",
    about = "Wildcall - an interactive retelling of The Call of the Wild",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story interactively
    Play {
        /// Story file (JSON) to play instead of the built-in story
        #[arg(long)]
        story: Option<PathBuf>,

        /// RNG seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file used by the 'save' and 'load' commands
        #[arg(long, default_value = "wild-save.json")]
        save: PathBuf,

        /// Skip pacing delays
        #[arg(short, long)]
        fast: bool,

        /// Name of the protagonist
        #[arg(long)]
        hero: Option<String>,
    },

    /// Validate a story file
    Check {
        /// Story file (JSON); the built-in story if omitted
        #[arg(long)]
        story: Option<PathBuf>,
    },

    /// List the scenes of a story
    Scenes {
        /// Only show this chapter
        #[arg(short, long)]
        chapter: Option<u32>,

        /// Story file (JSON); the built-in story if omitted
        #[arg(long)]
        story: Option<PathBuf>,
    },

    /// Export the built-in story as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            seed,
            save,
            fast,
            hero,
        } => commands::play::run(story.as_deref(), seed, &save, fast, hero.as_deref()),
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Scenes { chapter, story } => commands::scenes::run(story.as_deref(), chapter),
        Commands::Export { output } => commands::export::run(output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
