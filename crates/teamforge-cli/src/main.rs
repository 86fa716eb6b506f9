//! teamforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "teamforge", version, about = "Skill-aware student team formation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a roster into teams
    Form {
        /// Path to a .toml or .json roster
        #[arg(long)]
        roster: PathBuf,

        /// Candidates scored per greedy pick (overrides config)
        #[arg(long)]
        window: Option<usize>,

        /// Directory to save the JSON formation report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Suggest teammates for one student
    Match {
        /// Path to a .toml or .json roster
        #[arg(long)]
        roster: PathBuf,

        /// Id of the student to find teammates for
        #[arg(long)]
        student: String,

        /// Team size including the student (overrides config)
        #[arg(long)]
        max_size: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score the compatibility of a group of students
    Score {
        /// Path to a .toml or .json roster
        #[arg(long)]
        roster: PathBuf,

        /// Comma-separated student ids
        #[arg(long)]
        members: String,
    },

    /// Validate roster files
    Validate {
        /// Path to a roster file or directory
        #[arg(long)]
        roster: PathBuf,
    },

    /// Create starter config and example roster
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("teamforge=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Form {
            roster,
            window,
            output,
            format,
            config,
        } => commands::form::execute(roster, window, output, format, config),
        Commands::Match {
            roster,
            student,
            max_size,
            config,
        } => commands::suggest::execute(roster, student, max_size, config),
        Commands::Score { roster, members } => commands::score::execute(roster, members),
        Commands::Validate { roster } => commands::validate::execute(roster),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
