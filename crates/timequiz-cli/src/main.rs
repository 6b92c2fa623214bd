//! timequiz CLI — the user-facing command-line interface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use timequiz_core::config::ConfigOverrides;

mod commands;

#[derive(Parser)]
#[command(name = "timequiz", version, about = "Timed question-and-answer drill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed quiz session on the terminal
    Run {
        /// CSV question bank (question,answer per line)
        #[arg(long)]
        problems: Option<PathBuf>,

        /// Time limit for the whole session, in seconds
        #[arg(long)]
        limit: Option<u64>,

        /// Shuffle the questions (default)
        #[arg(long, overrides_with = "no_shuffle")]
        shuffle: bool,

        /// Keep the questions in file order
        #[arg(long, overrides_with = "shuffle")]
        no_shuffle: bool,

        /// Fixed shuffle seed for a reproducible order
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write a JSON session report into
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a CSV question bank
    Validate {
        /// Path to the question bank
        #[arg(long, default_value = "problems.csv")]
        problems: PathBuf,
    },

    /// Create a starter config and question bank
    Init,

    /// Serve path redirects over HTTP
    Serve {
        /// YAML, JSON or TOML path map layered over the built-in redirects
        #[arg(long)]
        paths: Option<PathBuf>,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never interleave with prompts on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("timequiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            problems,
            limit,
            shuffle,
            no_shuffle,
            seed,
            report_dir,
            format,
            config,
        } => {
            let shuffle = match (shuffle, no_shuffle) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let overrides = ConfigOverrides {
                problems,
                limit_secs: limit,
                shuffle,
                seed,
                report_dir,
            };
            commands::run::execute(overrides, config, format).await
        }
        Commands::Validate { problems } => commands::validate::execute(problems),
        Commands::Init => commands::init::execute(),
        Commands::Serve { paths, addr } => commands::serve::execute(paths, addr).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
