use clap::{Parser, Subcommand};
use flames_core::AssetSource;
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "flames", version, about = "Flames Test in the terminal")]
pub struct Cli {
    /// Asset root: a directory or an http(s) URL containing assets/data/*.json
    #[arg(long, global = true, env = "FLAMES_ASSETS", default_value = ".")]
    assets: String,
    /// Seed for reproducible question sampling
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quiz interactively
    Play(commands::play::PlayArgs),
    /// Load and validate the data documents
    Check {
        /// Fail on the first question-bank problem
        #[arg(long)]
        strict: bool,
    },
    /// Build one quiz session and print it
    Draw,
    /// Inspect the quiz configuration document
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FLAMES_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result: Result<(), Box<dyn std::error::Error>> = match cli.assets.parse::<AssetSource>() {
        Err(e) => Err(e.into()),
        Ok(source) => match cli.command {
            Commands::Play(args) => commands::play::run(args, source, cli.seed).await,
            Commands::Check { strict } => commands::check::run(source, strict, cli.json).await,
            Commands::Draw => commands::draw::run(source, cli.seed).await,
            Commands::Config { action } => commands::config::run(action, source).await,
            Commands::Completions { shell } => commands::completions::run(shell),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
