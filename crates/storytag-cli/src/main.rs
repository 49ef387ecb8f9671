use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "storytag")]
#[command(about = "Extract tagged user stories and generate test stubs")]
struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file and print its user stories
    Scan {
        /// Source file to scan
        file: PathBuf,
        /// Print stories and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan a file and write a test stub for every user story
    Generate {
        /// Source file to scan
        file: PathBuf,
    },
    /// Run the configured test runner in the workspace
    Run,
    /// Write a default storytag.toml and runner config
    Init,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<u8> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    log::info!("Workspace root: {}", root.display());

    match cli.command {
        Commands::Scan { file, json } => commands::scan(&root, &file, json),
        Commands::Generate { file } => commands::generate(&root, &file).await,
        Commands::Run => commands::run(&root),
        Commands::Init => commands::init(&root),
    }
}
