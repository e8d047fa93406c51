mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "advisor", version, about = "학사 상담 파이프라인 CLI")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config and sample data under ~/.advisor
    Onboard,
    /// Ask the advisor a question on behalf of a student
    Ask {
        /// Student id, e.g. 2021001
        #[arg(short, long)]
        student: String,
        /// The question text (Korean)
        question: String,
    },
    /// Show a student's saved conversation history
    History {
        #[arg(short, long)]
        student: String,
    },
    /// Show a student's graduation progress
    Progress {
        #[arg(short, long)]
        student: String,
    },
    /// Show the current semester context
    Semester,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Ask { student, question } => commands::ask::run(&student, &question).await?,
        Commands::History { student } => commands::history::run(&student).await?,
        Commands::Progress { student } => commands::progress::run(&student).await?,
        Commands::Semester => commands::semester::run()?,
    }

    Ok(())
}
