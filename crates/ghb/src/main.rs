//! ghb - interactive GitHub project bootstrap.
//!
//! Initializes or clones a git repository, generates a `.gitignore`, and
//! creates/pushes to a private remote via the GitHub API.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ghb_cmd::factory::Factory;

mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const CANCEL: i32 = 2;
    pub const CONFIG: i32 = 4;
}

/// Bootstrap GitHub projects from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "ghb",
    version,
    about = "Interactive GitHub project bootstrap",
    long_about = "Initialize the current directory as a new private GitHub \
                  repository, or clone an existing one over it."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Set up the current directory as a new GitHub project.
    Setup(ghb_cmd::setup::SetupArgs),
    /// Clone an existing repository into the current directory.
    Clone(ghb_cmd::clone::CloneArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GHB_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let factory = Factory::new();

    // Running without a subcommand starts the setup flow.
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Setup(ghb_cmd::setup::SetupArgs::default()));

    let exit_code = match run_command(command, &factory).await {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            if e.downcast_ref::<ghb_core::cmdutil::SilentError>().is_some() {
                exit_codes::ERROR
            } else if ghb_core::cmdutil::is_user_cancellation(&e) {
                eprintln!("cancelled");
                exit_codes::CANCEL
            } else if ghb_core::cmdutil::is_configuration_error(&e) {
                eprintln!("configuration error: {e:#}");
                exit_codes::CONFIG
            } else {
                tracing::error!("{e:#}");
                eprintln!("error: {e:#}");
                exit_codes::ERROR
            }
        }
    };

    std::process::exit(exit_code);
}

async fn run_command(cmd: Commands, factory: &Factory) -> anyhow::Result<()> {
    match cmd {
        Commands::Setup(args) => args.run(factory).await,
        Commands::Clone(args) => args.run(factory).await,
    }
}
