use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use quotebot::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for quotebot::AppCommand {
    fn from(cmd: Commands) -> quotebot::AppCommand {
        match cmd {
            Commands::Run => quotebot::AppCommand::Run,
            Commands::Convert { text } => quotebot::AppCommand::Convert(text.join(" ")),
            Commands::Values => quotebot::AppCommand::Values,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Start the Telegram bot
    Run,
    /// Convert once and print the reply, e.g. `convert bitcoin dollar 10`
    Convert {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List available currencies
    Values,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => quotebot::cli::setup(),
        Some(cmd) => quotebot::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
