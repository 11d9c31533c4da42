//! CLI entry point for keyprobe.

mod cmd;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keyprobe")]
#[command(version)]
#[command(about = "Validate API tokens and webhook secrets against live services", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    keyprobe check github-token ghp_abc123\n    cat tokens.txt | keyprobe check slack-token -\n    keyprobe list"
)]
struct Cli {
    /// Load the service map from a YAML file instead of the embedded one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more tokens against a configured service
    ///
    /// Live tokens are printed to stdout. With a single token the exit
    /// code doubles as the verdict: 0 live, 1 not. Pass '-' as the token
    /// to stream candidates from stdin, one per line.
    Check {
        /// Service to probe (see 'keyprobe list')
        service: String,
        /// Candidate tokens, or '-' to read them from stdin
        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,
    },
    /// List configured services
    List,
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Also show commit and build date
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red());
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Check { service, tokens } => {
            cmd::check::run(cli.config.as_deref(), &service, &tokens, cli.quiet)
        }
        Commands::List => {
            cmd::list::run(cli.config.as_deref(), cli.quiet)?;
            Ok(0)
        }
        Commands::Completions { shell } => {
            cmd::util::cmd_completion(shell)?;
            Ok(0)
        }
        Commands::Version { verbose } => {
            cmd::util::cmd_version(verbose)?;
            Ok(0)
        }
    }
}
