use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "fr-cli")]
#[command(about = "Fencing bout referee CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> venue -> event...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Replay a referee script against a fresh bout and print a JSON report
    Simulate {
        /// Layered config paths in merge order (defaults apply when omitted)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Script file: one referee action per line, `#` starts a comment
        #[arg(long)]
        script: PathBuf,

        /// Fail on config keys no bout setting reads (default: warn)
        #[arg(long, default_value_t = false)]
        strict_keys: bool,
    },

    /// Live bout: read actions from stdin, clock runs in real time, bus messages on stdout
    Live {
        /// Layered config paths in merge order (defaults apply when omitted)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Fail on config keys no bout setting reads (default: warn)
        #[arg(long, default_value_t = false)]
        strict_keys: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::ConfigHash { paths } => commands::config_hash(&paths)?,
        Commands::Simulate {
            config_paths,
            script,
            strict_keys,
        } => {
            let report = commands::simulate::simulate(&config_paths, &script, strict_keys)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Live {
            config_paths,
            strict_keys,
        } => commands::live::run_live(&config_paths, strict_keys).await?,
    }
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
