//! Reckoner CLI - reconstruct declarative course files from live Helm state

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;

use error::CliError;

#[derive(Parser)]
#[command(name = "reckoner")]
#[command(version)]
#[command(about = "Export the live state of a Helm namespace as a declarative course file", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every installed release of a namespace into a course file
    Export {
        /// Namespace to export
        namespace: String,

        /// Output root directory; the manifest lands under
        /// <dest>/reckoner_files/, values files under <dest>/<namespace
        /// segments>/
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,

        /// Repository names excluded from resolution (repeatable)
        #[arg(long = "ignore-repo")]
        ignore_repo: Vec<String>,

        /// Extra argument passed through to every helm invocation
        /// (repeatable, e.g. --helm-arg=--kube-context=prod)
        #[arg(long = "helm-arg", allow_hyphen_values = true)]
        helm_args: Vec<String>,

        /// Timeout for each helm invocation, in seconds
        #[arg(long, default_value_t = 120)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err.clone()));
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Export {
            namespace,
            dest,
            ignore_repo,
            helm_args,
            timeout,
        } => commands::export::run(&namespace, &dest, &ignore_repo, &helm_args, timeout).await,
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
