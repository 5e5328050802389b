//! homunculus: inspect and drive the evolution engine from the shell
//!
//! Usage:
//!   homunculus status                              → print the exported projection
//!   homunculus context proposer                    → prompt context for a persona
//!   homunculus capabilities                        → unlocked capability tags
//!   homunculus record-outcome --command C --success [--output O]
//!   homunculus record-proposal --text T [--kind K]
//!   homunculus dump-config                         → default config as TOML

use clap::{Parser, Subcommand};
use homunculus_core::{Persona, DEFAULT_PROPOSAL_KIND};
use homunculus_evolution::persist::LoadOutcome;
use homunculus_evolution::{EvolutionConfig, EvolutionStore};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "homunculus",
    about = "Gamified evolution engine for a proposer/evaluator agent loop",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace directory holding the state and projection files
    #[arg(short, long, global = true)]
    workspace: Option<String>,

    /// Path to config file (TOML). Default: <workspace>/evolution.toml
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the exported projection as JSON
    Status,
    /// Print prompt context for a persona (proposer or evaluator)
    Context {
        persona: Persona,
    },
    /// List unlocked capability tags
    Capabilities,
    /// Record an executed command's outcome
    RecordOutcome {
        /// The command text that was executed
        #[arg(long)]
        command: String,
        /// The command succeeded
        #[arg(long, conflicts_with = "failed")]
        success: bool,
        /// The command failed
        #[arg(long)]
        failed: bool,
        /// Captured command output
        #[arg(long, default_value = "")]
        output: String,
    },
    /// Record a persona proposal
    RecordProposal {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = DEFAULT_PROPOSAL_KIND)]
        kind: String,
    },
    /// Dump default config as TOML
    DumpConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::DumpConfig = cli.command {
        println!("{}", EvolutionConfig::default().to_toml());
        return Ok(());
    }

    init_tracing();

    let workspace = cli
        .workspace
        .as_deref()
        .map(expand_tilde)
        .or_else(|| std::env::var("HOMUNCULUS_WORKSPACE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| workspace.join("evolution.toml"));
    let config = EvolutionConfig::load(&config_path);

    let mut store = EvolutionStore::open(&workspace, config)?;
    match store.load_outcome() {
        LoadOutcome::Corrupt { backup } | LoadOutcome::TooNew { backup, .. } => {
            if let Some(path) = backup {
                tracing::warn!("Previous state was unusable, preserved at {}", path.display());
            }
        }
        _ => {}
    }

    match cli.command {
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(&store.projection())?);
        }
        Commands::Context { persona } => {
            println!("{}", store.context_for(persona));
        }
        Commands::Capabilities => {
            for cap in store.unlocked_capabilities() {
                println!("{}", cap);
            }
        }
        Commands::RecordOutcome {
            command,
            success,
            failed,
            output,
        } => {
            if success == failed {
                anyhow::bail!("pass exactly one of --success or --failed");
            }
            let report = store.record_outcome(&command, success, &output)?;
            println!(
                "+{} xp, skills: [{}], level {}, generation {}",
                report.xp_gained,
                report.skills_used.join(", "),
                store.state().level,
                store.state().generation
            );
        }
        Commands::RecordProposal { text, kind } => {
            let report = store.record_proposal(&text, &kind)?;
            let nudged: Vec<&str> = report.traits_nudged.iter().map(|t| t.as_str()).collect();
            println!("proposal #{} recorded, traits nudged: [{}]", store.state().total_proposals, nudged.join(", "));
        }
        Commands::DumpConfig => unreachable!("handled before the store is opened"),
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homunculus=info,homunculus_evolution=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}
