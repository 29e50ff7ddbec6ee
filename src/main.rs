use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use newsdesk::config::Config;
use newsdesk::gate::{UnlockOutcome, digest_password};
use newsdesk::paint::{Format, paint};
use newsdesk::refresh::{Desk, RefreshOutcome};
use newsdesk::source::source_for;
use newsdesk::store::FileTokenStore;
use newsdesk::tui::TuiRunOptions;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Filtered, password-gated view of a news digest snapshot", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot URL or file path (overrides config)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Unlock token state file (overrides config)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal digest
    Tui {
        /// Start with summaries shown
        #[arg(long)]
        summaries: bool,
        /// Write logs to this file (the terminal is in use)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Fetch once and print the digest
    Show {
        /// Filter query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Include item summaries
        #[arg(long)]
        summaries: bool,
        /// Password to try when the digest is locked
        #[arg(long)]
        password: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Fetch the snapshot and submit a password
    Unlock {
        password: String,
    },

    /// Print the access hash for a password
    Hash {
        password: String,
    },

    /// Print the resolved configuration
    Config,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Tui {
            log_file: Some(path),
            ..
        } => newsdesk::logging::init_file(path)?,
        Commands::Tui { .. } => {}
        _ => newsdesk::logging::init_stderr(),
    }

    let cfg = resolve_config(&cli)?;
    let state_path = cfg.state_path();

    match cli.command {
        Commands::Tui { summaries, .. } => {
            let source = source_for(&cfg.snapshot_url, cfg.request_timeout())?;
            newsdesk::tui::run_with_options(TuiRunOptions {
                source: Arc::from(source),
                state_path,
                show_summaries: summaries,
                auto_refresh: cfg.auto_refresh(),
            })?;
        }

        Commands::Show {
            query,
            summaries,
            password,
            format,
        } => {
            let source = source_for(&cfg.snapshot_url, cfg.request_timeout())?;
            let mut store = FileTokenStore::new(state_path);
            let mut desk = Desk::new();
            desk.set_query(&query);
            desk.set_show_summaries(summaries);

            let outcome = desk.refresh(source.as_ref(), &store);
            if let Some(password) = password
                && desk.gate().is_locked()
            {
                desk.try_unlock(&password, &mut store);
            }

            print!("{}", paint(&desk.page(), format)?);
            if let RefreshOutcome::Failed(err) = outcome {
                anyhow::bail!("refresh {} failed: {}", source.describe(), err);
            }
        }

        Commands::Unlock { password } => {
            let source = source_for(&cfg.snapshot_url, cfg.request_timeout())?;
            let mut store = FileTokenStore::new(state_path);
            let mut desk = Desk::new();
            if let RefreshOutcome::Failed(err) = desk.refresh(source.as_ref(), &store) {
                anyhow::bail!("refresh {} failed: {}", source.describe(), err);
            }
            match desk.try_unlock(&password, &mut store) {
                UnlockOutcome::Unlocked => {
                    println!("Unlocked (token saved to {})", store.path().display())
                }
                UnlockOutcome::AlreadyUnlocked => println!("Already unlocked"),
                UnlockOutcome::Empty | UnlockOutcome::Mismatch => {
                    let msg = desk
                        .gate()
                        .message()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Locked".to_string());
                    anyhow::bail!("{}", msg);
                }
            }
        }

        Commands::Hash { password } => {
            println!("{}", digest_password(&password));
        }

        Commands::Config => {
            println!(
                "{}",
                serde_json::to_string_pretty(&cfg).context("serialize config json")?
            );
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        cfg.snapshot_url = url.clone();
    }
    if let Some(state) = &cli.state {
        cfg.state_path = Some(state.clone());
    }
    Ok(cfg)
}
