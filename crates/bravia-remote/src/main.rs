//! Bravia remote: command-line entry point.
//!
//! Plans and replays on-screen keyboard input and resolves named TV commands.
//! Key presses go to a `TracingSink`, so every IRCC code that would be sent
//! to the TV is written to the log instead.
//!
//! # Usage
//!
//! ```text
//! bravia-remote [OPTIONS] <COMMAND>
//!
//! Commands:
//!   plan     Print the key presses needed to type TEXT
//!   type     Type TEXT with real pacing (Ctrl+C cancels)
//!   resolve  Resolve the first known command name to its IRCC code
//!   list     List the TV's command directory
//!   key      Press one fixed remote key
//!   launch   Launch an app shortcut (youtube, netflix, tv, demo-mode)
//!
//! Options:
//!   --config <FILE>            TOML config file [default: bravia-remote.toml]
//!   --directory <FILE>         Saved getRemoteControllerInfo response
//!   --step-delay-ms <MS>       Delay after each arrow key
//!   --confirm-margin-ms <MS>   Extra delay after each Confirm
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                   | Description                      |
//! |----------------------------|----------------------------------|
//! | `BRAVIA_CONFIG`            | Config file path                 |
//! | `BRAVIA_DIRECTORY`         | Command directory file           |
//! | `BRAVIA_STEP_DELAY_MS`     | Delay after each arrow key       |
//! | `BRAVIA_CONFIRM_MARGIN_MS` | Extra delay after each Confirm   |
//! | `RUST_LOG`                 | Log filter, overrides the config |

use std::path::PathBuf;
use std::sync::{atomic::Ordering, Arc};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bravia_core::PlanStep;
use bravia_remote::infrastructure::directory::JsonFileDirectory;
use bravia_remote::infrastructure::sink::TracingSink;
use bravia_remote::infrastructure::storage::{load_config_from, AppConfig};
use bravia_remote::{AppShortcut, RemoteManager, RemoteSink};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Bravia TV remote: on-screen keyboard typing and command resolution.
#[derive(Debug, Parser)]
#[command(
    name = "bravia-remote",
    about = "Type text and send commands to a Bravia TV",
    version
)]
struct Cli {
    /// TOML configuration file.  A missing file means all defaults.
    #[arg(
        long,
        global = true,
        default_value = "bravia-remote.toml",
        env = "BRAVIA_CONFIG"
    )]
    config: PathBuf,

    /// Saved `getRemoteControllerInfo` response used to resolve command names.
    ///
    /// Overrides `[commands] directory_file` from the config file.
    #[arg(long, global = true, env = "BRAVIA_DIRECTORY")]
    directory: Option<PathBuf>,

    /// Delay after each arrow key, in milliseconds.
    #[arg(long, global = true, env = "BRAVIA_STEP_DELAY_MS")]
    step_delay_ms: Option<u64>,

    /// Extra delay after each Confirm, in milliseconds.
    #[arg(long, global = true, env = "BRAVIA_CONFIRM_MARGIN_MS")]
    confirm_margin_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the key presses needed to type TEXT, without sending them.
    Plan { text: String },
    /// Type TEXT on the on-screen keyboard with real pacing.
    Type { text: String },
    /// Resolve the first known command name to its IRCC code.
    Resolve {
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// List the TV's command directory.
    List,
    /// Press one fixed remote key, e.g. `home` or `volume-up`.
    Key { name: String },
    /// Launch an app shortcut: youtube, netflix, tv, demo-mode.
    Launch { app: String },
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(ms) = self.step_delay_ms {
            config.typing.step_delay_ms = ms;
        }
        if let Some(ms) = self.confirm_margin_ms {
            config.typing.confirm_margin_ms = ms;
        }
        if let Some(path) = &self.directory {
            config.commands.directory_file = Some(path.clone());
        }
        config
    }

    /// Loads the config file and applies overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let file = load_config_from(&self.config)
            .with_context(|| format!("failed to load config from {}", self.config.display()))?;
        Ok(self.apply_overrides(file))
    }
}

/// The directory file, required by commands that resolve names.
fn require_directory(config: &AppConfig) -> anyhow::Result<PathBuf> {
    config.commands.directory_file.clone().context(
        "no command directory configured: pass --directory or set [commands] directory_file",
    )
}

fn build_manager(config: &AppConfig, sink: Arc<dyn RemoteSink>) -> RemoteManager {
    let directory = config.commands.directory_file.clone().unwrap_or_default();
    RemoteManager::new(
        sink,
        Arc::new(JsonFileDirectory::new(directory)),
        config.typing.pacing(),
    )
    .with_max_steps(config.typing.max_steps_per_char)
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // `RUST_LOG` wins; otherwise the config file's level applies.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level)),
        )
        .init();

    let sink = Arc::new(TracingSink::new());
    let manager = build_manager(&config, Arc::clone(&sink) as Arc<dyn RemoteSink>);

    match cli.command {
        Command::Plan { text } => print_plan(&manager, &config, &text),
        Command::Type { text } => {
            let handle = manager.type_text(text);

            // Ctrl+C stops the walk before the next key press.
            let cancel = handle.cancel_flag();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("received Ctrl+C, cancelling typing");
                        cancel.store(true, Ordering::Relaxed);
                    }
                    Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
                }
            });

            let report = handle.wait().await.context("typing task failed")?;
            println!(
                "typed {:?} ({} keys sent, {} failed{})",
                report.typed(),
                report.commands_sent,
                report.failed_sends,
                if report.cancelled { ", cancelled" } else { "" }
            );
            let skipped = report.skipped();
            if !skipped.is_empty() {
                warn!("skipped characters not on the keyboard: {skipped:?}");
            }
        }
        Command::Resolve { candidates } => {
            require_directory(&config)?;
            match manager.resolver().resolve(&candidates).await {
                Some(code) => println!("{code}"),
                None => bail!("no command found for candidates {candidates:?}"),
            }
        }
        Command::List => {
            let path = require_directory(&config)?;
            let commands = manager.load_commands().await;
            if commands.is_empty() {
                bail!("command directory {} is empty or unreadable", path.display());
            }
            for (name, code) in commands.iter() {
                println!("{name}\t{code}");
            }
        }
        Command::Key { name } => {
            let key = manager.send_key_named(&name).await?;
            println!("{key}\t{}", key.code());
        }
        Command::Launch { app } => {
            require_directory(&config)?;
            let app: AppShortcut = app.parse()?;
            manager.launch(app).await?;
            println!("launched {app}");
        }
    }

    info!("{} IRCC codes logged", sink.sent_count());
    Ok(())
}

fn print_plan(manager: &RemoteManager, config: &AppConfig, text: &str) {
    let (transliteration, plan) = manager.plan_text(text);
    println!(
        "{:?} keyboard: {}",
        transliteration.layout,
        transliteration.as_string()
    );

    for step in &plan.steps {
        match step {
            PlanStep::Press(press) => {
                let moves: Vec<String> = press.moves.iter().map(|m| format!("{m:?}")).collect();
                println!(
                    "{} {} -> {}: {} Confirm",
                    press.ch,
                    press.from,
                    press.to,
                    moves.join(" ")
                );
            }
            PlanStep::Skip(ch) => println!("{ch:?} skipped: not on the keyboard"),
            PlanStep::Unreachable { ch, error } => println!("{ch:?} skipped: {error}"),
        }
    }

    let commands = plan.commands();
    let duration = config.typing.pacing().total_for(&commands);
    println!(
        "{} key presses, about {:.1}s",
        commands.len(),
        duration.as_secs_f64()
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
