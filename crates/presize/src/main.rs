//! Binary entrypoint for presize.
use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use exclusions::ExclusionStore;
use presize_engine::{Outcome, Preset};

/// Chord table and defaults.
mod bindings;
/// `~/.presize/config.ron` loading.
mod config;
mod error;
/// Daemon wiring.
mod run;

use crate::{config::Config, error::Result};

#[derive(Parser, Debug)]
#[command(
    name = "presize",
    about = "Resize and center the focused window from global hotkeys",
    version
)]
/// Command-line interface for the `presize` binary.
struct Cli {
    /// Optional subcommand; defaults to `run`.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Capture hotkeys and place windows until interrupted.
    Run,
    /// Apply one preset to the frontmost window and exit.
    Apply {
        /// Preset name, e.g. `almost-maximize`.
        preset: Preset,
    },
    /// Print the effective chord table.
    Bindings,
    /// Inspect or edit the exclusion list.
    Exclude {
        /// Action to perform.
        #[command(subcommand)]
        action: ExcludeAction,
    },
    /// Print Accessibility and Input Monitoring status.
    Permissions,
}

#[derive(Subcommand, Debug)]
/// `presize exclude` actions.
enum ExcludeAction {
    /// List excluded bundle identifiers.
    List,
    /// Exclude or re-include an application.
    Toggle {
        /// Bundle identifier, e.g. `com.apple.Terminal`.
        id: String,
    },
    /// Report whether an application is excluded.
    Check {
        /// Bundle identifier.
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if let Err(e) = dispatch(&cli) {
        eprintln!("presize: {e}");
        process::exit(1);
    }
}

/// Load configuration and run the selected command.
fn dispatch(cli: &Cli) -> Result<()> {
    if matches!(cli.command, Some(Command::Permissions)) {
        print_permissions();
        return Ok(());
    }
    let cfg = config::load(cli.config.as_deref())?;
    match &cli.command {
        None | Some(Command::Run) => run::run(&cfg),
        Some(Command::Apply { preset }) => apply(&cfg, *preset),
        Some(Command::Bindings) => {
            print_bindings(&cfg);
            Ok(())
        }
        Some(Command::Exclude { action }) => exclude(&cfg, action),
        Some(Command::Permissions) => Ok(()),
    }
}

/// `presize apply`.
fn apply(cfg: &Config, preset: Preset) -> Result<()> {
    match run::apply_once(cfg, preset)? {
        Outcome::Placed(p) => println!(
            "{}: {}x{} at ({}, {}) on display {}",
            p.preset, p.size.width, p.size.height, p.origin.x, p.origin.y, p.display
        ),
        Outcome::Excluded { app } => println!("{preset}: {app} is excluded"),
    }
    Ok(())
}

/// `presize bindings`.
fn print_bindings(cfg: &Config) {
    let width = Preset::ALL.iter().map(|p| p.name().len()).max().unwrap_or(0);
    for (preset, chord) in cfg.bindings.iter() {
        println!("{:<width$}  {:<22}  {}", preset.name(), chord.to_string(), preset.label());
    }
}

/// `presize exclude ...`.
fn exclude(cfg: &Config, action: &ExcludeAction) -> Result<()> {
    let store = ExclusionStore::load(&cfg.exclusions)?;
    match action {
        ExcludeAction::List => {
            for id in store.list() {
                println!("{id}");
            }
        }
        ExcludeAction::Toggle { id } => {
            let now = store.toggle(id)?;
            println!("{id}: {}", if now { "excluded" } else { "included" });
        }
        ExcludeAction::Check { id } => {
            let excluded = store.is_excluded(id);
            println!("{id}: {}", if excluded { "excluded" } else { "included" });
        }
    }
    Ok(())
}

/// `presize permissions`.
fn print_permissions() {
    let st = permissions::check_permissions();
    let mark = |ok: bool| if ok { "granted" } else { "missing" };
    println!("Accessibility:    {}", mark(st.accessibility_ok));
    println!("Input Monitoring: {}", mark(st.input_ok));
    if !st.all_granted() {
        println!(
            "Grant {} in System Settings > Privacy & Security.",
            st.missing().join(" and ")
        );
    }
}
