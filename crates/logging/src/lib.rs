#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the presize workspace.
//!
//! - [`LogArgs`]: flags every binary flattens into its CLI
//! - [`compute_spec`]: turn those flags (or `RUST_LOG`) into a filter directive
//! - [`init`]: install the global subscriber

use std::{env, io};

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "presize_engine=trace,mac_winops=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "presize",
        "presize_engine",
        "exclusions",
        "mac_hotkey",
        "mac_keycode",
        "mac_winops",
        "permissions",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(args: &LogArgs) -> String {
    spec_with_env(args, env::var("RUST_LOG").ok().as_deref())
}

/// [`compute_spec`] with the environment value supplied by the caller.
fn spec_with_env(args: &LogArgs, rust_log: Option<&str>) -> String {
    if let Some(spec) = &args.log_filter {
        return spec.clone();
    }
    if args.trace {
        return level_spec_for("trace");
    }
    if args.debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = &args.log_level {
        return level_spec_for(lvl);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => level_spec_for("info"),
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install the global subscriber: env filter plus compact fmt output without
/// timestamps, written to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(args: &LogArgs) {
    let spec = compute_spec(args);
    let installed = tracing_subscriber::registry()
        .with(env_filter_from_spec(&spec))
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_writer(io::stderr),
        )
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(spec = %spec, "logging initialized");
    }
}
