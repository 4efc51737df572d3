//! User configuration: `~/.presize/config.ron`.
//!
//! Every field is optional:
//!
//! ```ron
//! (
//!     bindings: { "almost-maximize": "ctrl+opt+m" },
//!     exclusions: Some("~/.presize/excluded.ron"),
//! )
//! ```

use std::{
    collections::BTreeMap,
    env, fs, io,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

use mac_keycode::Chord;
use presize_engine::Preset;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::bindings::Bindings;

/// Result alias for configuration loading.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// I/O or filesystem read error.
    #[error("reading {}: {message}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// The file is not valid RON for this schema.
    #[error("parsing {}: {message}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Human-readable error message, including the position.
        message: String,
    },
    /// The file parsed but its contents are not usable.
    #[error("invalid config {}: {message}", path.display())]
    Validation {
        /// Offending file.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

/// On-disk shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    /// Preset name to chord overrides.
    bindings: BTreeMap<String, Chord>,
    /// Exclusion list location.
    exclusions: Option<PathBuf>,
}

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chord table with overrides applied.
    pub bindings: Bindings,
    /// Exclusion list file.
    pub exclusions: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bindings: Bindings::default(),
            exclusions: default_exclusions_path(),
        }
    }
}

/// `~/.presize`.
pub fn presize_dir() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".presize");
    p
}

/// Determine the preferred user config path (`~/.presize/config.ron`).
pub fn default_config_path() -> PathBuf {
    presize_dir().join("config.ron")
}

/// Default exclusion list (`~/.presize/excluded.ron`).
pub fn default_exclusions_path() -> PathBuf {
    presize_dir().join("excluded.ron")
}

/// Load the configuration.
///
/// With an explicit path the file must exist. Without one, the default path
/// is used if present and built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_from_path(&path)
            } else {
                debug!(path = %path.display(), "no config file; using defaults");
                Ok(Config::default())
            }
        }
    }
}

/// Read and validate the config at `path`.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        message: match e.kind() {
            io::ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        },
    })?;
    let cfg = load_from_str(&text, path)?;
    debug!(path = %path.display(), exclusions = %cfg.exclusions.display(), "config loaded");
    Ok(cfg)
}

/// Parse and validate config text. `path` is used for errors and to anchor a
/// relative exclusion path.
pub fn load_from_str(text: &str, path: &Path) -> Result<Config> {
    let raw: RawConfig = if text.trim().is_empty() {
        RawConfig::default()
    } else {
        ron::from_str(text).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };
    let invalid = |message: String| Error::Validation {
        path: path.to_path_buf(),
        message,
    };

    let overrides = raw
        .bindings
        .into_iter()
        .map(|(name, chord)| {
            name.parse::<Preset>()
                .map(|p| (p, chord))
                .map_err(|e| invalid(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    let bindings = Bindings::with_overrides(overrides).map_err(|e| invalid(e.to_string()))?;

    let exclusions = match raw.exclusions {
        Some(p) => resolve_path(&p, path.parent()),
        None => default_exclusions_path(),
    };
    Ok(Config {
        bindings,
        exclusions,
    })
}

/// Expand a leading `~/` and anchor relative paths at `base`.
fn resolve_path(p: &Path, base: Option<&Path>) -> PathBuf {
    if let Ok(rest) = p.strip_prefix("~") {
        let mut home = PathBuf::from(env::var_os("HOME").unwrap_or_default());
        home.push(rest);
        return home;
    }
    match base {
        Some(dir) if p.is_relative() => dir.join(p),
        _ => p.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn cfg_path() -> &'static Path {
        Path::new("/etc/presize/config.ron")
    }

    #[test]
    fn empty_text_is_defaults() {
        let cfg = load_from_str("", cfg_path()).expect("load");
        assert_eq!(cfg.bindings, Bindings::default());
        let cfg = load_from_str("()", cfg_path()).expect("load");
        assert_eq!(cfg.bindings, Bindings::default());
    }

    #[test]
    fn binding_override_and_exclusions_path() {
        let text = r#"(
            bindings: { "full": "ctrl+opt+shift+f", "reasonable_size": "ctrl+opt+5" },
            exclusions: Some("lists/excluded.ron"),
        )"#;
        let cfg = load_from_str(text, cfg_path()).expect("load");
        assert_eq!(
            cfg.bindings.chord(Preset::Full).map(ToString::to_string),
            Some("ctrl+opt+shift+f".to_string())
        );
        assert_eq!(
            cfg.bindings.chord(Preset::ReasonableSize).map(ToString::to_string),
            Some("ctrl+opt+5".to_string())
        );
        assert_eq!(
            cfg.exclusions,
            PathBuf::from("/etc/presize/lists/excluded.ron")
        );
    }

    #[test]
    fn absolute_exclusions_path_is_kept() {
        let cfg = load_from_str(r#"(exclusions: Some("/tmp/x.ron"))"#, cfg_path()).expect("load");
        assert_eq!(cfg.exclusions, PathBuf::from("/tmp/x.ron"));
    }

    #[test]
    fn unknown_preset_is_a_validation_error() {
        let err = load_from_str(r#"(bindings: { "huge": "ctrl+opt+h" })"#, cfg_path())
            .expect_err("invalid");
        match err {
            Error::Validation { path, message } => {
                assert_eq!(path, cfg_path());
                assert!(message.contains("huge"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_chord_is_a_parse_error() {
        let err = load_from_str(r#"(bindings: { "full": "ctrl+opt+" })"#, cfg_path())
            .expect_err("invalid");
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn duplicate_chord_is_a_validation_error() {
        let err = load_from_str(r#"(bindings: { "full": "ctrl+opt+m" })"#, cfg_path())
            .expect_err("invalid");
        assert!(matches!(err, Error::Validation { .. }), "{err:?}");
        assert!(err.to_string().contains("ctrl+opt+m"), "{err}");
    }

    #[test]
    fn preset_named_twice_is_a_validation_error() {
        let text = r#"(bindings: { "full": "ctrl+opt+shift+f", "Full": "ctrl+opt+shift+g" })"#;
        let err = load_from_str(text, cfg_path()).expect_err("invalid");
        match err {
            Error::Validation { message, .. } => {
                assert!(message.contains("full"), "{message}");
                assert!(message.contains("more than once"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = load_from_str("(theme: \"dark\")", cfg_path()).expect_err("invalid");
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nope.ron");
        let err = load(Some(&path)).expect_err("missing");
        assert_eq!(
            err,
            Error::Read {
                path,
                message: "file not found".to_string()
            }
        );
    }

    #[test]
    fn loads_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.ron");
        fs::write(&path, r#"(exclusions: Some("ex.ron"))"#).expect("write");
        let cfg = load(Some(&path)).expect("load");
        assert_eq!(cfg.exclusions, dir.path().join("ex.ron"));
    }
}
