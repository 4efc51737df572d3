//! Persistent exclusion list.
//!
//! Applications whose bundle identifier is in the list are never moved or
//! resized. The list lives in a RON file holding a sequence of strings:
//!
//! ```ron
//! ["com.apple.Terminal", "com.googlecode.iterm2"]
//! ```
//!
//! Every change is written back immediately through a temporary file and a
//! rename, so a crash never leaves a half-written list behind.
#![warn(missing_docs)]

use std::{
    collections::BTreeSet,
    fmt, fs, io,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

use parking_lot::RwLock;
use presize_engine::Exclusions;
use ron::ser::PrettyConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Result alias for exclusion store operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced while loading or saving the exclusion list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The file exists but could not be read.
    #[error("reading {}: {message}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// The file is not a RON sequence of strings.
    #[error("parsing {}: {message}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// The list could not be written back.
    #[error("writing {}: {message}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

/// Thread-safe exclusion set backed by a file.
#[derive(Debug)]
pub struct ExclusionStore {
    /// Backing file.
    path: PathBuf,
    /// Excluded bundle identifiers.
    apps: RwLock<BTreeSet<String>>,
}

impl ExclusionStore {
    /// Load the list at `path`. A missing or blank file is an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let apps = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeSet::new(),
            Ok(text) => parse(&text).map_err(|message| Error::Parse {
                path: path.clone(),
                message,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                return Err(Error::Read {
                    path,
                    message: e.to_string(),
                });
            }
        };
        debug!(path = %path.display(), count = apps.len(), "exclusions loaded");
        Ok(Self {
            path,
            apps: RwLock::new(apps),
        })
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if `app` is excluded.
    pub fn is_excluded(&self, app: &str) -> bool {
        self.apps.read().contains(app)
    }

    /// Flip the exclusion state of `app` and persist the list. Returns the new
    /// state: `true` when `app` is now excluded. On a write failure the
    /// in-memory set is left unchanged.
    pub fn toggle(&self, app: &str) -> Result<bool> {
        let mut apps = self.apps.write();
        let mut next = apps.clone();
        let excluded = if next.remove(app) {
            false
        } else {
            next.insert(app.to_string());
            true
        };
        save(&self.path, &next)?;
        *apps = next;
        info!(app, excluded, "exclusion toggled");
        Ok(excluded)
    }

    /// Excluded identifiers in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.apps.read().iter().cloned().collect()
    }
}

impl Exclusions for ExclusionStore {
    fn is_excluded(&self, app: &str) -> bool {
        Self::is_excluded(self, app)
    }
}

/// Parse the file body into a set.
fn parse(text: &str) -> StdResult<BTreeSet<String>, String> {
    let list: Vec<String> = ron::from_str(text).map_err(|e| e.to_string())?;
    Ok(list.into_iter().collect())
}

/// Write `apps` to `path` via a sibling temporary file.
fn save(path: &Path, apps: &BTreeSet<String>) -> Result<()> {
    let err = |e: &dyn fmt::Display| Error::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|e| err(&e))?;
    }
    let list: Vec<&String> = apps.iter().collect();
    let mut body = ron::ser::to_string_pretty(&list, PrettyConfig::default()).map_err(|e| err(&e))?;
    body.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, body).map_err(|e| err(&e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        err(&e)
    })
}
