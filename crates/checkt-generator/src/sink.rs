//! Source emission sinks.
//!
//! A sink persists one output target at a time and may be called from several
//! rayon workers at once. Sinks own name collisions: the second write of a
//! target name in one session is rejected, whichever worker gets there last.

use dashmap::{DashMap, DashSet, mapref::entry::Entry};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::trace;

use crate::pipeline::OutputTarget;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("target '{0}' has already been written")]
    Duplicate(String),
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait SourceSink: Send + Sync {
    /// Persist `target` completely, or not at all.
    fn write(&self, target: &OutputTarget) -> Result<(), EmitError>;
}

/// Writes targets below a root directory.
///
/// Contents go to a temporary file next to the destination, which is then
/// renamed into place, so a failed write never leaves a partial file.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    claimed: DashSet<String>,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            claimed: DashSet::new(),
        }
    }

    /// Absolute (root-joined) destination of a target.
    #[must_use]
    pub fn destination(&self, target: &OutputTarget) -> PathBuf {
        self.root.join(&target.path)
    }
}

impl SourceSink for FsSink {
    fn write(&self, target: &OutputTarget) -> Result<(), EmitError> {
        if !self.claimed.insert(target.name.clone()) {
            return Err(EmitError::Duplicate(target.name.clone()));
        }
        let path = self.destination(target);
        let result = write_atomically(&path, &target.contents);
        if result.is_err() {
            self.claimed.remove(&target.name);
        }
        result
    }
}

fn write_atomically(path: &Path, contents: &str) -> Result<(), EmitError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| EmitError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;
    trace!(path = %path.display(), bytes = contents.len(), "wrote target");
    Ok(())
}

/// Keeps targets in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    targets: DashMap<String, OutputTarget>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the target named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.targets.get(name).map(|t| t.contents.clone())
    }

    /// Target names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.targets.iter().map(|t| t.key().clone()).collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// All targets, sorted by name.
    #[must_use]
    pub fn into_targets(self) -> Vec<OutputTarget> {
        let mut targets: Vec<OutputTarget> = self.targets.into_iter().map(|(_, t)| t).collect();
        targets.sort_by(|a, b| a.name.cmp(&b.name));
        targets
    }
}

impl SourceSink for MemorySink {
    fn write(&self, target: &OutputTarget) -> Result<(), EmitError> {
        match self.targets.entry(target.name.clone()) {
            Entry::Occupied(_) => Err(EmitError::Duplicate(target.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(target.clone());
                Ok(())
            }
        }
    }
}
