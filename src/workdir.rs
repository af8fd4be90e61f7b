//! Scoped changes to the process working directory

use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Restores the working directory it observed when dropped
#[must_use = "the previous directory is restored when the guard is dropped"]
#[derive(Debug)]
pub struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    /// Remember the current directory without changing it
    pub fn hold() -> Result<Self> {
        Ok(Self {
            original: env::current_dir()?,
        })
    }

    /// Remember the current directory, then change into `dir`
    pub fn enter(dir: &Path) -> Result<Self> {
        let guard = Self::hold()?;
        env::set_current_dir(dir)?;
        Ok(guard)
    }

    /// The directory restored on drop
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Go back to the original directory while keeping the guard alive
    pub fn reset(&self) -> Result<()> {
        env::set_current_dir(&self.original)?;
        Ok(())
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            warn!(
                "failed to restore working directory {}: {}",
                self.original.display(),
                e
            );
        }
    }
}
