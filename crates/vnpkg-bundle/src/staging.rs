//! Staging tree: the temporary directory holding exactly what goes into the archive.
//!
//! Files are copied pattern by pattern. Copying is best-effort per pattern:
//! a missing source or a failed copy is recorded in the pattern's
//! [`StageOutcome`] instead of aborting the run.

use crate::pattern::IncludePattern;
use crate::{PackError, PackResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What happened when one include pattern was staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Individual files were copied (literal file or wildcard matches).
    Files(Vec<PathBuf>),

    /// A directory was copied recursively.
    Directory { dir: PathBuf, files: Vec<PathBuf> },

    /// The source does not exist or nothing matched.
    Absent,

    /// Staging failed part way; whatever was copied before the failure stays.
    Skipped { reason: String },
}

impl StageOutcome {
    /// Staged file paths, relative to the project root.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Files(files) | Self::Directory { files, .. } => files,
            Self::Absent | Self::Skipped { .. } => &[],
        }
    }
}

/// Outcome of staging a single pattern.
#[derive(Debug, Clone)]
pub struct PatternReport {
    pub pattern: IncludePattern,
    pub outcome: StageOutcome,
}

/// A freshly created staging directory.
#[derive(Debug)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// Create an empty staging directory at `root`.
    ///
    /// A directory left behind by an earlier failed run is removed first.
    pub fn create(root: impl Into<PathBuf>) -> PackResult<Self> {
        let root = root.into();

        if root.exists() {
            debug!(path = %root.display(), "removing stale staging directory");
            fs::remove_dir_all(&root)?;
        }
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Path of the staging directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Stage every match of `pattern` from `project_root`.
    ///
    /// Never fails: errors are folded into [`StageOutcome::Skipped`].
    pub fn stage(&self, project_root: &Path, pattern: &IncludePattern) -> PatternReport {
        let outcome = match self.try_stage(project_root, pattern) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%pattern, error = %e, "optional pattern skipped");
                StageOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };

        PatternReport {
            pattern: pattern.clone(),
            outcome,
        }
    }

    /// Write raw bytes at a path relative to the staging root, replacing any existing file.
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &[u8]) -> PackResult<()> {
        let dest = self.root.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, contents)?;
        Ok(())
    }

    /// Delete the staging directory and everything in it.
    pub fn remove(self) -> PackResult<()> {
        fs::remove_dir_all(&self.root)?;
        Ok(())
    }

    fn try_stage(
        &self,
        project_root: &Path,
        pattern: &IncludePattern,
    ) -> PackResult<StageOutcome> {
        match pattern {
            IncludePattern::Literal(path) => {
                let source = project_root.join(path);
                if source.is_file() {
                    self.copy_file(&source, path)?;
                    Ok(StageOutcome::Files(vec![path.clone()]))
                } else if source.is_dir() {
                    let files = self.copy_tree(&source, path)?;
                    Ok(StageOutcome::Directory {
                        dir: path.clone(),
                        files,
                    })
                } else {
                    Ok(StageOutcome::Absent)
                }
            }

            IncludePattern::Wildcard { dir, .. } => {
                let source_dir = project_root.join(dir);
                if !source_dir.is_dir() {
                    return Ok(StageOutcome::Absent);
                }

                let mut entries = fs::read_dir(&source_dir)?.collect::<Result<Vec<_>, _>>()?;
                entries.sort_by_key(|entry| entry.file_name());

                let mut files = Vec::new();
                for entry in entries {
                    let file_name = entry.file_name();
                    let Some(name) = file_name.to_str() else {
                        continue;
                    };
                    // Follows symlinks; only regular files directly inside `dir` qualify.
                    if !pattern.matches_file_name(name) || !entry.path().is_file() {
                        continue;
                    }

                    let relative = dir.join(name);
                    self.copy_file(&entry.path(), &relative)?;
                    files.push(relative);
                }

                if files.is_empty() {
                    Ok(StageOutcome::Absent)
                } else {
                    Ok(StageOutcome::Files(files))
                }
            }

            IncludePattern::Recursive { dir } => {
                let source_dir = project_root.join(dir);
                if !source_dir.is_dir() {
                    return Ok(StageOutcome::Absent);
                }

                let files = self.copy_tree(&source_dir, dir)?;
                Ok(StageOutcome::Directory {
                    dir: dir.clone(),
                    files,
                })
            }
        }
    }

    /// Copy one file to `relative` under the staging root.
    fn copy_file(&self, source: &Path, relative: &Path) -> PackResult<()> {
        let dest = self.root.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &dest)?;
        debug!(file = %relative.display(), "staged");
        Ok(())
    }

    /// Copy a directory tree to `relative` under the staging root.
    ///
    /// Returns the copied files relative to the project root, in sorted order.
    fn copy_tree(&self, source_dir: &Path, relative: &Path) -> PackResult<Vec<PathBuf>> {
        fs::create_dir_all(self.root.join(relative))?;

        let mut files = Vec::new();
        let walker = WalkDir::new(source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            // The staging directory may live inside a directory being copied.
            .filter_entry(|entry| entry.path() != self.root);

        for entry in walker {
            let entry = entry?;
            let inner = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|e| PackError::Io(std::io::Error::other(e)))?;
            let target = relative.join(inner);

            if entry.file_type().is_dir() {
                fs::create_dir_all(self.root.join(&target))?;
            } else if entry.file_type().is_file() {
                self.copy_file(entry.path(), &target)?;
                files.push(target);
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
#[path = "staging/staging_tests.rs"]
mod staging_tests;
