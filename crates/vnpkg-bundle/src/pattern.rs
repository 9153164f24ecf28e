//! Include patterns selecting which project files are packaged.
//!
//! Three forms are supported, and nothing else:
//!
//! - a literal relative path (`README.md`, `docs`), copied as-is; directories
//!   are copied recursively
//! - a single-level wildcard (`dist/*.js`), matched against the regular files
//!   directly inside `dist`
//! - a recursive subtree (`assets/**/*`), copying everything below `assets`

use crate::{PackError, PackResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// The fixed set of patterns used when packaging a plugin.
pub const DEFAULT_INCLUDE_PATTERNS: [&str; 9] = [
    "dist/*.js",
    "dist/*.js.map",
    "dist/*.d.ts",
    "package.json",
    "README.md",
    "LICENSE",
    "icon.png",
    "icon.ico",
    "assets/**/*",
];

const RECURSIVE_SUFFIX: &str = "/**/*";

/// A parsed include pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludePattern {
    /// A file or directory at an exact relative path.
    Literal(PathBuf),

    /// Files directly inside `dir` whose name matches `glob`.
    Wildcard { dir: PathBuf, glob: String },

    /// Every file below `dir`, at any depth.
    Recursive { dir: PathBuf },
}

impl IncludePattern {
    /// Parse a pattern string.
    ///
    /// Patterns use `/` as separator regardless of platform. `**` is only
    /// accepted in the trailing `<dir>/**/*` form, and `*` only in the last
    /// path component.
    pub fn parse(pattern: &str) -> PackResult<Self> {
        let invalid = |reason: &str| PackError::InvalidPattern(format!("{pattern}: {reason}"));

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern.starts_with('/') || pattern.split('/').any(|part| part == "..") {
            return Err(invalid("pattern must stay inside the project"));
        }
        if pattern.ends_with('/') {
            return Err(invalid("pattern ends with a separator"));
        }

        if let Some(dir) = pattern.strip_suffix(RECURSIVE_SUFFIX) {
            if dir.is_empty() || dir.contains('*') {
                return Err(invalid("recursive patterns need a literal directory"));
            }
            return Ok(Self::Recursive {
                dir: to_relative_path(dir),
            });
        }

        if pattern.contains("**") {
            return Err(invalid("`**` is only supported as a trailing `/**/*`"));
        }

        if !pattern.contains('*') {
            return Ok(Self::Literal(to_relative_path(pattern)));
        }

        let (dir, glob) = match pattern.rsplit_once('/') {
            Some((dir, glob)) => (dir, glob),
            None => ("", pattern),
        };
        if dir.contains('*') {
            return Err(invalid("wildcards are only supported in the file name"));
        }
        Ok(Self::Wildcard {
            dir: to_relative_path(dir),
            glob: glob.to_string(),
        })
    }

    /// Parse the default pattern set.
    pub fn defaults() -> PackResult<Vec<Self>> {
        DEFAULT_INCLUDE_PATTERNS
            .iter()
            .map(|pattern| Self::parse(pattern))
            .collect()
    }

    /// The directory a wildcard or recursive pattern scans, or the literal path itself.
    #[must_use]
    pub fn base(&self) -> &Path {
        match self {
            Self::Literal(path) => path,
            Self::Wildcard { dir, .. } | Self::Recursive { dir } => dir,
        }
    }

    /// Whether a file name matches a wildcard pattern's glob.
    ///
    /// Always false for the other pattern kinds.
    #[must_use]
    pub fn matches_file_name(&self, name: &str) -> bool {
        match self {
            Self::Wildcard { glob, .. } => glob_match(glob, name),
            _ => false,
        }
    }
}

impl fmt::Display for IncludePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(path) => write!(f, "{}", slash_path(path)),
            Self::Wildcard { dir, glob } if dir.as_os_str().is_empty() => write!(f, "{glob}"),
            Self::Wildcard { dir, glob } => write!(f, "{}/{glob}", slash_path(dir)),
            Self::Recursive { dir } => write!(f, "{}{RECURSIVE_SUFFIX}", slash_path(dir)),
        }
    }
}

/// Match `name` against a glob where `*` stands for any run of characters.
///
/// Every other character matches itself, and the whole name must match.
#[must_use]
pub fn glob_match(glob: &str, name: &str) -> bool {
    let glob: Vec<char> = glob.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut g, mut n) = (0, 0);
    // Position of the last `*` seen and the name index it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        if g < glob.len() && glob[g] == '*' {
            backtrack = Some((g, n));
            g += 1;
        } else if g < glob.len() && glob[g] == name[n] {
            g += 1;
            n += 1;
        } else if let Some((star, absorbed)) = backtrack {
            g = star + 1;
            n = absorbed + 1;
            backtrack = Some((star, n));
        } else {
            return false;
        }
    }

    glob[g..].iter().all(|&c| c == '*')
}

/// Render a relative path with `/` separators.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn to_relative_path(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

#[cfg(test)]
#[path = "pattern/pattern_tests.rs"]
mod pattern_tests;
