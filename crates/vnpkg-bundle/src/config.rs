//! Packaging configuration.

use crate::pattern::IncludePattern;
use crate::sanitize::package_file_name;
use crate::{
    DESCRIPTOR_FILE, FALLBACK_SDK_VERSION, OUTPUT_DIR, PACKAGE_EXTENSION, PackResult, STAGING_DIR,
};
use std::path::{Path, PathBuf};

/// Where to read a plugin project from and where to put its package.
///
/// Every path the packager touches is derived from `project_root`; the
/// process working directory is never consulted.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Plugin project directory.
    pub project_root: PathBuf,

    /// Directory receiving the package. Created if missing, never wiped.
    pub output_dir: PathBuf,

    /// Temporary directory for staged files.
    pub staging_dir: PathBuf,

    /// Package file extension, without the dot.
    pub extension: String,

    /// Version recorded as `sdkVersion` in the final manifest.
    pub sdk_version: String,

    /// Patterns selecting the files to package, in order.
    pub include_patterns: Vec<IncludePattern>,
}

impl PackConfig {
    /// Default configuration for the project at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let output_dir = project_root.join(OUTPUT_DIR);
        let staging_dir = output_dir.join(STAGING_DIR);

        Self {
            project_root,
            output_dir,
            staging_dir,
            extension: PACKAGE_EXTENSION.to_string(),
            sdk_version: FALLBACK_SDK_VERSION.to_string(),
            include_patterns: default_patterns(),
        }
    }

    /// Set the version recorded as `sdkVersion`.
    #[must_use]
    pub fn with_sdk_version(mut self, sdk_version: impl Into<String>) -> Self {
        self.sdk_version = sdk_version.into();
        self
    }

    /// Replace the include patterns with parsed versions of `patterns`.
    pub fn with_include_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> PackResult<Self> {
        self.include_patterns = patterns
            .iter()
            .map(|p| IncludePattern::parse(p.as_ref()))
            .collect::<PackResult<_>>()?;
        Ok(self)
    }

    /// Path of the project's descriptor file.
    #[must_use]
    pub fn descriptor_path(&self) -> PathBuf {
        self.project_root.join(DESCRIPTOR_FILE)
    }

    /// Path of the package for a plugin id and version.
    #[must_use]
    pub fn output_path(&self, id: &str, version: &str) -> PathBuf {
        self.output_dir.join(package_file_name(id, version, &self.extension))
    }

    /// `path` relative to the project root, or `path` itself when outside it.
    #[must_use]
    pub fn relative_to_project<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }
}

/// Pick the version recorded in packages.
///
/// Falls back to [`FALLBACK_SDK_VERSION`] when no usable version is available.
#[must_use]
pub fn resolve_sdk_version(version: Option<&str>) -> String {
    match version.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => FALLBACK_SDK_VERSION.to_string(),
    }
}

fn default_patterns() -> Vec<IncludePattern> {
    IncludePattern::defaults().unwrap_or_default()
}
