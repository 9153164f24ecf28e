//! The packaging pipeline.
//!
//! [`Packager::pack`] runs the whole pipeline for one project:
//!
//! 1. read and validate `package.json`
//! 2. check that the `main` entry file exists
//! 3. create the output directory and a fresh staging tree
//! 4. stage every include pattern (best-effort per pattern)
//! 5. write the final `manifest.json` into the staging tree
//! 6. compress the staging tree into `<output>/<id>-<version>.vnpkg`
//! 7. remove the staging tree
//!
//! Steps 1, 2 and 6 are the expected failure points. The staging tree is
//! only removed once the archive has been written.

use crate::archive::{self, ArchiveSummary};
use crate::staging::{PatternReport, StagingTree};
use crate::{FinalManifest, MANIFEST_FILE, Manifest, PackConfig, PackError, PackResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Receives progress notifications while a package is built.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// The descriptor was read and validated.
    fn manifest_loaded(&mut self, _manifest: &Manifest) {}

    /// File collection is about to start.
    fn staging_started(&mut self) {}

    /// One include pattern was staged.
    fn pattern_staged(&mut self, _report: &PatternReport) {}

    /// The final manifest is about to be written.
    fn final_manifest_started(&mut self) {}

    /// The final manifest was written to the staging tree.
    fn final_manifest_written(&mut self) {}

    /// Compression is about to start.
    fn archive_started(&mut self) {}

    /// The package file was written.
    fn archive_written(&mut self, _output_path: &Path) {}
}

/// A [`Progress`] that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackReport {
    /// The validated descriptor.
    pub manifest: Manifest,

    /// Path of the written package.
    pub output_path: PathBuf,

    /// Package size in bytes.
    pub size_bytes: u64,

    /// SHA256 of the package, hex encoded.
    pub checksum: String,

    /// Archive entry names, in archive order.
    pub entries: Vec<String>,

    /// What each include pattern contributed.
    pub staged: Vec<PatternReport>,
}

impl PackReport {
    /// Package size in KiB.
    #[must_use]
    pub fn size_kib(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Builds a package for one plugin project.
#[derive(Debug, Clone)]
pub struct Packager {
    config: PackConfig,
}

impl Packager {
    /// Create a packager for the given configuration.
    #[must_use]
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Build the package without progress reporting.
    pub fn pack(&self) -> PackResult<PackReport> {
        self.pack_with(&mut NoProgress)
    }

    /// Build the package, notifying `progress` as each step completes.
    pub fn pack_with(&self, progress: &mut dyn Progress) -> PackResult<PackReport> {
        let config = &self.config;

        let manifest = self.read_manifest()?;
        progress.manifest_loaded(&manifest);
        self.check_main(&manifest)?;

        fs::create_dir_all(&config.output_dir)?;
        let staging = StagingTree::create(&config.staging_dir)?;

        progress.staging_started();
        let mut staged = Vec::with_capacity(config.include_patterns.len());
        for pattern in &config.include_patterns {
            let report = staging.stage(&config.project_root, pattern);
            progress.pattern_staged(&report);
            staged.push(report);
        }

        progress.final_manifest_started();
        let final_manifest = FinalManifest::new(manifest.clone(), &config.sdk_version);
        staging.write_file(MANIFEST_FILE, final_manifest.to_json()?.as_bytes())?;
        progress.final_manifest_written();

        let output_path = config.output_path(&manifest.id, &manifest.version);
        progress.archive_started();
        let ArchiveSummary {
            entries,
            size_bytes,
            checksum,
        } = archive::write_archive(staging.path(), &output_path)?;
        progress.archive_written(&output_path);

        staging.remove()?;

        info!(
            plugin = %manifest.id,
            version = %manifest.version,
            output = %output_path.display(),
            size_bytes,
            "package created"
        );

        Ok(PackReport {
            manifest,
            output_path,
            size_bytes,
            checksum,
            entries,
            staged,
        })
    }

    /// Read the descriptor and check that its entry file exists.
    ///
    /// Touches nothing on disk besides reading.
    pub fn load_manifest(&self) -> PackResult<Manifest> {
        let manifest = self.read_manifest()?;
        self.check_main(&manifest)?;
        Ok(manifest)
    }

    fn read_manifest(&self) -> PackResult<Manifest> {
        let descriptor = self.config.descriptor_path();
        debug!(path = %descriptor.display(), "reading descriptor");

        Manifest::from_file(&descriptor).map_err(|e| match e {
            PackError::DescriptorNotFound(_) => {
                PackError::DescriptorNotFound(self.config.project_root.clone())
            }
            other => other,
        })
    }

    fn check_main(&self, manifest: &Manifest) -> PackResult<()> {
        if !manifest.main_path(&self.config.project_root).exists() {
            return Err(PackError::MainNotFound(manifest.main.clone()));
        }
        Ok(())
    }
}
