//! Pack worker: builds the package in-process and narrates progress to stdout.

use anyhow::Result;
use std::path::{Path, PathBuf};
use vnpkg_bundle::{
    MANIFEST_FILE, Manifest, PackConfig, PackReport, Packager, PatternReport, Progress,
    StageOutcome,
};

/// Package the project at `path` (default: current directory).
pub fn run(path: Option<PathBuf>, sdk_version: &str) -> Result<()> {
    let project_root = path.unwrap_or_else(|| PathBuf::from("."));

    println!("Packaging vnite plugin\n");

    let config = PackConfig::new(&project_root).with_sdk_version(sdk_version);
    let mut progress = ConsoleProgress::new(&project_root);
    let report = Packager::new(config).pack_with(&mut progress)?;

    print_summary(&report, &project_root);
    Ok(())
}

fn print_summary(report: &PackReport, project_root: &Path) {
    println!("\nPackaging complete!");
    println!("File: {}", relative(project_root, &report.output_path).display());
    println!("Size: {:.2} KB", report.size_kib());
    println!("SHA256: {}", report.checksum);
}

/// Prints each packaging step as it happens.
struct ConsoleProgress {
    project_root: PathBuf,
}

impl ConsoleProgress {
    fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

impl Progress for ConsoleProgress {
    fn manifest_loaded(&mut self, manifest: &Manifest) {
        println!("Plugin name: {}", manifest.name);
        println!("Plugin ID: {}", manifest.id);
        println!("Version: {}", manifest.version);
        println!("Main file: {}", manifest.main);
    }

    fn staging_started(&mut self) {
        println!("\nCopying files...");
    }

    fn pattern_staged(&mut self, report: &PatternReport) {
        for line in staged_lines(report) {
            println!("{line}");
        }
    }

    fn final_manifest_started(&mut self) {
        println!("\nGenerating {MANIFEST_FILE}...");
    }

    fn final_manifest_written(&mut self) {
        println!("  ✓ {MANIFEST_FILE}");
    }

    fn archive_started(&mut self) {
        println!("\nCreating archive...");
    }

    fn archive_written(&mut self, output_path: &Path) {
        println!("  ✓ {}", relative(&self.project_root, output_path).display());
    }
}

/// Console lines for one staged pattern. Absent sources print nothing.
fn staged_lines(report: &PatternReport) -> Vec<String> {
    match &report.outcome {
        StageOutcome::Files(files) => files
            .iter()
            .map(|file| format!("  ✓ {}", file.display()))
            .collect(),
        StageOutcome::Directory { dir, .. } => vec![format!("  ✓ {}/", dir.display())],
        StageOutcome::Absent => Vec::new(),
        StageOutcome::Skipped { .. } => {
            vec![format!("  ~ {} (optional, skipped)", report.pattern)]
        }
    }
}

fn relative<'a>(project_root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(project_root).unwrap_or(path)
}
