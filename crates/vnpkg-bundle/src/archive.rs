//! Archive creation.
//!
//! [`write_archive`] compresses a staged directory into a `.vnpkg` zip file.
//! Entries are rooted at the directory's children, added in sorted order,
//! and stamped with a fixed modification time, so the same staged files
//! always produce the same archive bytes.

use crate::pattern::slash_path;
use crate::{PackError, PackResult};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate level used for every entry.
pub const MAX_COMPRESSION_LEVEL: i64 = 9;

/// Summary of a written archive.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    /// Entry names, in archive order.
    pub entries: Vec<String>,

    /// Size of the archive file in bytes.
    pub size_bytes: u64,

    /// SHA256 of the archive file, hex encoded.
    pub checksum: String,
}

/// Compress every file under `source_dir` into a new zip at `output_path`.
///
/// An existing file at `output_path` is replaced. The archive is fully
/// written, flushed and synced before this returns; any failure along the
/// way is reported as [`PackError::Archive`].
pub fn write_archive(source_dir: &Path, output_path: &Path) -> PackResult<ArchiveSummary> {
    let fail = |source: ZipError| PackError::Archive {
        path: output_path.to_path_buf(),
        source,
    };

    let entries = collect_entries(source_dir).map_err(|e| match e {
        PackError::Io(io) => fail(ZipError::Io(io)),
        PackError::Walk(walk) => fail(ZipError::Io(walk.into())),
        other => other,
    })?;

    let file = File::create(output_path).map_err(|e| fail(ZipError::Io(e)))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(MAX_COMPRESSION_LEVEL))
        .last_modified_time(zip::DateTime::default());

    for (name, path) in &entries {
        let contents = fs::read(path).map_err(|e| fail(ZipError::Io(e)))?;
        zip.start_file(name.as_str(), options).map_err(fail)?;
        zip.write_all(&contents).map_err(|e| fail(ZipError::Io(e)))?;
        debug!(entry = %name, bytes = contents.len(), "archived");
    }

    let writer = zip.finish().map_err(fail)?;
    let file = writer
        .into_inner()
        .map_err(|e| fail(ZipError::Io(e.into_error())))?;
    file.sync_all().map_err(|e| fail(ZipError::Io(e)))?;
    drop(file);

    let written = fs::read(output_path).map_err(|e| fail(ZipError::Io(e)))?;

    Ok(ArchiveSummary {
        entries: entries.into_iter().map(|(name, _)| name).collect(),
        size_bytes: written.len() as u64,
        checksum: compute_sha256(&written),
    })
}

/// Every regular file below `source_dir`, as (entry name, path) pairs in sorted order.
fn collect_entries(source_dir: &Path) -> PackResult<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| PackError::Io(std::io::Error::other(e)))?;
        entries.push((slash_path(relative), entry.path().to_path_buf()));
    }

    Ok(entries)
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}
