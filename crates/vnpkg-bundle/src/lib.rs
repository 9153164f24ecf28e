//! Packaging pipeline for vnpkg plugin archives
//!
//! This crate turns a plugin project on disk into a single `.vnpkg` archive:
//! a zip file holding the plugin's build output, static assets and an
//! augmented `manifest.json`.
//!
//! # Project Layout
//!
//! ```text
//! my-plugin/
//! ├── package.json               # descriptor: id, name, version, main
//! ├── README.md
//! ├── LICENSE
//! ├── icon.png
//! ├── assets/
//! │   └── ...                    # copied recursively
//! └── dist/
//!     ├── index.js               # entry file named by `main`
//!     ├── index.js.map
//!     ├── index.d.ts
//!     └── my-plugin-1.0.0.vnpkg  # produced artifact
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vnpkg_bundle::{PackConfig, Packager};
//!
//! let config = PackConfig::new("./my-plugin");
//! let report = Packager::new(config).pack()?;
//!
//! println!("{} ({:.2} KB)", report.output_path.display(), report.size_kib());
//! # Ok::<(), vnpkg_bundle::PackError>(())
//! ```

mod config;
mod error;
mod manifest;
mod sanitize;

pub mod archive;
pub mod packager;
pub mod pattern;
pub mod staging;

pub use config::{PackConfig, resolve_sdk_version};
pub use error::PackError;
pub use manifest::{FinalManifest, Manifest, REQUIRED_FIELDS};
pub use packager::{NoProgress, PackReport, Packager, Progress};
pub use pattern::{DEFAULT_INCLUDE_PATTERNS, IncludePattern};
pub use sanitize::{package_file_name, sanitize_filename};
pub use staging::{PatternReport, StageOutcome, StagingTree};

/// Result type for packaging operations.
pub type PackResult<T> = Result<T, PackError>;

/// Package file extension.
pub const PACKAGE_EXTENSION: &str = "vnpkg";

/// Descriptor file name at the project root.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Manifest file name within the package.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Output directory, relative to the project root.
pub const OUTPUT_DIR: &str = "dist";

/// Staging directory name, created inside the output directory.
pub const STAGING_DIR: &str = ".temp-package";

/// SDK version recorded when the tool's own version cannot be resolved.
pub const FALLBACK_SDK_VERSION: &str = "1.0.0";
