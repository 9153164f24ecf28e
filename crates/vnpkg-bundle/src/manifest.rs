//! Plugin descriptor parsing and final manifest synthesis.
//!
//! The descriptor (`package.json`) is read into a typed [`Manifest`] with the
//! four required fields pulled out and everything else carried through
//! untouched. [`FinalManifest`] is what lands in the archive as
//! `manifest.json`.

use crate::{PackError, PackResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Descriptor fields that must be present as non-empty strings.
pub const REQUIRED_FIELDS: [&str; 4] = ["id", "name", "version", "main"];

/// Plugin descriptor read from the project root.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Unique plugin identifier; also names the output file.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Plugin version (semver, e.g., "1.0.0").
    pub version: String,

    /// Entry file, relative to the project root.
    pub main: String,

    /// Every other descriptor key, in descriptor order.
    pub extra: Map<String, Value>,

    key_order: Vec<String>,
}

impl Manifest {
    /// Create a manifest with only the required fields set.
    #[must_use]
    pub fn new(id: &str, name: &str, version: &str, main: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            main: main.to_string(),
            extra: Map::new(),
            key_order: REQUIRED_FIELDS.iter().map(|key| key.to_string()).collect(),
        }
    }

    /// Load the descriptor from a file.
    pub fn from_file(path: impl AsRef<Path>) -> PackResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            let dir = path.parent().unwrap_or(path).to_path_buf();
            return Err(PackError::DescriptorNotFound(dir));
        }

        let content = std::fs::read(path)?;
        Self::from_slice(&content)
    }

    /// Parse the descriptor from a JSON string.
    pub fn from_json(json: &str) -> PackResult<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Parse the descriptor from raw bytes, which must be UTF-8 JSON.
    pub fn from_slice(bytes: &[u8]) -> PackResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| PackError::InvalidDescriptor(e.to_string()))?;

        Self::from_value(value)
    }

    /// Build a manifest from an already parsed JSON document.
    ///
    /// Every required field is checked before failing, so the error lists all
    /// of the missing ones at once.
    pub fn from_value(value: Value) -> PackResult<Self> {
        let Value::Object(fields) = value else {
            return Err(PackError::InvalidDescriptor(
                "expected a JSON object".to_string(),
            ));
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| required_string(&fields, key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(PackError::MissingFields(missing));
        }

        let field = |key: &str| required_string(&fields, key).unwrap_or_default();
        let id = field("id");
        let name = field("name");
        let version = field("version");
        let main = field("main");

        let key_order = fields.keys().cloned().collect();
        let extra = fields
            .into_iter()
            .filter(|(key, _)| !REQUIRED_FIELDS.contains(&key.as_str()))
            .collect();

        Ok(Self {
            id,
            name,
            version,
            main,
            extra,
            key_order,
        })
    }

    /// Resolve the entry file against a project root.
    #[must_use]
    pub fn main_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.main)
    }

    /// All fields as a JSON object, in descriptor order.
    ///
    /// Keys added after parsing (or absent from the descriptor, as with
    /// [`Manifest::new`]) follow the descriptor's keys.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let keys = self
            .key_order
            .iter()
            .map(String::as_str)
            .chain(REQUIRED_FIELDS)
            .chain(self.extra.keys().map(String::as_str));

        let mut fields = Map::new();
        for key in keys {
            if fields.contains_key(key) {
                continue;
            }
            if let Some(value) = self.field(key) {
                fields.insert(key.to_string(), value);
            }
        }
        fields
    }

    fn field(&self, key: &str) -> Option<Value> {
        let required = match key {
            "id" => &self.id,
            "name" => &self.name,
            "version" => &self.version,
            "main" => &self.main,
            _ => return self.extra.get(key).cloned(),
        };
        Some(Value::String(required.clone()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> PackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Returns the value of `key` if it is a non-empty string.
fn required_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// The manifest written into the archive: the descriptor plus packaging metadata.
#[derive(Debug, Clone)]
pub struct FinalManifest {
    pub manifest: Manifest,
    pub packaged_at: DateTime<Utc>,
    pub sdk_version: String,
}

impl FinalManifest {
    /// Key holding the packaging timestamp.
    pub const PACKAGED_AT: &'static str = "packagedAt";

    /// Key holding the packaging tool version.
    pub const SDK_VERSION: &'static str = "sdkVersion";

    /// Stamp a manifest with the current time.
    #[must_use]
    pub fn new(manifest: Manifest, sdk_version: &str) -> Self {
        Self::with_timestamp(manifest, sdk_version, Utc::now())
    }

    /// Stamp a manifest with an explicit time.
    #[must_use]
    pub fn with_timestamp(
        manifest: Manifest,
        sdk_version: &str,
        packaged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            manifest,
            packaged_at,
            sdk_version: sdk_version.to_string(),
        }
    }

    /// ISO-8601 timestamp with millisecond precision, e.g. `2026-10-17T09:30:00.123Z`.
    #[must_use]
    pub fn packaged_at_iso(&self) -> String {
        self.packaged_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Descriptor fields with the two packaging keys added.
    ///
    /// The packaging keys replace same-named keys from the descriptor, keeping
    /// their position.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = self.manifest.to_map();

        fields.insert(
            Self::PACKAGED_AT.to_string(),
            Value::String(self.packaged_at_iso()),
        );
        fields.insert(
            Self::SDK_VERSION.to_string(),
            Value::String(self.sdk_version.clone()),
        );

        Value::Object(fields)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> PackResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }
}
