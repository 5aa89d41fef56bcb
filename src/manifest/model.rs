//! Deserialised representation of the bundler's `manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AssetError, Result};

/// Mapping of logical asset names to built paths, plus optional entrypoint groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
  /// Logical asset key (e.g. `scripts/main.js`) to output path (e.g. `/scripts/main.3f2a.js`).
  pub assets: BTreeMap<String, String>,
  /// Files grouped by entry name, present when the bundler emits entrypoints.
  pub entrypoints: BTreeMap<String, Entrypoint>,
}

/// Group of output files produced for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Entrypoint {
  /// Files by category.
  #[serde(default)]
  pub assets: EntrypointAssets,
}

/// Output files of an entrypoint; every category may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntrypointAssets {
  /// Stylesheets.
  #[serde(default)]
  pub css: Vec<String>,
  /// Scripts.
  #[serde(default)]
  pub js: Vec<String>,
  /// Dependency descriptors emitted by the dependency extraction plugin.
  #[serde(default)]
  pub php: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
  #[serde(default)]
  entrypoints: BTreeMap<String, Entrypoint>,
  #[serde(flatten)]
  rest: BTreeMap<String, serde_json::Value>,
}

impl Manifest {
  /// Parse manifest JSON. Top-level values that are not strings are ignored.
  pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
    let file: ManifestFile = serde_json::from_str(content)?;
    let assets = file
      .rest
      .into_iter()
      .filter_map(|(key, value)| match value {
        serde_json::Value::String(path) => Some((key, path)),
        _ => None,
      })
      .collect();

    Ok(Self {
      assets,
      entrypoints: file.entrypoints,
    })
  }

  /// Read and parse a manifest from disk.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|source| AssetError::ManifestRead {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&content).map_err(|source| AssetError::ManifestParse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Output path recorded for an exact asset key.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.assets.get(name).map(String::as_str)
  }

  /// Whether an exact asset key is present.
  pub fn contains(&self, name: &str) -> bool {
    self.assets.contains_key(name)
  }

  /// Entrypoint recorded for an entry name.
  pub fn entrypoint(&self, entry: &str) -> Option<&Entrypoint> {
    self.entrypoints.get(entry)
  }

  /// Whether the manifest has neither assets nor entrypoints.
  pub fn is_empty(&self) -> bool {
    self.assets.is_empty() && self.entrypoints.is_empty()
  }
}
