//! Theme configuration describing where the build output lives and how it is resolved.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::enqueue::EnqueueStrategy;
use crate::error::{AssetError, Result};
use crate::host::ThemePaths;
use crate::manifest::{ManifestCache, MissingManifestPolicy};

const DEFAULT_CONFIG_FILES: [&str; 2] = ["wp-assets.config.json", "wp-assets.config.yaml"];
const DEFAULT_ENTRYPOINT_NAMESPACE: &str = "wpa";

/// Discoverable configuration for a theme's asset output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
  /// Public URL of the theme root (what `get_template_directory_uri` returns).
  pub template_url: String,
  /// Filesystem path of the theme root (what `get_template_directory` returns).
  pub template_dir: PathBuf,
  /// Build output directory relative to the theme root.
  pub output_dir: String,
  /// Manifest file name inside the output directory.
  pub manifest_file: String,
  /// Explicit manifest location overriding `output_dir` + `manifest_file`.
  pub manifest_path: Option<PathBuf>,
  /// Namespace prefixed to registered handles. When unset, entrypoint handles use `wpa` and
  /// flat handles (and their manifest keys) are left unscoped.
  pub namespace: Option<String>,
  /// Behaviour when the manifest file does not exist.
  pub missing_manifest: MissingManifestPolicy,
  /// Default enqueue strategy.
  pub strategy: EnqueueStrategy,
}

impl Default for AssetsConfig {
  fn default() -> Self {
    Self {
      template_url: String::new(),
      template_dir: PathBuf::new(),
      output_dir: "public".into(),
      manifest_file: "manifest.json".into(),
      manifest_path: None,
      namespace: None,
      missing_manifest: MissingManifestPolicy::default(),
      strategy: EnqueueStrategy::default(),
    }
  }
}

impl AssetsConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unreadable configuration file falls back to defaults so the caller can still
  /// supply the theme root explicitly.
  pub fn discover(dir: &Path) -> Self {
    DEFAULT_CONFIG_FILES
      .iter()
      .map(|name| dir.join(name))
      .filter(|candidate| candidate.is_file())
      .find_map(|candidate| Self::from_path(&candidate).ok())
      .unwrap_or_default()
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Result<Self> {
    let config_error = |reason: String| AssetError::Config {
      path: path.to_path_buf(),
      reason,
    };

    let content = fs::read_to_string(path).map_err(|err| config_error(err.to_string()))?;
    let is_yaml = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
      serde_yaml::from_str(&content).map_err(|err| config_error(err.to_string()))
    } else {
      serde_json::from_str(&content).map_err(|err| config_error(err.to_string()))
    }
  }

  /// Public URL and filesystem path of the output directory.
  ///
  /// An unset theme URL or directory means the host cannot tell us where the theme lives.
  pub fn theme_paths(&self) -> Result<ThemePaths> {
    if self.template_url.trim().is_empty() {
      return Err(AssetError::HostUnavailable("template directory URI"));
    }
    if self.template_dir.as_os_str().is_empty() {
      return Err(AssetError::HostUnavailable("template directory"));
    }

    let output = self.output_dir.trim_matches('/');
    let base_url = crate::asset_paths::join_url(&self.template_url, output);
    let base_dir = if output.is_empty() {
      self.template_dir.clone()
    } else {
      self.template_dir.join(output)
    };

    Ok(ThemePaths::new(base_url, base_dir))
  }

  /// Namespace used for `strategy` when none is configured.
  pub fn namespace_for(&self, strategy: EnqueueStrategy) -> &str {
    match (&self.namespace, strategy) {
      (Some(namespace), _) => namespace,
      (None, EnqueueStrategy::Flat) => "",
      (None, EnqueueStrategy::Entrypoints) => DEFAULT_ENTRYPOINT_NAMESPACE,
    }
  }

  /// Location of the manifest file.
  pub fn manifest_location(&self) -> Result<PathBuf> {
    match &self.manifest_path {
      Some(path) => Ok(path.clone()),
      None => Ok(self.theme_paths()?.dir_for(&self.manifest_file)),
    }
  }

  /// Fresh, unloaded manifest cache for this configuration.
  pub fn manifest_cache(&self) -> Result<ManifestCache> {
    Ok(ManifestCache::new(
      self.manifest_location()?,
      self.missing_manifest,
    ))
  }
}
