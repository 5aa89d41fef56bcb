//! Resolving manifest asset names to URLs and file contents.

use std::fs;

use tracing::{debug, warn};

use crate::asset_paths::normalize_asset_name;
use crate::config::AssetsConfig;
use crate::error::{AssetError, Result};
use crate::host::ThemePaths;
use crate::manifest::{Manifest, ManifestCache};

/// Version of the asset resolver.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Looks up assets in a manifest owned by the caller.
#[derive(Debug)]
pub struct AssetResolver {
  paths: ThemePaths,
  cache: ManifestCache,
}

impl AssetResolver {
  /// Create a resolver from theme paths and an injected manifest cache.
  pub fn new(paths: ThemePaths, cache: ManifestCache) -> Self {
    Self { paths, cache }
  }

  /// Build a resolver from configuration with a fresh cache.
  pub fn from_config(config: &AssetsConfig) -> Result<Self> {
    Ok(Self::new(config.theme_paths()?, config.manifest_cache()?))
  }

  /// Theme paths used to build URLs and file locations.
  pub fn paths(&self) -> &ThemePaths {
    &self.paths
  }

  /// Manifest cache backing this resolver.
  pub fn cache(&self) -> &ManifestCache {
    &self.cache
  }

  /// The manifest, loaded on first use.
  pub fn manifest(&self) -> Result<&Manifest> {
    self.cache.get()
  }

  /// Whether the manifest has an exact entry for `name`.
  pub fn asset_exists(&self, name: &str) -> Result<bool> {
    Ok(self.manifest()?.contains(name))
  }

  /// Best-effort URL for an asset.
  ///
  /// Returns the hashed URL when the manifest knows `name`, otherwise the URL of `name` itself.
  /// Only loading the manifest can fail.
  pub fn try_resolve(&self, name: &str) -> Result<String> {
    match self.manifest()?.get(name) {
      Some(path) => Ok(self.paths.url_for(path)),
      None => {
        warn!(asset = name, "asset not in manifest, using unresolved name");
        Ok(self.paths.url_for(name))
      }
    }
  }

  /// Strict URL lookup: the exact key, then the key without its `scripts/` or `styles/` prefix.
  pub fn must_resolve(&self, name: &str) -> Result<String> {
    let path = self.strict_path(name)?;
    Ok(self.paths.url_for(&path))
  }

  /// Public URL of an asset, falling back to the unresolved name.
  pub fn resolve_asset_url(&self, name: &str) -> Result<String> {
    self.try_resolve(name)
  }

  /// Contents of a built asset, e.g. for inlining critical CSS.
  pub fn resolve_asset_content(&self, name: &str) -> Result<String> {
    let path = self.strict_path(name)?;
    let file = self.paths.dir_for(&path);
    if !file.is_file() {
      return Err(AssetError::AssetFileMissing { path: file });
    }

    debug!(asset = name, path = %file.display(), "reading asset content");
    fs::read_to_string(&file).map_err(|source| AssetError::AssetRead { path: file, source })
  }

  fn strict_path(&self, name: &str) -> Result<String> {
    let manifest = self.manifest()?;
    if let Some(path) = manifest.get(name) {
      return Ok(path.to_string());
    }

    let normalized = normalize_asset_name(name, false);
    manifest
      .get(&normalized)
      .map(str::to_string)
      .ok_or(AssetError::AssetNotFound(normalized))
  }
}
